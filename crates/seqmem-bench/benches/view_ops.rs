//! Criterion benchmarks for view construction and vectored draining.

use std::hint::black_box;
use std::io::sink;

use criterion::{criterion_group, criterion_main, Criterion};
use seqmem_bench::{fill_sequence_buffer, reference_blocks};

/// Benchmark: build a view over the reference workload.
fn bench_view_construction(c: &mut Criterion) {
    let buf = fill_sequence_buffer(&reference_blocks());
    c.bench_function("view_construction", |b| {
        b.iter(|| black_box(buf.view().segment_count()));
    });
}

/// Benchmark: drain a view through `write_vectored` versus flattening first.
fn bench_drain(c: &mut Criterion) {
    let buf = fill_sequence_buffer(&reference_blocks());
    let mut group = c.benchmark_group("drain");
    group.bench_function("write_to_vectored", |b| {
        b.iter(|| buf.view().write_to(sink()).unwrap());
    });
    group.bench_function("flatten_then_write", |b| {
        b.iter(|| {
            let flat = buf.to_vec();
            std::io::Write::write_all(&mut sink(), &flat).unwrap();
            black_box(flat.len())
        });
    });
    group.finish();
}

criterion_group!(benches, bench_view_construction, bench_drain);
criterion_main!(benches);

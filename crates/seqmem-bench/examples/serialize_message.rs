//! Serialize a message in pieces, then ship it without flattening.
//!
//! Demonstrates: stream into a buffer via `io::Write` → inspect chunk
//! layout → drain the view with vectored writes → flatten for comparison.
//!
//! Run with `RUST_LOG=seqmem=trace` to see each chunk allocation.

use std::io::Write;

use seqmem::SequenceBuffer;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut buf = SequenceBuffer::<u8>::new();
    writeln!(buf, "MSG v1")?;
    for i in 0..500 {
        writeln!(buf, "record {i}: {}", "x".repeat(i % 40))?;
    }
    writeln!(buf, "END")?;

    let view = buf.view();
    println!(
        "{} bytes in {} chunks ({} bytes allocated)",
        view.len(),
        view.segment_count(),
        buf.memory_bytes()
    );
    for seg in view.segments() {
        println!("  segment at {:>6}: {:>6} bytes", seg.running_index(), seg.len());
    }

    let mut wire = Vec::new();
    let sent = view.write_to(&mut wire)?;
    assert_eq!(wire, buf.to_vec());
    println!("sent {sent} bytes with vectored writes, content matches to_vec()");
    Ok(())
}

//! Proxy stdin to stdout through a pooled buffer.
//!
//! Run with:
//!     echo hello | RUST_LOG=poolbuf=trace cargo run --example sync_proxy

use std::io;

use poolbuf::{BufferPool, PoolConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let config = PoolConfig::new(16 * 1024)?.with_max_idle(64);
    let pool = BufferPool::with_config(config)?;

    let mut buf = pool.buffer();
    let read = buf.read_from(&mut io::stdin().lock())?;
    eprintln!("buffered {} bytes in {} chunks", read, buf.chunk_count());

    let written = buf.write_to(&mut io::stdout().lock())?;
    eprintln!("wrote {} bytes", written);

    Ok(())
}

//! Async relay between tokio streams.
//!
//! Tokio's I/O traits are bridged to futures-io with `tokio_util::compat`.
//!
//! Run with:
//!     cargo run --example async_tokio --features async-io

use poolbuf::BufferPool;
use tokio::io::AsyncWriteExt;
use tokio_util::compat::{TokioAsyncReadCompatExt, TokioAsyncWriteCompatExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let pool = BufferPool::new(8 * 1024)?;

    let (client, server) = tokio::io::duplex(64 * 1024);

    // Producer writes into one end of the pipe and closes it
    let producer = tokio::spawn(async move {
        let mut client = client;
        for i in 0..1000 {
            client.write_all(format!("line {i}\n").as_bytes()).await?;
        }
        client.shutdown().await?;
        Ok::<_, std::io::Error>(())
    });

    let mut buf = pool.buffer();
    let mut reader = server.compat();
    let read = buf.read_from_async(&mut reader).await?;
    producer.await??;
    println!("Buffered {} bytes in {} chunks", read, buf.chunk_count());

    let mut stdout = tokio::io::stdout().compat_write();
    let written = buf.write_to_async(&mut stdout).await?;
    futures_util::io::AsyncWriteExt::flush(&mut stdout).await?;
    eprintln!("\nRelayed {} bytes", written);

    Ok(())
}

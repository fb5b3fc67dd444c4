//! Fan one buffer out to several consumers without copying its chunks.
//!
//! Run with:
//!     cargo run --example clone_fanout

use std::thread;

use poolbuf::BufferPool;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let pool = BufferPool::new(4 * 1024)?;

    let mut source = pool.buffer();
    let payload: Vec<u8> = (0..100_000).map(|i| (i % 251) as u8).collect();
    source.append(&payload);
    println!(
        "Source holds {} bytes in {} chunks\n",
        source.len(),
        source.chunk_count()
    );

    // Every consumer gets its own view of the same chunks
    let handles: Vec<_> = (0..4)
        .map(|id| {
            let mut view = source.clone();
            thread::spawn(move || {
                view.append(format!(" [consumer {id}]").as_bytes());
                let mut out = Vec::new();
                let n = view.write_to(&mut out)?;
                Ok::<_, std::io::Error>((id, n, out))
            })
        })
        .collect();

    // The source can go away before its consumers finish
    source.clear();

    for handle in handles {
        let (id, n, out) = handle.join().map_err(|_| "consumer panicked")??;
        assert_eq!(&out[..payload.len()], &payload[..]);
        println!(
            "Consumer {}: {} bytes, tail {:?}",
            id,
            n,
            String::from_utf8_lossy(&out[payload.len()..])
        );
    }

    Ok(())
}

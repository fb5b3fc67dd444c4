//! poolbuf
//!
//! A growable byte buffer built from pooled fixed-size chunks, for moving
//! bytes at high throughput (for example proxying between two sockets).
//!
//! A [`Buffer`] never relocates bytes. It grows by taking chunks from a
//! shared [`BufferPool`] and shrinks by handing fully-read chunks back, so
//! every byte is copied at most once on the way in and once on the way out.
//!
//! The crate intentionally:
//! - does NOT provide random access or seeking
//! - does NOT let written bytes be modified
//! - does NOT apply backpressure (writes always succeed)
//!
//! It only does one thing: **Bytes in at the back → bytes out at the front**
//!
//! # Sync
//!
//! ```no_run
//! use std::net::TcpStream;
//! use poolbuf::BufferPool;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = BufferPool::new(16 * 1024)?;
//!     let mut upstream = TcpStream::connect("127.0.0.1:8080")?;
//!     let mut downstream = TcpStream::connect("127.0.0.1:9090")?;
//!
//!     let mut buf = pool.buffer();
//!     buf.read_from(&mut upstream)?;
//!     buf.write_to(&mut downstream)?;
//!     Ok(())
//! }
//! ```
//!
//! # Sharing
//!
//! Cloning a buffer shares its chunks instead of copying them. Each clone
//! reads and writes independently:
//!
//! ```
//! use poolbuf::BufferPool;
//!
//! let pool = BufferPool::new(32)?;
//! let mut original = pool.buffer();
//! original.append(b"shared prefix");
//!
//! let mut copy = original.clone();
//! copy.append(b" + copy only");
//! original.clear();
//!
//! assert_eq!(&copy.drain_contiguous()[..], b"shared prefix + copy only");
//! # Ok::<(), poolbuf::PoolError>(())
//! ```
//!
//! # Async (feature = "async-io")
//!
//! ```ignore
//! use poolbuf::BufferPool;
//! use futures_io::{AsyncRead, AsyncWrite};
//!
//! async fn relay<R, W>(pool: &BufferPool, r: &mut R, w: &mut W) -> std::io::Result<u64>
//! where
//!     R: AsyncRead + Unpin,
//!     W: AsyncWrite + Unpin,
//! {
//!     let mut buf = pool.buffer();
//!     buf.read_from_async(r).await?;
//!     Ok(buf.write_to_async(w).await?)
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod buffer;
mod chunk;
mod config;
mod error;
mod pool;

#[cfg(feature = "async-io")]
mod async_io;

//
// Public surface (intentionally tiny)
//

pub use buffer::{Buffer, ReadOutcome};
pub use chunk::PoolEntry;
pub use config::{DEFAULT_CHUNK_LIST_CAPACITY, DEFAULT_CHUNK_SIZE, DEFAULT_MAX_IDLE, PoolConfig};
pub use error::{PoolError, TransferError};
pub use pool::{BlockPool, BufferPool, SyncPool};

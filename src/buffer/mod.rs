//! The chunk-list buffer.
//!
//! A [`Buffer`] is an ordered list of pooled chunks. Bytes are appended to
//! the free space of the last chunk and consumed from the front of the first
//! one, so bytes never move once written and every byte is copied at most
//! once on the way in and once on the way out. Fully consumed chunks go back
//! to the pool right away.
//!
//! Cloning a buffer shares its chunks instead of copying them. A shared chunk
//! is never written again by anyone, so each clone appends into chunks of its
//! own and can be read and written independently of the others.

mod io;
mod vectored;

use std::collections::VecDeque;
use std::fmt;
use std::io::{ErrorKind, Read, Write};

use bytes::{Bytes, BytesMut};

use crate::chunk::Chunk;
use crate::error::TransferError;
use crate::pool::BufferPool;

#[cfg(feature = "async-io")]
pub(crate) use vectored::io_slices;

/// Result of [`Buffer::read_into`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    /// The destination was filled completely. The buffer may or may not be
    /// empty afterwards.
    Filled(usize),

    /// The buffer ran out before the destination was full. Carries the
    /// number of bytes copied, possibly zero.
    EndOfData(usize),
}

impl ReadOutcome {
    /// Returns the number of bytes copied.
    pub fn len(&self) -> usize {
        match *self {
            ReadOutcome::Filled(n) | ReadOutcome::EndOfData(n) => n,
        }
    }

    /// Returns true if nothing was copied.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if the buffer ran out of data.
    pub fn is_end_of_data(&self) -> bool {
        matches!(self, ReadOutcome::EndOfData(_))
    }
}

/// A growable byte buffer made of pooled fixed-size chunks.
///
/// Create one with [`BufferPool::buffer`]. Besides the inherent methods it
/// implements [`std::io::Read`], [`std::io::BufRead`], [`std::io::Write`],
/// [`std::fmt::Write`] and [`bytes::Buf`].
///
/// Dropping a buffer releases its chunks to the pool.
///
/// # Example
///
/// ```
/// use poolbuf::{BufferPool, ReadOutcome};
///
/// let pool = BufferPool::new(32)?;
/// let mut buf = pool.buffer();
/// buf.append(&[7u8; 100]);
/// assert_eq!(buf.len(), 100);
///
/// let mut out = [0u8; 64];
/// assert_eq!(buf.read_into(&mut out), ReadOutcome::Filled(64));
/// assert_eq!(buf.read_into(&mut out), ReadOutcome::EndOfData(36));
/// assert_eq!(buf.read_into(&mut out), ReadOutcome::EndOfData(0));
/// # Ok::<(), poolbuf::PoolError>(())
/// ```
pub struct Buffer {
    pool: BufferPool,
    chunks: VecDeque<Chunk>,
}

impl Buffer {
    pub(crate) fn new(pool: BufferPool) -> Self {
        let chunks = VecDeque::with_capacity(pool.config().chunk_list_capacity());
        Self { pool, chunks }
    }

    /// Returns the pool this buffer takes chunks from.
    pub fn pool(&self) -> &BufferPool {
        &self.pool
    }

    /// Returns the number of unread bytes.
    ///
    /// Walks the chunk list, so it is linear in the number of chunks.
    pub fn len(&self) -> usize {
        self.chunks.iter().map(Chunk::len).sum()
    }

    /// Returns true if there are no unread bytes.
    pub fn is_empty(&self) -> bool {
        self.chunks.iter().all(Chunk::is_empty)
    }

    /// Returns the number of chunks currently held.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Appends `src`, returning `src.len()`.
    ///
    /// Never fails: when the last chunk is full or shared with a clone, a new
    /// chunk is taken from the pool.
    ///
    /// # Panics
    ///
    /// Panics if the pool is misconfigured (see [`BlockPool`](crate::BlockPool)).
    pub fn append(&mut self, mut src: &[u8]) -> usize {
        let total = src.len();
        while !src.is_empty() {
            let n = self.writable_tail().write_spare(src);
            src = &src[n..];
        }
        total
    }

    /// Reads from `reader` until end of input, straight into chunk memory.
    ///
    /// Returns the number of bytes read. Reads interrupted by
    /// [`ErrorKind::Interrupted`] are retried; any other error stops the
    /// transfer and comes back inside a [`TransferError`] along with the
    /// count read so far. Those bytes stay in the buffer.
    ///
    /// # Panics
    ///
    /// Panics if the pool is misconfigured (see [`BlockPool`](crate::BlockPool)).
    pub fn read_from<R: Read + ?Sized>(&mut self, reader: &mut R) -> Result<u64, TransferError> {
        let mut total = 0u64;
        loop {
            match self.writable_tail().fill_from(reader) {
                Ok(0) => return Ok(total),
                Ok(n) => total += n as u64,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(TransferError::new(total, e)),
            }
        }
    }

    /// Consumes bytes from the front into `dst`.
    ///
    /// Returns [`ReadOutcome::Filled`] when `dst` was filled, even if that
    /// emptied the buffer, and [`ReadOutcome::EndOfData`] when the buffer ran
    /// out first. An empty `dst` is always `Filled(0)`.
    pub fn read_into(&mut self, dst: &mut [u8]) -> ReadOutcome {
        if dst.is_empty() {
            return ReadOutcome::Filled(0);
        }

        let mut copied = 0;
        while let Some(front) = self.chunks.front() {
            let data = front.data();
            let n = data.len().min(dst.len() - copied);
            dst[copied..copied + n].copy_from_slice(&data[..n]);
            self.drop_consumed(n);
            copied += n;
            if copied == dst.len() {
                return ReadOutcome::Filled(copied);
            }
        }
        ReadOutcome::EndOfData(copied)
    }

    /// Writes every unread byte to `writer`, consuming them as they are accepted.
    ///
    /// With more than one chunk queued and vectored writes enabled in the
    /// pool's [`PoolConfig`](crate::PoolConfig), chunks are first handed over
    /// in batches through [`Write::write_vectored`]; whatever is left goes
    /// out one chunk at a time.
    ///
    /// Returns the number of bytes written. If `writer` accepts zero bytes
    /// the drain stops without an error and the rest stays queued. Interrupted
    /// writes are retried; any other error stops the drain and is returned
    /// with the count written so far. Bytes already written are gone from the
    /// buffer, the rest can be drained by a later call.
    pub fn write_to<W: Write + ?Sized>(&mut self, writer: &mut W) -> Result<u64, TransferError> {
        let mut total = 0u64;
        if self.pool.config().vectored_writes() && self.chunks.len() > 1 {
            total = vectored::drain_vectored(self, writer)?;
        }

        while let Some(front) = self.chunks.front() {
            if front.is_empty() {
                self.drop_consumed(0);
                continue;
            }
            match writer.write(front.data()) {
                Ok(0) => break,
                Ok(n) => {
                    self.drop_consumed(n);
                    total += n as u64;
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(TransferError::new(total, e)),
            }
        }
        Ok(total)
    }

    /// Consumes everything into one contiguous allocation.
    ///
    /// # Example
    ///
    /// ```
    /// use poolbuf::BufferPool;
    ///
    /// let pool = BufferPool::new(4)?;
    /// let mut buf = pool.buffer();
    /// buf.append(b"spans several chunks");
    ///
    /// assert_eq!(&buf.drain_contiguous()[..], b"spans several chunks");
    /// assert!(buf.is_empty());
    /// # Ok::<(), poolbuf::PoolError>(())
    /// ```
    pub fn drain_contiguous(&mut self) -> Bytes {
        let mut out = BytesMut::with_capacity(self.len());
        for chunk in self.chunks.drain(..) {
            out.extend_from_slice(chunk.data());
            self.pool.release(chunk);
        }
        out.freeze()
    }

    /// Discards all unread bytes, releasing every chunk. The buffer stays usable.
    pub fn clear(&mut self) {
        for chunk in self.chunks.drain(..) {
            self.pool.release(chunk);
        }
    }

    /// Returns the last chunk, first taking a new one from the pool unless
    /// it exists, has free space and is not shared.
    pub(crate) fn writable_tail(&mut self) -> &mut Chunk {
        let writable = self.chunks.back_mut().is_some_and(Chunk::is_writable);
        if !writable {
            let chunk = self.pool.acquire();
            self.chunks.push_back(chunk);
        }
        let last = self.chunks.len() - 1;
        &mut self.chunks[last]
    }

    pub(crate) fn front(&self) -> Option<&Chunk> {
        self.chunks.front()
    }

    /// Marks `n` bytes at the front as consumed, releasing chunks that run
    /// empty along the way.
    pub(crate) fn drop_consumed(&mut self, mut n: usize) {
        while let Some(front) = self.chunks.front_mut() {
            let len = front.len();
            if n < len {
                front.advance(n);
                return;
            }
            n -= len;
            if let Some(chunk) = self.chunks.pop_front() {
                self.pool.release(chunk);
            }
            if n == 0 {
                return;
            }
        }
    }
}

impl Clone for Buffer {
    /// Returns a buffer sharing every chunk with this one.
    ///
    /// No bytes are copied. Both buffers read the current contents and can
    /// be written and read independently afterwards; shared chunks go back
    /// to the pool once every buffer holding them has let go.
    fn clone(&self) -> Self {
        let mut chunks = VecDeque::with_capacity(
            self.chunks
                .len()
                .max(self.pool.config().chunk_list_capacity()),
        );
        chunks.extend(self.chunks.iter().map(Chunk::share));
        Self {
            pool: self.pool.clone(),
            chunks,
        }
    }
}

impl Drop for Buffer {
    fn drop(&mut self) {
        self.clear();
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("len", &self.len())
            .field("chunks", &self.chunks)
            .finish()
    }
}

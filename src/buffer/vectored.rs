//! Vectored drain: hand several chunks to the sink in one call.

use std::io::{ErrorKind, IoSlice, Write};

use bytes::Buf;

use super::Buffer;
use crate::error::TransferError;

/// Most slices passed to a single vectored write (Linux `UIO_MAXIOV`).
pub(crate) const MAX_IO_SLICES: usize = 1024;

/// Collects the unread range of each non-empty chunk, up to [`MAX_IO_SLICES`].
pub(crate) fn io_slices(buf: &Buffer) -> Vec<IoSlice<'_>> {
    let mut slices = vec![IoSlice::new(&[]); buf.chunk_count().min(MAX_IO_SLICES)];
    let filled = buf.chunks_vectored(&mut slices);
    slices.truncate(filled);
    slices
}

/// Writes batches of chunks until fewer than two remain.
///
/// A zero-length write hands the rest over to the per-chunk path.
pub(super) fn drain_vectored<W: Write + ?Sized>(
    buf: &mut Buffer,
    writer: &mut W,
) -> Result<u64, TransferError> {
    let mut total = 0u64;
    while buf.chunk_count() > 1 {
        let result = {
            let slices = io_slices(buf);
            writer.write_vectored(&slices)
        };
        match result {
            Ok(0) => break,
            Ok(n) => {
                tracing::trace!(written = n, "vectored write");
                buf.drop_consumed(n);
                total += n as u64;
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(TransferError::new(total, e)),
        }
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BufferPool;

    #[test]
    fn test_io_slices_skip_empty_chunks() {
        let pool = BufferPool::new(4).unwrap();
        let mut buf = pool.buffer();
        buf.append(b"abcdef");

        let mut out = [0u8; 4];
        buf.read_into(&mut out);
        // The remaining data is "ef" in one chunk.
        let slices = io_slices(&buf);
        assert_eq!(slices.len(), 1);
        assert_eq!(&*slices[0], b"ef");
    }

    #[test]
    fn test_drain_vectored_leaves_last_chunk() {
        struct HalfWriter(Vec<u8>);

        impl Write for HalfWriter {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                self.0.extend_from_slice(buf);
                Ok(buf.len())
            }

            fn write_vectored(&mut self, bufs: &[IoSlice<'_>]) -> std::io::Result<usize> {
                // Accept a chunk and a half.
                let first = &bufs[0];
                let second = &bufs[1][..bufs[1].len() / 2];
                self.0.extend_from_slice(first);
                self.0.extend_from_slice(second);
                Ok(first.len() + second.len())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let pool = BufferPool::new(4).unwrap();
        let mut buf = pool.buffer();
        buf.append(b"aaaabbbbcccc");

        let mut w = HalfWriter(Vec::new());
        let n = drain_vectored(&mut buf, &mut w).unwrap();
        // Six bytes, then four more, leaving a single chunk.
        assert_eq!(n as usize, w.0.len());
        assert_eq!(buf.chunk_count(), 1);
        assert_eq!(w.0, b"aaaabbbbcc");
        assert_eq!(&buf.drain_contiguous()[..], b"cc");
    }
}

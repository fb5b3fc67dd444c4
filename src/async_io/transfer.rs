//! Async trait implementations and bulk transfers.

use std::future::poll_fn;
use std::io::{self, BufRead, ErrorKind};
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_io::{AsyncBufRead, AsyncRead, AsyncWrite};

use crate::buffer::{Buffer, io_slices};
use crate::error::TransferError;

impl AsyncRead for Buffer {
    fn poll_read(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut [u8],
    ) -> Poll<io::Result<usize>> {
        Poll::Ready(Ok(self.get_mut().read_into(buf).len()))
    }
}

impl AsyncBufRead for Buffer {
    fn poll_fill_buf(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<&[u8]>> {
        Poll::Ready(self.get_mut().fill_buf())
    }

    fn consume(self: Pin<&mut Self>, amt: usize) {
        self.get_mut().drop_consumed(amt);
    }
}

impl AsyncWrite for Buffer {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        Poll::Ready(Ok(self.get_mut().append(buf)))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_close(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

impl Buffer {
    /// Async version of [`Buffer::read_from`].
    ///
    /// Reads from `reader` into chunk memory until end of input. Errors are
    /// reported the same way as for the synchronous version.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use poolbuf::BufferPool;
    /// use tokio_util::compat::TokioAsyncReadCompatExt;
    ///
    /// let pool = BufferPool::new(16 * 1024)?;
    /// let mut buf = pool.buffer();
    /// let mut upstream = tokio::net::TcpStream::connect("127.0.0.1:8080").await?.compat();
    /// let n = buf.read_from_async(&mut upstream).await?;
    /// ```
    pub async fn read_from_async<R>(&mut self, reader: &mut R) -> Result<u64, TransferError>
    where
        R: AsyncRead + Unpin + ?Sized,
    {
        let mut total = 0u64;
        loop {
            let tail = self.writable_tail();
            let result = poll_fn(|cx| match tail.spare_mut() {
                Some(spare) => Pin::new(&mut *reader).poll_read(cx, spare),
                None => Poll::Ready(Ok(0)),
            })
            .await;
            match result {
                Ok(0) => return Ok(total),
                Ok(n) => {
                    tail.commit(n);
                    total += n as u64;
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(TransferError::new(total, e)),
            }
        }
    }

    /// Async version of [`Buffer::write_to`].
    ///
    /// Uses `poll_write_vectored` while more than one chunk is queued and
    /// vectored writes are enabled, then writes chunk by chunk. The writer
    /// is not flushed.
    pub async fn write_to_async<W>(&mut self, writer: &mut W) -> Result<u64, TransferError>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        let mut total = 0u64;

        if self.pool().config().vectored_writes() {
            while self.chunk_count() > 1 {
                let result = {
                    let slices = io_slices(self);
                    poll_fn(|cx| Pin::new(&mut *writer).poll_write_vectored(cx, &slices)).await
                };
                match result {
                    Ok(0) => break,
                    Ok(n) => {
                        tracing::trace!(written = n, "vectored write");
                        self.drop_consumed(n);
                        total += n as u64;
                    }
                    Err(e) if e.kind() == ErrorKind::Interrupted => {}
                    Err(e) => return Err(TransferError::new(total, e)),
                }
            }
        }

        while let Some(front) = self.front() {
            if front.is_empty() {
                self.drop_consumed(0);
                continue;
            }
            let data = front.data();
            let result = poll_fn(|cx| Pin::new(&mut *writer).poll_write(cx, data)).await;
            match result {
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
}

#[cfg(test)]
mod tests {
    use futures_util::io::{AsyncReadExt, AsyncWriteExt};

    use super::*;
    use crate::{BufferPool, PoolConfig};

    fn data(len: usize) -> Vec<u8> {
        (0..len).map(|i| b'a' + (i % 26) as u8).collect()
    }

    /// Accepts at most `limit` bytes per call and returns `Pending` every
    /// other poll.
    struct SlowWriter {
        out: Vec<u8>,
        limit: usize,
        ready: bool,
    }

    impl AsyncWrite for SlowWriter {
        fn poll_write(
            mut self: Pin<&mut Self>,
            cx: &mut Context<'_>,
            buf: &[u8],
        ) -> Poll<io::Result<usize>> {
            let this = &mut *self;
            this.ready = !this.ready;
            if !this.ready {
                cx.waker().wake_by_ref();
                return Poll::Pending;
            }
            let n = buf.len().min(this.limit);
            this.out.extend_from_slice(&buf[..n]);
            Poll::Ready(Ok(n))
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }

        fn poll_close(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }
    }

    #[tokio::test]
    async fn test_read_from_async() {
        let input = data(2160);
        let pool = BufferPool::new(32).unwrap();
        let mut buf = pool.buffer();

        let mut reader: &[u8] = &input;
        let n = buf.read_from_async(&mut reader).await.unwrap();
        assert_eq!(n, 2160);
        assert_eq!(buf.len(), 2160);
        assert_eq!(&buf.drain_contiguous()[..], &input[..]);
    }

    #[tokio::test]
    async fn test_write_to_async() {
        for vectored in [true, false] {
            let input = data(1000);
            let config = PoolConfig::new(64).unwrap().with_vectored_writes(vectored);
            let mut buf = BufferPool::with_config(config).unwrap().buffer();
            buf.append(&input);

            let mut out: Vec<u8> = Vec::new();
            let n = buf.write_to_async(&mut out).await.unwrap();
            assert_eq!(n, 1000);
            assert_eq!(out, input);
            assert!(buf.is_empty());
        }
    }

    #[tokio::test]
    async fn test_write_to_async_slow_writer() {
        let input = data(300);
        let pool = BufferPool::new(32).unwrap();
        let mut buf = pool.buffer();
        buf.append(&input);

        let mut w = SlowWriter {
            out: Vec::new(),
            limit: 7,
            ready: false,
        };
        let n = buf.write_to_async(&mut w).await.unwrap();
        assert_eq!(n, 300);
        assert_eq!(w.out, input);
        assert_eq!(buf.chunk_count(), 0);
    }

    #[tokio::test]
    async fn test_async_traits() {
        let pool = BufferPool::new(4).unwrap();
        let mut buf = pool.buffer();
        buf.write_all(b"hello async world").await.unwrap();
        buf.flush().await.unwrap();

        let mut head = [0u8; 6];
        buf.read_exact(&mut head).await.unwrap();
        assert_eq!(&head, b"hello ");

        let mut rest = Vec::new();
        buf.read_to_end(&mut rest).await.unwrap();
        assert_eq!(rest, b"async world");
    }
}

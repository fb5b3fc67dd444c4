//! Standard reader/writer trait implementations for [`Buffer`].

use std::fmt;
use std::io::{self, BufRead, IoSlice, Read, Write};

use bytes::Buf;

use super::Buffer;
use crate::chunk::Chunk;

impl Read for Buffer {
    /// Reads up to `buf.len()` bytes. `Ok(0)` means the buffer is empty.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(self.read_into(buf).len())
    }
}

impl BufRead for Buffer {
    /// Returns the unread part of the first non-empty chunk.
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        while self.front().is_some_and(Chunk::is_empty) {
            self.drop_consumed(0);
        }
        Ok(self.front().map(Chunk::data).unwrap_or_default())
    }

    fn consume(&mut self, amt: usize) {
        self.drop_consumed(amt);
    }
}

impl Write for Buffer {
    /// Appends all of `buf`. Never fails.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(self.append(buf))
    }

    fn write_vectored(&mut self, bufs: &[IoSlice<'_>]) -> io::Result<usize> {
        Ok(bufs.iter().map(|b| self.append(b)).sum())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl fmt::Write for Buffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.append(s.as_bytes());
        Ok(())
    }
}

impl Buf for Buffer {
    fn remaining(&self) -> usize {
        self.len()
    }

    fn chunk(&self) -> &[u8] {
        self.chunks
            .iter()
            .map(Chunk::data)
            .find(|data| !data.is_empty())
            .unwrap_or_default()
    }

    fn chunks_vectored<'a>(&'a self, dst: &mut [IoSlice<'a>]) -> usize {
        let mut n = 0;
        for data in self.chunks.iter().map(Chunk::data) {
            if n == dst.len() {
                break;
            }
            if !data.is_empty() {
                dst[n] = IoSlice::new(data);
                n += 1;
            }
        }
        n
    }

    fn advance(&mut self, cnt: usize) {
        assert!(
            cnt <= self.remaining(),
            "cannot advance past `remaining`: cnt={} remaining={}",
            cnt,
            self.remaining()
        );
        self.drop_consumed(cnt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BufferPool;

    fn buffer(chunk_size: usize) -> Buffer {
        BufferPool::new(chunk_size).unwrap().buffer()
    }

    #[test]
    fn test_read_to_end() {
        let mut buf = buffer(4);
        buf.write_all(b"0123456789").unwrap();

        let mut out = Vec::new();
        buf.read_to_end(&mut out).unwrap();
        assert_eq!(out, b"0123456789");
        assert_eq!(buf.read(&mut [0u8; 4]).unwrap(), 0);
    }

    #[test]
    fn test_buf_read_lines() {
        let mut buf = buffer(5);
        buf.write_all(b"first\nsecond\nthird").unwrap();

        let lines: Vec<String> = BufRead::lines(&mut buf).map(|l| l.unwrap()).collect();
        assert_eq!(lines, ["first", "second", "third"]);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_fill_buf_skips_empty_chunks() {
        let mut buf = buffer(4);
        let mut empty: &[u8] = b"";
        buf.read_from(&mut empty).unwrap();
        assert_eq!(buf.chunk_count(), 1);

        assert!(buf.fill_buf().unwrap().is_empty());
        assert_eq!(buf.chunk_count(), 0);
    }

    #[test]
    fn test_fmt_write() {
        let mut buf = buffer(3);
        fmt::Write::write_fmt(&mut buf, format_args!("{}-{}", 12, "abc")).unwrap();
        assert_eq!(&buf.drain_contiguous()[..], b"12-abc");
    }

    #[test]
    fn test_write_vectored_appends_all() {
        let mut buf = buffer(4);
        let n = buf
            .write_vectored(&[IoSlice::new(b"abc"), IoSlice::new(b"defgh")])
            .unwrap();
        assert_eq!(n, 8);
        assert_eq!(&buf.drain_contiguous()[..], b"abcdefgh");
    }

    #[test]
    fn test_buf_impl() {
        let mut buf = buffer(4);
        buf.append(b"abcdefghij");

        assert_eq!(Buf::remaining(&buf), 10);
        assert_eq!(Buf::chunk(&buf), b"abcd");

        let mut slices = [IoSlice::new(&[]); 8];
        assert_eq!(buf.chunks_vectored(&mut slices), 3);

        Buf::advance(&mut buf, 5);
        assert_eq!(Buf::chunk(&buf), b"fgh");
        assert_eq!(buf.get_u8(), b'f');
        assert_eq!(&buf.copy_to_bytes(4)[..], b"ghij");
        assert!(!buf.has_remaining());
    }

    #[test]
    #[should_panic]
    fn test_buf_advance_past_end() {
        let mut buf = buffer(4);
        buf.append(b"ab");
        Buf::advance(&mut buf, 3);
    }
}

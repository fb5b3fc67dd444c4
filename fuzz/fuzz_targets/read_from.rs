#![no_main]

use std::io::{self, Read};

use libfuzzer_sys::fuzz_target;
use poolbuf::BufferPool;

/// Hands out its input in pieces whose sizes come from the fuzzer.
struct ScriptedReader<'a> {
    data: &'a [u8],
    sizes: &'a [u8],
}

impl Read for ScriptedReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let (&size, rest) = self.sizes.split_first().unwrap_or((&255, &[][..]));
        self.sizes = rest;
        if size == 0 && !self.data.is_empty() {
            return Err(io::ErrorKind::Interrupted.into());
        }
        let n = usize::from(size).min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

fuzz_target!(|input: (u8, Vec<u8>, Vec<u8>)| {
    let (size, sizes, data) = input;
    let pool = BufferPool::new(usize::from(size) + 1).unwrap();
    let mut buf = pool.buffer();

    let mut reader = ScriptedReader {
        data: &data,
        sizes: &sizes,
    };
    let n = buf.read_from(&mut reader).unwrap();
    assert_eq!(n, data.len() as u64);
    assert_eq!(buf.len(), data.len());

    let copy = buf.clone();
    let mut out = Vec::new();
    assert_eq!(buf.write_to(&mut out).unwrap(), n);
    assert_eq!(out, data);
    assert_eq!(copy.len(), data.len());
});

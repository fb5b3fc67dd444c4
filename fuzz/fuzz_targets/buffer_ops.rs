#![no_main]

use std::collections::VecDeque;

use libfuzzer_sys::fuzz_target;
use poolbuf::{BufferPool, ReadOutcome};

// Replays an operation script against a buffer and a plain queue, which must
// always agree.
fuzz_target!(|data: &[u8]| {
    let Some((&size, mut script)) = data.split_first() else {
        return;
    };
    let pool = BufferPool::new(usize::from(size % 64) + 1).unwrap();

    let mut buf = pool.buffer();
    let mut model: VecDeque<u8> = VecDeque::new();
    let mut clone = None;

    while let Some((&op, rest)) = script.split_first() {
        script = rest;
        let arg = usize::from(op >> 3);
        match op & 0b111 {
            // Append the next `arg` script bytes
            0 | 1 => {
                let n = arg.min(script.len());
                buf.append(&script[..n]);
                model.extend(&script[..n]);
                script = &script[n..];
            }
            // Read `arg` bytes
            2 | 3 => {
                let mut dst = vec![0u8; arg];
                let outcome = buf.read_into(&mut dst);
                let n = outcome.len();
                let expected: Vec<u8> = model.drain(..n).collect();
                assert_eq!(&dst[..n], &expected[..]);
                if arg > 0 && n < arg {
                    assert_eq!(outcome, ReadOutcome::EndOfData(n));
                    assert!(model.is_empty());
                }
            }
            // Snapshot, to check that sharing never leaks writes
            4 => clone = Some((buf.clone(), model.clone())),
            5 => {
                if let Some((mut c, m)) = clone.take() {
                    assert_eq!(&c.drain_contiguous()[..], &Vec::from(m)[..]);
                }
            }
            6 => {
                buf.clear();
                model.clear();
            }
            _ => {
                let mut out = Vec::new();
                buf.write_to(&mut out).unwrap();
                assert_eq!(out, model.drain(..).collect::<Vec<_>>());
            }
        }
        assert_eq!(buf.len(), model.len());
    }

    assert_eq!(&buf.drain_contiguous()[..], &model.make_contiguous()[..]);
});

//! The Chunk type - one pooled block plus its unread range.

use std::fmt;
use std::io::{self, Read};
use std::sync::Arc;

use super::Block;

/// A pooled block and the range of it that still holds unread bytes.
///
/// `start..end` is the unread data. `end..capacity` is free space, which is
/// only ever written while the chunk is exclusively owned. Once a buffer is
/// cloned its chunks are shared: the `Arc` strong count is the number of
/// buffers holding the block and `Arc::get_mut` refuses to hand out the
/// memory until it drops back to one.
pub(crate) struct Chunk {
    block: Arc<Block>,
    start: usize,
    end: usize,
}

impl Chunk {
    /// Wraps a freshly acquired block: no data, all capacity free.
    pub(crate) fn new(block: Block) -> Self {
        Self {
            block: Arc::new(block),
            start: 0,
            end: 0,
        }
    }

    /// Returns the unread bytes.
    pub(crate) fn data(&self) -> &[u8] {
        &self.block.as_slice()[self.start..self.end]
    }

    /// Returns the number of unread bytes.
    pub(crate) fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true if no unread bytes remain.
    pub(crate) fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns the size of the underlying block.
    pub(crate) fn capacity(&self) -> usize {
        self.block.capacity()
    }

    /// Returns true if other buffers hold this block too.
    pub(crate) fn is_shared(&self) -> bool {
        Arc::strong_count(&self.block) > 1
    }

    /// Returns true if bytes may be appended: free space left and no other owner.
    pub(crate) fn is_writable(&mut self) -> bool {
        self.end < self.capacity() && Arc::get_mut(&mut self.block).is_some()
    }

    /// Returns the free region, or `None` while the block is shared.
    pub(crate) fn spare_mut(&mut self) -> Option<&mut [u8]> {
        let end = self.end;
        Arc::get_mut(&mut self.block).map(|block| &mut block.as_mut_slice()[end..])
    }

    /// Marks `n` bytes of the free region as written.
    pub(crate) fn commit(&mut self, n: usize) {
        debug_assert!(self.end + n <= self.capacity());
        self.end += n;
    }

    /// Marks `n` unread bytes as consumed.
    pub(crate) fn advance(&mut self, n: usize) {
        debug_assert!(n <= self.len());
        self.start += n;
    }

    /// Copies as much of `src` as fits into the free region.
    pub(crate) fn write_spare(&mut self, src: &[u8]) -> usize {
        let Some(spare) = self.spare_mut() else {
            return 0;
        };
        let n = spare.len().min(src.len());
        spare[..n].copy_from_slice(&src[..n]);
        self.commit(n);
        n
    }

    /// Reads once from `reader` straight into the free region.
    pub(crate) fn fill_from<R: Read + ?Sized>(&mut self, reader: &mut R) -> io::Result<usize> {
        let Some(spare) = self.spare_mut() else {
            return Ok(0);
        };
        let n = reader.read(spare)?;
        self.commit(n);
        Ok(n)
    }

    /// Returns another handle on the same block and unread range.
    pub(crate) fn share(&self) -> Self {
        Self {
            block: Arc::clone(&self.block),
            start: self.start,
            end: self.end,
        }
    }

    /// Gives up this handle, returning the block if it was the last one.
    ///
    /// Exactly one of several racing owners gets the block back.
    pub(crate) fn into_block(self) -> Option<Block> {
        Arc::into_inner(self.block)
    }
}

impl fmt::Debug for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chunk")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("shared", &self.is_shared())
            .finish()
    }
}

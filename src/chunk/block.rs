//! Pool entries and their normalized block form.

use std::fmt;

use bytes::BytesMut;

use crate::error::PoolError;

/// A block of memory as handed out by a [`BlockPool`](crate::BlockPool).
///
/// Pools may recycle whichever representation suits them. Every shape is
/// normalized into a single internal block on acquisition and handed back
/// in its original shape on release.
///
/// Blocks are not zeroed before being returned to the pool.
///
/// # Example
///
/// ```
/// use bytes::BytesMut;
/// use poolbuf::PoolEntry;
///
/// let entry = PoolEntry::from(vec![0u8; 4096]);
/// assert_eq!(entry.capacity(), 4096);
///
/// let entry = PoolEntry::from(BytesMut::with_capacity(512));
/// assert!(entry.capacity() >= 512);
/// ```
pub enum PoolEntry {
    /// A heap vector. Its full capacity is used, not just its length.
    Vec(Vec<u8>),

    /// A boxed slice, used as-is.
    Boxed(Box<[u8]>),

    /// A `BytesMut`. Its full capacity is used, not just its length.
    Bytes(BytesMut),
}

impl PoolEntry {
    /// Returns the number of bytes this entry can hold.
    pub fn capacity(&self) -> usize {
        match self {
            PoolEntry::Vec(v) => v.capacity(),
            PoolEntry::Boxed(b) => b.len(),
            PoolEntry::Bytes(b) => b.capacity(),
        }
    }
}

impl fmt::Debug for PoolEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shape = match self {
            PoolEntry::Vec(_) => "Vec",
            PoolEntry::Boxed(_) => "Boxed",
            PoolEntry::Bytes(_) => "Bytes",
        };
        f.debug_struct("PoolEntry")
            .field("shape", &shape)
            .field("capacity", &self.capacity())
            .finish()
    }
}

impl From<Vec<u8>> for PoolEntry {
    fn from(v: Vec<u8>) -> Self {
        PoolEntry::Vec(v)
    }
}

impl From<Box<[u8]>> for PoolEntry {
    fn from(b: Box<[u8]>) -> Self {
        PoolEntry::Boxed(b)
    }
}

impl From<BytesMut> for PoolEntry {
    fn from(b: BytesMut) -> Self {
        PoolEntry::Bytes(b)
    }
}

/// A normalized pool entry: initialized across its whole capacity.
pub(crate) struct Block {
    entry: PoolEntry,
}

impl Block {
    /// Normalizes a pool entry so that all of its capacity is addressable.
    pub(crate) fn new(entry: PoolEntry) -> Result<Self, PoolError> {
        let entry = match entry {
            PoolEntry::Vec(mut v) => {
                let cap = v.capacity();
                v.resize(cap, 0);
                PoolEntry::Vec(v)
            }
            PoolEntry::Bytes(mut b) => {
                let cap = b.capacity();
                b.resize(cap, 0);
                PoolEntry::Bytes(b)
            }
            boxed @ PoolEntry::Boxed(_) => boxed,
        };

        let block = Self { entry };
        if block.capacity() == 0 {
            return Err(PoolError::EmptyBlock);
        }
        Ok(block)
    }

    pub(crate) fn as_slice(&self) -> &[u8] {
        match &self.entry {
            PoolEntry::Vec(v) => v,
            PoolEntry::Boxed(b) => b,
            PoolEntry::Bytes(b) => b,
        }
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [u8] {
        match &mut self.entry {
            PoolEntry::Vec(v) => v,
            PoolEntry::Boxed(b) => b,
            PoolEntry::Bytes(b) => b,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.as_slice().len()
    }

    /// Returns the entry in the shape the pool handed it out.
    pub(crate) fn into_entry(self) -> PoolEntry {
        self.entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_uses_full_capacity() {
        let block = Block::new(PoolEntry::Vec(Vec::with_capacity(64))).unwrap();
        assert!(block.capacity() >= 64);
        assert!(matches!(block.into_entry(), PoolEntry::Vec(v) if v.len() == v.capacity()));
    }

    #[test]
    fn test_bytes_uses_full_capacity() {
        let block = Block::new(PoolEntry::Bytes(BytesMut::with_capacity(128))).unwrap();
        assert!(block.capacity() >= 128);
        assert!(matches!(block.into_entry(), PoolEntry::Bytes(_)));
    }

    #[test]
    fn test_boxed_kept_as_is() {
        let block = Block::new(PoolEntry::Boxed(vec![7u8; 16].into_boxed_slice())).unwrap();
        assert_eq!(block.as_slice(), &[7u8; 16]);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(matches!(
            Block::new(PoolEntry::Vec(Vec::new())),
            Err(PoolError::EmptyBlock)
        ));
        assert!(matches!(
            Block::new(PoolEntry::Boxed(Vec::new().into_boxed_slice())),
            Err(PoolError::EmptyBlock)
        ));
    }
}

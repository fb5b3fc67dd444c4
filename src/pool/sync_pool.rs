//! Thread-safe free list of blocks with an optional factory.

use std::fmt;

use parking_lot::Mutex;

use crate::chunk::PoolEntry;

use super::BlockPool;

type Factory = Box<dyn Fn() -> PoolEntry + Send + Sync>;

/// A block pool backed by a mutex-guarded free list.
///
/// Released blocks are kept up to `max_idle`; blocks released beyond that
/// are dropped. When the free list is empty, [`get`](BlockPool::get) calls
/// the factory if one is set and returns `None` otherwise.
///
/// # Example
///
/// ```
/// use poolbuf::{BlockPool, PoolEntry, SyncPool};
///
/// let pool = SyncPool::new(16).with_factory(|| PoolEntry::Vec(vec![0; 1024]));
/// let block = pool.get().unwrap();
/// assert_eq!(block.capacity(), 1024);
/// pool.put(block);
/// assert_eq!(pool.idle(), 1);
/// ```
pub struct SyncPool {
    idle: Mutex<Vec<PoolEntry>>,
    max_idle: usize,
    factory: Option<Factory>,
}

impl SyncPool {
    /// Creates an empty pool without a factory.
    pub fn new(max_idle: usize) -> Self {
        Self {
            idle: Mutex::new(Vec::new()),
            max_idle,
            factory: None,
        }
    }

    /// Sets the function used to create blocks when the free list is empty.
    pub fn with_factory<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> PoolEntry + Send + Sync + 'static,
    {
        self.factory = Some(Box::new(factory));
        self
    }

    /// Creates a pool whose factory makes zeroed `Vec` blocks of `block_size` bytes.
    pub fn with_block_size(block_size: usize, max_idle: usize) -> Self {
        Self::new(max_idle).with_factory(move || PoolEntry::Vec(vec![0; block_size]))
    }

    /// Returns the number of blocks waiting for reuse.
    pub fn idle(&self) -> usize {
        self.idle.lock().len()
    }
}

impl BlockPool for SyncPool {
    fn get(&self) -> Option<PoolEntry> {
        if let Some(entry) = self.idle.lock().pop() {
            return Some(entry);
        }
        tracing::trace!("block pool miss");
        self.factory.as_ref().map(|factory| factory())
    }

    fn put(&self, entry: PoolEntry) {
        let mut idle = self.idle.lock();
        if idle.len() < self.max_idle {
            idle.push(entry);
        } else {
            tracing::trace!(capacity = entry.capacity(), "block pool full, dropping block");
        }
    }
}

impl fmt::Debug for SyncPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncPool")
            .field("idle", &self.idle())
            .field("max_idle", &self.max_idle)
            .field("factory", &self.factory.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_without_factory() {
        let pool = SyncPool::new(4);
        assert!(pool.get().is_none());

        pool.put(PoolEntry::Vec(vec![1; 8]));
        assert_eq!(pool.get().map(|e| e.capacity()), Some(8));
        assert!(pool.get().is_none());
    }

    #[test]
    fn test_factory_on_miss() {
        let pool = SyncPool::with_block_size(32, 4);
        let entry = pool.get().unwrap();
        assert_eq!(entry.capacity(), 32);
        assert_eq!(pool.idle(), 0);
    }

    #[test]
    fn test_reuse() {
        let pool = SyncPool::with_block_size(32, 4);
        pool.put(PoolEntry::Boxed(vec![9u8; 16].into_boxed_slice()));

        // The recycled block comes back before the factory is consulted.
        assert!(matches!(pool.get(), Some(PoolEntry::Boxed(b)) if b.len() == 16));
    }

    #[test]
    fn test_max_idle() {
        let pool = SyncPool::new(2);
        for _ in 0..5 {
            pool.put(PoolEntry::Vec(vec![0; 8]));
        }
        assert_eq!(pool.idle(), 2);

        let pool = SyncPool::new(0);
        pool.put(PoolEntry::Vec(vec![0; 8]));
        assert_eq!(pool.idle(), 0);
    }
}

//! Block pools and the pool handle buffers are created from.
//!
//! - [`BlockPool`] - The pooling primitive that hands out and takes back blocks
//! - [`SyncPool`] - Built-in thread-safe [`BlockPool`]
//! - [`BufferPool`] - Cheaply cloneable handle that turns blocks into buffers

mod sync_pool;

pub use sync_pool::SyncPool;

use std::fmt;
use std::sync::Arc;

use crate::buffer::Buffer;
use crate::chunk::{Block, Chunk, PoolEntry};
use crate::config::PoolConfig;
use crate::error::PoolError;

/// A source of reusable memory blocks.
///
/// Implementations must be safe to call from many threads at once: every
/// buffer created from a [`BufferPool`] acquires and releases blocks through
/// the same instance.
///
/// `get` is expected to create a block when it has none to recycle. A pool
/// that returns `None`, or a block without capacity, is misconfigured and
/// makes buffer writes panic.
pub trait BlockPool: Send + Sync {
    /// Hands out a block, creating one if nothing is available for reuse.
    fn get(&self) -> Option<PoolEntry>;

    /// Takes back a block that no buffer references anymore.
    fn put(&self, entry: PoolEntry);
}

impl<P: BlockPool + ?Sized> BlockPool for Arc<P> {
    fn get(&self) -> Option<PoolEntry> {
        (**self).get()
    }

    fn put(&self, entry: PoolEntry) {
        (**self).put(entry)
    }
}

/// A handle on a block pool, used to create [`Buffer`]s.
///
/// Cloning the handle is cheap; all clones and all buffers created from
/// them share the same underlying [`BlockPool`].
///
/// # Example
///
/// ```
/// use std::io::{Read, Write};
/// use poolbuf::BufferPool;
///
/// let pool = BufferPool::new(4096)?;
/// let mut buf = pool.buffer();
///
/// buf.write_all(b"hello world")?;
/// let mut out = String::new();
/// buf.read_to_string(&mut out)?;
/// assert_eq!(out, "hello world");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone)]
pub struct BufferPool {
    inner: Arc<Inner>,
}

struct Inner {
    blocks: Box<dyn BlockPool>,
    config: PoolConfig,
    chunk_size: Option<usize>,
}

impl BufferPool {
    /// Creates a pool of `chunk_size`-byte blocks with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidConfig`] if `chunk_size` is zero.
    pub fn new(chunk_size: usize) -> Result<Self, PoolError> {
        Self::with_config(PoolConfig::new(chunk_size)?)
    }

    /// Creates a pool backed by a [`SyncPool`] built from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidConfig`] if the configuration is invalid.
    pub fn with_config(config: PoolConfig) -> Result<Self, PoolError> {
        config.validate()?;
        let blocks = SyncPool::with_block_size(config.chunk_size(), config.max_idle());
        Ok(Self {
            inner: Arc::new(Inner {
                blocks: Box::new(blocks),
                config,
                chunk_size: Some(config.chunk_size()),
            }),
        })
    }

    /// Creates a handle over an external block pool with default settings.
    ///
    /// Chunk size follows whatever blocks the pool hands out. A pool that
    /// yields no block or an empty one is only detected once a buffer needs
    /// a chunk, and that buffer operation panics.
    ///
    /// # Example
    ///
    /// ```
    /// use poolbuf::{BufferPool, PoolEntry, SyncPool};
    ///
    /// let blocks = SyncPool::new(64).with_factory(|| PoolEntry::Vec(vec![0; 512]));
    /// let pool = BufferPool::from_pool(blocks);
    /// assert_eq!(pool.chunk_size(), None);
    /// ```
    pub fn from_pool<P: BlockPool + 'static>(pool: P) -> Self {
        Self::from_pool_with_config(pool, PoolConfig::default())
    }

    /// Creates a handle over an external block pool.
    ///
    /// Only the buffer settings of `config` apply; `chunk_size` and
    /// `max_idle` are properties of the external pool.
    pub fn from_pool_with_config<P: BlockPool + 'static>(pool: P, config: PoolConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                blocks: Box::new(pool),
                config,
                chunk_size: None,
            }),
        }
    }

    /// Creates an empty buffer drawing its chunks from this pool.
    ///
    /// No memory is taken from the pool until the first write.
    pub fn buffer(&self) -> Buffer {
        Buffer::new(self.clone())
    }

    /// Returns the configuration.
    pub fn config(&self) -> &PoolConfig {
        &self.inner.config
    }

    /// Returns the block size for pools created with [`BufferPool::new`] or
    /// [`BufferPool::with_config`], `None` for external pools.
    pub fn chunk_size(&self) -> Option<usize> {
        self.inner.chunk_size
    }

    /// Takes one block from the pool and wraps it as an empty chunk.
    pub(crate) fn try_acquire(&self) -> Result<Chunk, PoolError> {
        let entry = self.inner.blocks.get().ok_or(PoolError::NoBlock)?;
        Ok(Chunk::new(Block::new(entry)?))
    }

    /// Like [`try_acquire`](Self::try_acquire), treating misconfiguration as fatal.
    pub(crate) fn acquire(&self) -> Chunk {
        match self.try_acquire() {
            Ok(chunk) => chunk,
            Err(e) => {
                tracing::error!(error = %e, "misconfigured block pool");
                panic!("poolbuf: {}", e);
            }
        }
    }

    /// Drops one reference to the chunk's block, returning the block to the
    /// pool if no other buffer holds it.
    pub(crate) fn release(&self, chunk: Chunk) {
        if let Some(block) = chunk.into_block() {
            self.inner.blocks.put(block.into_entry());
        }
    }
}

impl fmt::Debug for BufferPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferPool")
            .field("config", &self.inner.config)
            .field("chunk_size", &self.inner.chunk_size)
            .finish()
    }
}

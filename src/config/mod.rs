//! Configuration for buffer pools.
//!
//! [`PoolConfig`] controls the block size and idle retention of the built-in
//! pool, plus the per-buffer knobs every pool shares.
//!
//! # Example
//!
//! ```
//! use poolbuf::{BufferPool, PoolConfig};
//!
//! // 4 KiB chunks, keep at most 256 idle blocks around
//! let config = PoolConfig::new(4096)?.with_max_idle(256);
//! let pool = BufferPool::with_config(config)?;
//!
//! # Ok::<(), poolbuf::PoolError>(())
//! ```

use crate::error::PoolError;

/// Default chunk size (64 KiB).
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Default number of idle blocks the built-in pool keeps.
pub const DEFAULT_MAX_IDLE: usize = 1024;

/// Default initial capacity of a buffer's chunk list.
pub const DEFAULT_CHUNK_LIST_CAPACITY: usize = 32;

/// Configuration for a [`BufferPool`](crate::BufferPool).
///
/// The chunk size should be within a few orders of magnitude of the expected
/// size of your buffers. Larger chunks hold more memory unused, smaller
/// chunks cost more CPU per byte.
///
/// `chunk_size` and `max_idle` describe the built-in pool only and are
/// ignored by [`BufferPool::from_pool_with_config`](crate::BufferPool::from_pool_with_config).
///
/// # Example
///
/// ```
/// use poolbuf::PoolConfig;
///
/// let config = PoolConfig::default()
///     .with_chunk_size(16 * 1024)
///     .with_vectored_writes(false);
/// assert!(config.validate().is_ok());
/// assert!(!config.vectored_writes());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolConfig {
    chunk_size: usize,
    max_idle: usize,
    chunk_list_capacity: usize,
    vectored_writes: bool,
}

impl PoolConfig {
    /// Creates a new configuration with the given chunk size.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidConfig`] if `chunk_size` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use poolbuf::PoolConfig;
    ///
    /// let config = PoolConfig::new(1024)?;
    /// assert_eq!(config.chunk_size(), 1024);
    /// assert!(PoolConfig::new(0).is_err());
    /// # Ok::<(), poolbuf::PoolError>(())
    /// ```
    pub fn new(chunk_size: usize) -> Result<Self, PoolError> {
        let config = Self {
            chunk_size,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Sets the chunk size.
    ///
    /// Note: This does not validate the configuration. Use
    /// [`PoolConfig::validate`] to check it.
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size;
        self
    }

    /// Sets how many released blocks the built-in pool keeps for reuse.
    ///
    /// Blocks released while the pool already holds this many are dropped.
    /// Zero disables retention entirely.
    pub fn with_max_idle(mut self, max_idle: usize) -> Self {
        self.max_idle = max_idle;
        self
    }

    /// Sets the initial capacity of each buffer's chunk list.
    pub fn with_chunk_list_capacity(mut self, capacity: usize) -> Self {
        self.chunk_list_capacity = capacity;
        self
    }

    /// Enables or disables vectored writes when draining buffers.
    pub fn with_vectored_writes(mut self, enabled: bool) -> Self {
        self.vectored_writes = enabled;
        self
    }

    /// Returns the chunk size.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Returns the idle block limit of the built-in pool.
    pub fn max_idle(&self) -> usize {
        self.max_idle
    }

    /// Returns the initial chunk list capacity.
    pub fn chunk_list_capacity(&self) -> usize {
        self.chunk_list_capacity
    }

    /// Returns whether `write_to` tries vectored writes first.
    pub fn vectored_writes(&self) -> bool {
        self.vectored_writes
    }

    /// Validates the current configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use poolbuf::PoolConfig;
    ///
    /// let config = PoolConfig::default().with_chunk_size(0);
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), PoolError> {
        if self.chunk_size == 0 {
            return Err(PoolError::InvalidConfig {
                message: "chunk_size must be non-zero",
            });
        }
        Ok(())
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_idle: DEFAULT_MAX_IDLE,
            chunk_list_capacity: DEFAULT_CHUNK_LIST_CAPACITY,
            vectored_writes: true,
        }
    }
}

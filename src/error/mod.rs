//! Error types for poolbuf.

use std::fmt;
use std::io;

/// Errors raised while configuring a pool or acquiring blocks from it.
///
/// [`PoolError::NoBlock`] and [`PoolError::EmptyBlock`] point at a
/// misconfigured [`BlockPool`](crate::BlockPool). The buffer's append and
/// ingest paths cannot report them and panic instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// Invalid configuration parameter.
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },

    /// The block pool returned nothing, most likely because it has no
    /// factory to create blocks when its free list is empty.
    NoBlock,

    /// The block pool returned a block without any usable capacity.
    EmptyBlock,
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolError::InvalidConfig { message } => write!(f, "invalid config: {}", message),
            PoolError::NoBlock => write!(
                f,
                "block pool returned no block: does it have a factory for empty free lists?"
            ),
            PoolError::EmptyBlock => write!(f, "block pool returned a zero-capacity block"),
        }
    }
}

impl std::error::Error for PoolError {}

/// An upstream I/O failure that ended a bulk transfer.
///
/// Returned by [`Buffer::read_from`](crate::Buffer::read_from) and
/// [`Buffer::write_to`](crate::Buffer::write_to). It carries the number of
/// bytes moved before the failure next to the untouched error from the
/// source or sink.
#[derive(Debug)]
pub struct TransferError {
    transferred: u64,
    source: io::Error,
}

impl TransferError {
    pub(crate) fn new(transferred: u64, source: io::Error) -> Self {
        tracing::debug!(transferred, error = %source, "transfer stopped on upstream error");
        Self {
            transferred,
            source,
        }
    }

    /// Bytes moved before the failure.
    pub fn transferred(&self) -> u64 {
        self.transferred
    }

    /// The kind of the upstream error.
    pub fn kind(&self) -> io::ErrorKind {
        self.source.kind()
    }

    /// Returns a reference to the upstream error.
    pub fn io_error(&self) -> &io::Error {
        &self.source
    }

    /// Consumes the error, returning the upstream error as it was reported.
    pub fn into_inner(self) -> io::Error {
        self.source
    }
}

impl fmt::Display for TransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "io error after {} bytes: {}",
            self.transferred, self.source
        )
    }
}

impl std::error::Error for TransferError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

impl From<TransferError> for io::Error {
    fn from(e: TransferError) -> Self {
        e.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_error_keeps_source() {
        let err = TransferError::new(42, io::Error::new(io::ErrorKind::BrokenPipe, "gone"));
        assert_eq!(err.transferred(), 42);
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);

        let io_err: io::Error = err.into();
        assert_eq!(io_err.kind(), io::ErrorKind::BrokenPipe);
        assert_eq!(io_err.to_string(), "gone");
    }

    #[test]
    fn test_display() {
        let err = TransferError::new(7, io::Error::other("boom"));
        assert!(err.to_string().contains("after 7 bytes"));

        let err = PoolError::InvalidConfig {
            message: "chunk_size must be non-zero",
        };
        assert!(err.to_string().contains("invalid config"));
        assert!(PoolError::NoBlock.to_string().contains("factory"));
    }
}

//! Async I/O support for buffers.
//!
//! This module uses the `futures-io` traits, making it runtime-agnostic and
//! compatible with tokio (through `tokio_util::compat`), async-std, smol and
//! other async runtimes.
//!
//! - `AsyncRead`, `AsyncBufRead` and `AsyncWrite` for [`Buffer`](crate::Buffer)
//! - [`Buffer::read_from_async`](crate::Buffer::read_from_async) and
//!   [`Buffer::write_to_async`](crate::Buffer::write_to_async)
//!
//! This module requires the `async-io` feature to be enabled.

mod transfer;

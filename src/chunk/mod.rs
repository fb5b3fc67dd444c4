//! Chunk types.
//!
//! - [`PoolEntry`] - A block in whatever shape the pool hands out
//! - `Block` - A pool entry normalized for use as chunk memory
//! - `Chunk` - A shared block plus its unread byte range

mod block;
mod data;

pub use block::PoolEntry;

pub(crate) use block::Block;
pub(crate) use data::Chunk;

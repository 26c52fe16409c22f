//! # Document Storage
//!
//! Persistence adapters for content trees, keyed by an opaque string (a page path such as
//! `/pricing`, or a stringified form id). Saves replace the whole document; concurrent
//! saves to one key are last-write-wins.
//!
//! - [`MemoryStore`]: process-local map, for tests and ephemeral servers
//! - [`FileStore`]: one JSON file per key in a directory

mod error;
mod file;
mod memory;
mod store;

pub use error::{StorageError, StorageResult};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use store::{normalize_key, DocumentStore};

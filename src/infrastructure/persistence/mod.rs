//! Snapshot store implementations.
//!
//! - [`JsonFileStore`] - JSON document on disk with atomic replace
//! - [`MemoryStore`] - In-process store for tests

mod json_file_store;
mod memory_store;

pub use json_file_store::JsonFileStore;
pub use memory_store::MemoryStore;

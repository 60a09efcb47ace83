//! Repository trait definitions for the domain layer.
//!
//! The service persists one document, so there is a single repository:
//! [`SnapshotStore`]. Implementations live in `crate::infrastructure::persistence`;
//! a `mockall` mock is generated for unit tests.

pub mod snapshot_store;

pub use snapshot_store::{SnapshotStore, StoreError};

#[cfg(test)]
pub use snapshot_store::MockSnapshotStore;

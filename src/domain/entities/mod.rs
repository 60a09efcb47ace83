//! Core domain entities representing the persisted data model.
//!
//! # Entity Types
//!
//! - [`LinkRecord`] - A shortened URL mapping with its click counter
//! - [`UserAccount`] - A registered user
//! - [`Snapshot`] - Both tables of the backing document, loaded as one value
//!
//! Entities serialize with the field names of the on-disk document
//! (`links_table`, `users_table`), so existing data files stay readable.

pub mod link;
pub mod snapshot;
pub mod user;

pub use link::LinkRecord;
pub use snapshot::Snapshot;
pub use user::UserAccount;

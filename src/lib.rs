//! # linknest
//!
//! A small URL shortener with user accounts, built with Axum and backed by a
//! single JSON document on disk.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Records, the snapshot and the store contract
//! - **Application Layer** ([`application`]) - Link, account and session services
//! - **Infrastructure Layer** ([`infrastructure`]) - JSON file and in-memory stores
//! - **API Layer** ([`api`]) - Redirect and health endpoints
//! - **Web Layer** ([`web`]) - HTML pages and cookie sessions
//!
//! ## Behaviour
//!
//! - Five-character random slugs, unique across the store
//! - Submitting an already shortened URL returns the existing slug
//! - Every redirect increments the link's click counter
//! - Each request is one load-mutate-save cycle; see
//!   [`domain::access_gate`] for the optional serialized mode
//!
//! ## Quick Start
//!
//! ```bash
//! export SESSION_SIGNING_SECRET="change-me"
//! export DATA_FILE="db.json"   # Optional
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;
pub mod web;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{AccountService, LinkService, SessionService};
    pub use crate::domain::access_gate::{AccessPolicy, CycleGate};
    pub use crate::domain::entities::{LinkRecord, Snapshot, UserAccount};
    pub use crate::domain::repositories::{SnapshotStore, StoreError};
    pub use crate::error::AppError;
    pub use crate::infrastructure::persistence::{JsonFileStore, MemoryStore};
    pub use crate::state::AppState;
}

//! Domain layer containing business entities and storage contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Link records, user accounts and the document snapshot
//! - [`repositories`] - The [`repositories::SnapshotStore`] trait and its errors
//! - [`access_gate`] - Optional serialization of load-mutate-save cycles
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - The store trait defines the contract implemented by the infrastructure layer
//! - Business logic lives in services (see [`crate::application::services`])

pub mod access_gate;
pub mod entities;
pub mod repositories;

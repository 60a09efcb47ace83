//! Machine-facing HTTP endpoints: the short-code redirect and the health check.
//!
//! # Modules
//!
//! - [`dto`] - JSON response bodies
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request tracing

pub mod dto;
pub mod handlers;
pub mod middleware;

//! Browser-facing layer.
//!
//! Server-rendered HTML pages built with Askama templates.
//!
//! # Modules
//!
//! - [`forms`] - Form bodies and their validation
//! - [`handlers`] - Template rendering handlers
//! - [`middleware`] - Cookie session resolution
//! - [`routes`] - Page route configuration

pub mod forms;
pub mod handlers;
pub mod middleware;
pub mod routes;

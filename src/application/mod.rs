//! Application layer services implementing business logic.
//!
//! Services run the load-mutate-save cycles against the snapshot store and
//! give handlers a typed API.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short link registration and resolution
//! - [`services::account_service::AccountService`] - User registration and login
//! - [`services::session_service::SessionService`] - Signed session cookies

pub mod services;

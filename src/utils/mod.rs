//! Utility functions for code generation, URL processing, and request handling.
//!
//! - [`code_generator`] - Slug allocation and record id generation
//! - [`url_normalizer`] - Default-scheme normalization of submitted URLs
//! - [`password`] - Argon2id password hashing
//! - [`extract_host`] - Host header parsing and short URL construction

pub mod code_generator;
pub mod extract_host;
pub mod password;
pub mod url_normalizer;

//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//! A `.env` file in the working directory is honoured (see `main.rs`).
//!
//! ```bash
//! export DATA_FILE="db.json"
//! export SESSION_SIGNING_SECRET="change-me"
//! export PUBLIC_BASE_URL="https://sho.rt"
//! ```
//!
//! ## Required Variables
//!
//! - `SESSION_SIGNING_SECRET` - HMAC key for session cookies
//!
//! ## Optional Variables
//!
//! - `DATA_FILE` - Path of the JSON data file (default: `db.json`)
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `PUBLIC_BASE_URL` - Prefix for displayed short URLs (default: request `Host`)
//! - `STORE_ACCESS` - `unsynchronized` or `serialized` (default: `unsynchronized`)
//! - `VERIFY_WRITES` - Re-read the data file after each save (default: `false`);
//!   assumes `STORE_ACCESS=serialized`
//! - `SESSION_TTL_SECONDS` - Session lifetime (default: 86400)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

use crate::domain::access_gate::AccessPolicy;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_file: PathBuf,
    pub listen_addr: String,
    /// Base used for displayed short URLs. When `None` the request `Host`
    /// header is used.
    pub public_base_url: Option<String>,
    pub store_access: AccessPolicy,
    /// Re-read and compare the document after every save.
    pub verify_writes: bool,
    /// HMAC key for session tokens. Loaded from `SESSION_SIGNING_SECRET`.
    /// Must be non-empty.
    pub session_signing_secret: String,
    pub session_ttl_seconds: i64,
    pub log_level: String,
    pub log_format: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `SESSION_SIGNING_SECRET` is missing or a value
    /// cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let data_file = env::var("DATA_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("db.json"));

        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let public_base_url = env::var("PUBLIC_BASE_URL")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let store_access = match env::var("STORE_ACCESS") {
            Ok(v) => v
                .parse()
                .map_err(anyhow::Error::msg)
                .context("Invalid STORE_ACCESS")?,
            Err(_) => AccessPolicy::default(),
        };

        let verify_writes = env::var("VERIFY_WRITES")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        let session_signing_secret =
            env::var("SESSION_SIGNING_SECRET").context("SESSION_SIGNING_SECRET must be set")?;

        let session_ttl_seconds = match env::var("SESSION_TTL_SECONDS") {
            Ok(v) => v
                .parse()
                .with_context(|| format!("SESSION_TTL_SECONDS must be an integer, got '{v}'"))?,
            Err(_) => 86_400,
        };

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        Ok(Self {
            data_file,
            listen_addr,
            public_base_url,
            store_access,
            verify_writes,
            session_signing_secret,
            session_ttl_seconds,
            log_level,
            log_format,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - `data_file` is empty
    /// - `public_base_url` is not an http(s) URL
    /// - the session secret is empty or the TTL is not positive
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.data_file.as_os_str().is_empty() {
            anyhow::bail!("DATA_FILE must not be empty");
        }

        if let Some(ref base) = self.public_base_url
            && !base.starts_with("http://")
            && !base.starts_with("https://")
        {
            anyhow::bail!(
                "PUBLIC_BASE_URL must start with 'http://' or 'https://', got '{}'",
                base
            );
        }

        if self.session_signing_secret.is_empty() {
            anyhow::bail!("SESSION_SIGNING_SECRET must not be empty");
        }

        if self.session_ttl_seconds <= 0 {
            anyhow::bail!(
                "SESSION_TTL_SECONDS must be greater than 0, got {}",
                self.session_ttl_seconds
            );
        }

        Ok(())
    }

    /// Settings that are valid but likely to misbehave.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.verify_writes && self.store_access == AccessPolicy::Unsynchronized {
            warnings.push(
                "VERIFY_WRITES without STORE_ACCESS=serialized: a concurrent save between \
                 write and re-read fails a request whose own save succeeded"
                    .to_string(),
            );
        }

        warnings
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Data file: {}", self.data_file.display());
        tracing::info!(
            "  Public base URL: {}",
            self.public_base_url.as_deref().unwrap_or("(from Host header)")
        );
        tracing::info!("  Store access: {}", self.store_access.as_str());
        tracing::info!("  Verify writes: {}", self.verify_writes);
        tracing::info!(
            "  Session secret: {}",
            mask_secret(&self.session_signing_secret)
        );
        tracing::info!("  Session TTL: {}s", self.session_ttl_seconds);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);

        for warning in self.warnings() {
            tracing::warn!("{}", warning);
        }
    }
}

/// Masks a secret for logging, keeping only its length visible.
fn mask_secret(secret: &str) -> String {
    if secret.is_empty() {
        "(empty)".to_string()
    } else {
        format!("*** ({} chars)", secret.chars().count())
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

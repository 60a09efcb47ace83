//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored mapping from a short slug to the original URL.
///
/// Field names match the on-disk `links_table` layout. `expires_at` and
/// `password_hash` are carried for compatibility and always written as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub id: String,
    pub original_url: String,
    pub short_slug: String,
    #[serde(default)]
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub click_count: u64,
    #[serde(default)]
    pub password_hash: Option<String>,
}

impl LinkRecord {
    /// Creates a fresh record with zero clicks, stamped with the current time.
    pub fn new(
        id: String,
        original_url: String,
        short_slug: String,
        created_by: Option<String>,
    ) -> Self {
        Self {
            id,
            original_url,
            short_slug,
            created_by,
            created_at: Utc::now(),
            expires_at: None,
            click_count: 0,
            password_hash: None,
        }
    }

    /// Counts one successful resolution.
    pub fn record_click(&mut self) {
        self.click_count = self.click_count.saturating_add(1);
    }
}

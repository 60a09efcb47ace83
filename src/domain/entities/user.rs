//! User account entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user.
///
/// `hashed_password` holds an Argon2 PHC string; the plain password is never
/// stored.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: String,
    pub username: String,
    pub hashed_password: String,
    pub created_at: DateTime<Utc>,
}

impl UserAccount {
    pub fn new(id: String, username: String, hashed_password: String) -> Self {
        Self {
            id,
            username,
            hashed_password,
            created_at: Utc::now(),
        }
    }
}

impl std::fmt::Debug for UserAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserAccount")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("hashed_password", &"***")
            .field("created_at", &self.created_at)
            .finish()
    }
}

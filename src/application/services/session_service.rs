//! Signed session tokens.

use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Issues and verifies stateless session tokens.
///
/// A token has the form `{user_id}.{issued_at}.{mac}` where `issued_at` is a
/// Unix timestamp in seconds and `mac` is the hex-encoded HMAC-SHA256 of
/// `{user_id}.{issued_at}` keyed by the server secret. Nothing is stored
/// server-side; tokens expire after `ttl_seconds`.
#[derive(Clone)]
pub struct SessionService {
    signing_secret: String,
    ttl_seconds: i64,
}

impl SessionService {
    /// Creates a new session service.
    ///
    /// # Arguments
    ///
    /// - `signing_secret` - HMAC key; changing it invalidates every session
    /// - `ttl_seconds` - maximum token age
    pub fn new(signing_secret: String, ttl_seconds: i64) -> Self {
        Self {
            signing_secret,
            ttl_seconds,
        }
    }

    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(self.signing_secret.as_bytes())
            .expect("HMAC accepts any key length")
    }

    fn sign(&self, payload: &str) -> String {
        let mut mac = self.mac();
        mac.update(payload.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Issues a token for `user_id`, valid from now.
    pub fn issue(&self, user_id: &str) -> String {
        self.issue_at(user_id, Utc::now().timestamp())
    }

    fn issue_at(&self, user_id: &str, issued_at: i64) -> String {
        let payload = format!("{user_id}.{issued_at}");
        let signature = self.sign(&payload);
        format!("{payload}.{signature}")
    }

    /// Returns the user id carried by `token` if it is authentic and fresh.
    ///
    /// The MAC is compared in constant time.
    pub fn verify(&self, token: &str) -> Option<String> {
        self.verify_at(token, Utc::now().timestamp())
    }

    fn verify_at(&self, token: &str, now: i64) -> Option<String> {
        let (payload, signature) = token.rsplit_once('.')?;
        let (user_id, issued_at) = payload.rsplit_once('.')?;

        if user_id.is_empty() {
            return None;
        }

        let issued_at: i64 = issued_at.parse().ok()?;
        let age = now.checked_sub(issued_at)?;
        if !(0..=self.ttl_seconds).contains(&age) {
            return None;
        }

        let signature = hex::decode(signature).ok()?;
        let mut mac = self.mac();
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature).ok()?;

        Some(user_id.to_string())
    }
}

impl std::fmt::Debug for SessionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionService")
            .field("signing_secret", &"***")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

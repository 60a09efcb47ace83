//! Password hashing with Argon2id.
//!
//! Parameters are fixed (19 MiB memory, 2 passes, 1 lane) so that every stored
//! hash carries the same work factor. Hashes are PHC strings and embed their
//! salt and parameters.
//!
//! Data files written before the switch to Argon2 hold bcrypt hashes
//! (`$2a$`, `$2b$`, `$2y$`). Those still verify; new hashes are always Argon2id.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

const MEMORY_KIB: u32 = 19 * 1024;
const ITERATIONS: u32 = 2;
const LANES: u32 = 1;

/// Prefix shared by every bcrypt hash variant.
const BCRYPT_PREFIX: &str = "$2";

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("Password hash error: {0}")]
    Hash(String),

    /// The stored value is not a PHC hash string.
    #[error("Stored password hash is malformed: {0}")]
    MalformedHash(String),
}

fn hasher() -> Result<Argon2<'static>, PasswordError> {
    let params = Params::new(MEMORY_KIB, ITERATIONS, LANES, None)
        .map_err(|e| PasswordError::Hash(e.to_string()))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hashes `password` with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    hasher()?
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::Hash(e.to_string()))
}

/// Checks `password` against a stored Argon2 PHC or legacy bcrypt hash.
///
/// Returns `Ok(false)` on mismatch and an error only when `hash` cannot be
/// parsed.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    if hash.starts_with(BCRYPT_PREFIX) {
        return bcrypt::verify(password, hash)
            .map_err(|e| PasswordError::MalformedHash(e.to_string()));
    }

    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| PasswordError::MalformedHash(e.to_string()))?;

    Ok(hasher()?
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

//! Short slug and record id generation.
//!
//! Identifiers are drawn from a 64-symbol URL-safe alphabet using OS entropy.
//! Each random byte is masked to its low six bits, which maps the 256 byte
//! values evenly onto the alphabet.

use std::collections::HashSet;

/// URL-safe alphabet used for slugs and ids.
pub const ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Length of a regular short slug.
pub const SLUG_LENGTH: usize = 5;

/// Length of the slug used once regular attempts are exhausted.
pub const FALLBACK_SLUG_LENGTH: usize = 12;

/// Length of generated record ids.
pub const ID_LENGTH: usize = 21;

/// Regular attempts before switching to [`FALLBACK_SLUG_LENGTH`].
pub const MAX_ATTEMPTS: usize = 10;

/// Route names that a slug must never shadow.
pub const RESERVED_CODES: &[&str] = &[
    "login",
    "register",
    "dashboard",
    "notfound",
    "logout",
    "health",
    "static",
];

/// Produces a random identifier of the requested length.
pub type Generator = Box<dyn Fn(usize) -> String + Send + Sync>;

/// Generates a random identifier over [`ALPHABET`].
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
///
/// # Examples
///
/// ```ignore
/// let code = random_identifier(5);
/// assert_eq!(code.len(), 5);
/// ```
pub fn random_identifier(len: usize) -> String {
    let mut buffer = vec![0u8; len];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    buffer
        .iter()
        .map(|b| ALPHABET[(b & 63) as usize] as char)
        .collect()
}

/// Generates a unique-enough id for a new record.
pub fn generate_id() -> String {
    random_identifier(ID_LENGTH)
}

/// Returns `true` if `code` is one of [`RESERVED_CODES`].
pub fn is_reserved(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}

/// Picks slugs that are not yet in use.
pub struct SlugAllocator {
    generator: Generator,
}

impl SlugAllocator {
    /// Creates an allocator backed by OS entropy.
    pub fn new() -> Self {
        Self::with_generator(Box::new(random_identifier))
    }

    /// Creates an allocator with a custom generator.
    pub fn with_generator(generator: Generator) -> Self {
        Self { generator }
    }

    /// Returns a slug absent from `existing`.
    ///
    /// Tries [`MAX_ATTEMPTS`] slugs of [`SLUG_LENGTH`]; if all of them collide,
    /// switches to [`FALLBACK_SLUG_LENGTH`] until a free one is found.
    pub fn allocate(&self, existing: &HashSet<&str>) -> String {
        for _ in 0..MAX_ATTEMPTS {
            let slug = (self.generator)(SLUG_LENGTH);
            if Self::is_free(&slug, existing) {
                return slug;
            }
        }

        tracing::warn!(
            attempts = MAX_ATTEMPTS,
            taken = existing.len(),
            "Slug space crowded, falling back to long slugs"
        );

        loop {
            let slug = (self.generator)(FALLBACK_SLUG_LENGTH);
            if Self::is_free(&slug, existing) {
                return slug;
            }
        }
    }

    fn is_free(slug: &str, existing: &HashSet<&str>) -> bool {
        !existing.contains(slug) && !is_reserved(slug)
    }
}

impl Default for SlugAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SlugAllocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlugAllocator").finish_non_exhaustive()
    }
}

//! # BLAKE3 Hashing
//!
//! One-shot hashing, streaming hashing and key derivation. The derive-key
//! mode is what the record store builds its addresses on.

use blake3::Hasher;

/// BLAKE3 hash output (256-bit).
pub type Hash = [u8; 32];

/// Stateful BLAKE3 hasher.
///
/// Either a plain hasher or one in derive-key mode, bound to a context string.
pub struct Blake3Hasher {
    inner: Hasher,
}

impl Blake3Hasher {
    /// Create new hasher.
    pub fn new() -> Self {
        Self {
            inner: Hasher::new(),
        }
    }

    /// Create a hasher in derive-key mode.
    ///
    /// `context` should be a hardcoded, globally unique string. Two hashers
    /// with different contexts never produce related outputs.
    pub fn new_derive_key(context: &str) -> Self {
        Self {
            inner: Hasher::new_derive_key(context),
        }
    }

    /// Update with data.
    pub fn update(&mut self, data: &[u8]) -> &mut Self {
        self.inner.update(data);
        self
    }

    /// Finalize and return hash.
    pub fn finalize(&self) -> Hash {
        *self.inner.finalize().as_bytes()
    }
}

impl Default for Blake3Hasher {
    fn default() -> Self {
        Self::new()
    }
}

/// Hash data with BLAKE3 (one-shot).
pub fn blake3_hash(data: &[u8]) -> Hash {
    *blake3::hash(data).as_bytes()
}

/// Derive 32 bytes from a context string and a sequence of input parts.
///
/// Parts are fed in order with no separators; callers are responsible for
/// making the concatenation unambiguous.
pub fn blake3_derive_key(context: &str, parts: &[&[u8]]) -> Hash {
    let mut hasher = Blake3Hasher::new_derive_key(context);
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize()
}

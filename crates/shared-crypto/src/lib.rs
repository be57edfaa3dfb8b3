//! # Shared Crypto
//!
//! Cryptographic primitives shared by the Memory Index crates.
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | BLAKE3 | Namespace ids, record address derivation |
//! | `signatures` | Ed25519 | Record authority (signer capability) |
//!
//! ## Security Properties
//!
//! - **BLAKE3 derive_key**: context strings give hard domain separation
//!   between address derivation and any other use of the same input bytes
//! - **Ed25519**: deterministic nonces; verification uses `verify_strict`
//!   so malleable signatures and small-order keys are rejected

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod hashing;
pub mod signatures;

// Re-exports
pub use errors::CryptoError;
pub use hashing::{blake3_derive_key, blake3_hash, Blake3Hasher, Hash};
pub use signatures::{Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

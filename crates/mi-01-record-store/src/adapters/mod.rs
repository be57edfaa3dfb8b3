//! # Adapters Module
//!
//! Implementations of the outbound ports.
//!
//! ## Modules
//!
//! - `storage`: In-memory and file-backed `KeyValueStore`
//! - `serializer`: bincode `RecordSerializer`
//! - `infra`: CRC32 checksums, system and manual clocks
//! - `signer`: Ed25519 `RecordSigner`

pub mod infra;
pub mod serializer;
pub mod signer;
pub mod storage;

pub use infra::{DefaultChecksumProvider, ManualTimeSource, SystemTimeSource};
pub use serializer::BincodeRecordSerializer;
pub use signer::Ed25519RecordSigner;
pub use storage::{FileBackedKVStore, InMemoryKVStore};

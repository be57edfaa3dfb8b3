//! # Record Store (mi-01)
//!
//! The Record Store is the persistence layer of the Memory Index. It keeps
//! one immutable record per address: a CID, its tags, the authority that
//! wrote it and the time the store accepted it.
//!
//! ## Addressing
//!
//! Addresses are authority-keyed. For a deployment namespace `ns`:
//!
//! ```text
//! namespace_id = BLAKE3(ns)
//! address      = BLAKE3-derive_key(ADDRESS_CONTEXT,
//!                    namespace_id || "memory" || authority[32] || cid)
//! ```
//!
//! Each authority therefore holds at most one record per CID, and the
//! address of a record can be recomputed by anyone who knows both.
//!
//! ## Domain Invariants
//!
//! | Invariant | Description |
//! |-----------|-------------|
//! | Bounded CID | `cid` is at most 100 bytes |
//! | Bounded tags | At most 20 tags, each at most 50 bytes |
//! | Validate first | Rejected writes never touch storage |
//! | Authenticated writes | Every write carries a valid Ed25519 signature of its authority |
//! | No overwrite | A second write to an occupied address fails with `AlreadyExists` |
//! | Store-assigned time | `timestamp` comes from the store's time source |
//! | Data integrity | Checksum and address are re-verified on every read |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Entities, address derivation, validation, errors, config
//! - `ports/` - Inbound API (`RecordStoreApi`) and outbound SPI (storage, time, signer)
//! - `adapters/` - In-memory and file-backed storage, bincode, CRC32, Ed25519 signer
//! - `service.rs` - `RecordStoreService`, the application service
//!
//! ## Usage
//!
//! ```ignore
//! use mi_01_record_store::{Ed25519RecordSigner, RecordStoreApi, RecordStoreService, StoreConfig};
//!
//! let store = RecordStoreService::new_in_memory(StoreConfig::default());
//! let signer = Ed25519RecordSigner::generate();
//!
//! let address = store.store_memory(&signer, "bafy...".into(), vec!["rust".into()])?;
//! let record = store.get(&address)?;
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

#[cfg(test)]
mod test_utils;

// Re-export key types for convenience
pub use adapters::{
    BincodeRecordSerializer, DefaultChecksumProvider, Ed25519RecordSigner, FileBackedKVStore,
    InMemoryKVStore, ManualTimeSource, SystemTimeSource,
};
pub use domain::address::{AddressDeriver, ADDRESS_CONTEXT, ADDRESS_SEED_PREFIX};
pub use domain::entities::{
    Address, Authority, AuthorizedWrite, MemoryRecord, StoredRecord, Timestamp, WriteOperation,
};
pub use domain::errors::{KVStoreError, MemoryError, SerializationError};
pub use domain::validation::{validate_write, MAX_CID_LEN, MAX_TAGS, MAX_TAG_LEN};
pub use domain::value_objects::{KeyPrefix, StoreConfig};
pub use ports::inbound::RecordStoreApi;
pub use ports::outbound::{
    ChecksumProvider, KeyValueStore, RecordSerializer, RecordSigner, ScanResult, TimeSource,
};
pub use service::{
    DynRecordStore, FileRecordStore, InMemoryRecordStore, RecordStoreDependencies,
    RecordStoreService,
};

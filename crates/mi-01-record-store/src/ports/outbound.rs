//! # Outbound Ports (Driven Ports)
//!
//! Dependencies the Record Store requires from its host.

use crate::domain::entities::{Authority, AuthorizedWrite, StoredRecord, Timestamp, WriteOperation};
use crate::domain::errors::{KVStoreError, SerializationError};
use std::sync::Arc;

/// Result of a prefix scan: `(key, value)` pairs in ascending key order.
pub type ScanResult = Vec<(Vec<u8>, Vec<u8>)>;

/// Abstract interface for the durable key-value substrate.
///
/// Every method is atomic on its own. There is no delete or overwrite.
///
/// Production: `FileBackedKVStore`
/// Testing: `InMemoryKVStore`
pub trait KeyValueStore: Send + Sync {
    /// Get a value by key.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError>;

    /// Insert `value` under `key` unless the key is already present.
    ///
    /// Returns `Ok(false)` and leaves the existing value untouched if the key
    /// exists. The check and the insert are one atomic step.
    fn insert_if_absent(&self, key: &[u8], value: &[u8]) -> Result<bool, KVStoreError>;

    /// Check if a key exists.
    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        Ok(self.get(key)?.is_some())
    }

    /// All pairs whose key starts with `prefix`, from one consistent view.
    fn prefix_scan(&self, prefix: &[u8]) -> Result<ScanResult, KVStoreError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        (**self).get(key)
    }

    fn insert_if_absent(&self, key: &[u8], value: &[u8]) -> Result<bool, KVStoreError> {
        (**self).insert_if_absent(key, value)
    }

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        (**self).exists(key)
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<ScanResult, KVStoreError> {
        (**self).prefix_scan(prefix)
    }
}

/// Abstract interface for checksum computation.
pub trait ChecksumProvider: Send + Sync {
    /// Compute CRC32 checksum of data.
    fn compute_crc32(&self, data: &[u8]) -> u32;

    /// Verify CRC32 checksum matches.
    fn verify_crc32(&self, data: &[u8], expected: u32) -> bool {
        self.compute_crc32(data) == expected
    }
}

/// Abstract interface for time operations (for testability).
pub trait TimeSource: Send + Sync {
    /// Current time in seconds since epoch.
    fn now(&self) -> Timestamp;
}

impl<T: TimeSource + ?Sized> TimeSource for Arc<T> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

/// Abstract interface for record serialization.
pub trait RecordSerializer: Send + Sync {
    /// Serialize a StoredRecord to bytes.
    fn serialize(&self, record: &StoredRecord) -> Result<Vec<u8>, SerializationError>;

    /// Deserialize bytes to a StoredRecord.
    fn deserialize(&self, data: &[u8]) -> Result<StoredRecord, SerializationError>;
}

/// Signer capability: supplies an identity and authorizes writes.
///
/// Passed explicitly into the write path; the store never sees key material.
pub trait RecordSigner: Send + Sync {
    /// Identity records written through this signer are bound to.
    fn authority(&self) -> Authority;

    /// Authorize `operation` on behalf of [`RecordSigner::authority`].
    fn sign(&self, operation: WriteOperation) -> AuthorizedWrite;
}

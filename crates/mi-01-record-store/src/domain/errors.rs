//! # Domain Errors
//!
//! Error types for the Record Store.
//!
//! - Validation errors are raised before any storage interaction
//! - `NotFound` is only produced by direct lookups
//! - Backend failures surface as `StorageUnavailable`, never as `NotFound`

use crate::domain::entities::{Address, Authority};
use thiserror::Error;

/// Errors returned by the Record Store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoryError {
    /// CID exceeds the maximum length.
    #[error("CID is too long: {len} bytes, maximum {max}")]
    CidTooLong { len: usize, max: usize },

    /// More tags than a record may carry.
    #[error("Too many tags: {count}, maximum {max}")]
    TooManyTags { count: usize, max: usize },

    /// A tag exceeds the maximum length.
    #[error("Tag {index} is too long: {len} bytes, maximum {max}")]
    TagTooLong { index: usize, len: usize, max: usize },

    /// A record already occupies the derived address.
    #[error("Record already exists at {address}")]
    AlreadyExists { address: Address },

    /// No record at this address.
    #[error("Record not found at {address}")]
    NotFound { address: Address },

    /// The authorized write does not verify against its authority.
    #[error("Invalid write signature for authority {authority}")]
    InvalidSignature { authority: Authority },

    /// The backing store could not be reached or failed an I/O operation.
    #[error("Storage unavailable: {message}")]
    StorageUnavailable { message: String },

    /// Stored bytes failed checksum or address verification.
    #[error("Data corruption: {message}")]
    DataCorruption { message: String },

    /// Serialization/deserialization error.
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl MemoryError {
    /// True for the size-limit errors a caller fixes by resubmitting.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            MemoryError::CidTooLong { .. }
                | MemoryError::TooManyTags { .. }
                | MemoryError::TagTooLong { .. }
        )
    }
}

/// Key-value store errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KVStoreError {
    /// I/O error during read/write.
    #[error("KV store I/O error: {message}")]
    IOError { message: String },

    /// Data corruption in the store.
    #[error("KV store corruption: {message}")]
    CorruptionError { message: String },
}

impl From<KVStoreError> for MemoryError {
    fn from(err: KVStoreError) -> Self {
        match err {
            KVStoreError::IOError { message } => MemoryError::StorageUnavailable { message },
            KVStoreError::CorruptionError { message } => MemoryError::DataCorruption { message },
        }
    }
}

impl From<std::io::Error> for KVStoreError {
    fn from(err: std::io::Error) -> Self {
        KVStoreError::IOError {
            message: err.to_string(),
        }
    }
}

/// Serialization errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Serialization error: {message}")]
pub struct SerializationError {
    pub message: String,
}

impl From<SerializationError> for MemoryError {
    fn from(err: SerializationError) -> Self {
        MemoryError::Serialization {
            message: err.message,
        }
    }
}

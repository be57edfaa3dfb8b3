//! # Value Objects
//!
//! Store configuration and the key layout used on the backing store.

use crate::domain::entities::Address;
use std::env;
use std::path::PathBuf;

/// Namespace used when none is configured.
pub const DEFAULT_NAMESPACE: &str = "memory-index";

/// Configuration for the record store.
///
/// The namespace is part of every address. Two stores with different
/// namespaces never agree on an address, so it must stay fixed for the
/// lifetime of a deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Deployment namespace mixed into address derivation.
    pub namespace: String,

    /// Log file for the file-backed store. `None` keeps records in memory.
    pub data_path: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            data_path: None,
        }
    }
}

impl StoreConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create configuration from environment variables.
    ///
    /// - `MI_NAMESPACE`: Address namespace (default: memory-index)
    /// - `MI_DATA_PATH`: Record log path (default: unset, in-memory)
    pub fn from_env() -> Self {
        Self {
            namespace: env::var("MI_NAMESPACE")
                .ok()
                .filter(|ns| !ns.is_empty())
                .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string()),
            data_path: env::var_os("MI_DATA_PATH")
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
        }
    }

    /// Set the address namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Persist records to the log file at `path`.
    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = Some(path.into());
        self
    }
}

/// Key prefixes for the key-value store.
pub struct KeyPrefix;

impl KeyPrefix {
    /// Prefix of every record key.
    pub const RECORD: &'static [u8] = b"m:";

    /// `m:{address}` -> serialized `StoredRecord`
    pub fn record_key(address: &Address) -> Vec<u8> {
        let mut key = Vec::with_capacity(Self::RECORD.len() + 32);
        key.extend_from_slice(Self::RECORD);
        key.extend_from_slice(address.as_bytes());
        key
    }

    /// Recover the address from a record key.
    pub fn parse_record_key(key: &[u8]) -> Option<Address> {
        let bytes: [u8; 32] = key.strip_prefix(Self::RECORD)?.try_into().ok()?;
        Some(Address::from_bytes(bytes))
    }
}

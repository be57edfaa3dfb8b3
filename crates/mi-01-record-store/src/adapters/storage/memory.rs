use crate::domain::errors::KVStoreError;
use crate::ports::outbound::{KeyValueStore, ScanResult};
use parking_lot::RwLock;
use std::collections::BTreeMap;

/// In-memory key-value store.
///
/// A `BTreeMap` behind a `RwLock`: scans come back in key order and see a
/// single consistent view.
#[derive(Default)]
pub struct InMemoryKVStore {
    data: RwLock<BTreeMap<Vec<u8>, Vec<u8>>>,
}

impl InMemoryKVStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }
}

impl KeyValueStore for InMemoryKVStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        Ok(self.data.read().get(key).cloned())
    }

    fn insert_if_absent(&self, key: &[u8], value: &[u8]) -> Result<bool, KVStoreError> {
        let mut data = self.data.write();
        if data.contains_key(key) {
            return Ok(false);
        }
        data.insert(key.to_vec(), value.to_vec());
        Ok(true)
    }

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        Ok(self.data.read().contains_key(key))
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<ScanResult, KVStoreError> {
        Ok(scan_prefix(&self.data.read(), prefix))
    }
}

/// Collect the entries of `data` whose key starts with `prefix`.
pub(super) fn scan_prefix(data: &BTreeMap<Vec<u8>, Vec<u8>>, prefix: &[u8]) -> ScanResult {
    data.range(prefix.to_vec()..)
        .take_while(|(k, _)| k.starts_with(prefix))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

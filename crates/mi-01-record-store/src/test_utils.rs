use crate::adapters::{
    BincodeRecordSerializer, DefaultChecksumProvider, Ed25519RecordSigner, InMemoryKVStore,
    ManualTimeSource,
};
use crate::domain::errors::KVStoreError;
use crate::domain::value_objects::StoreConfig;
use crate::ports::outbound::{KeyValueStore, ScanResult};
use crate::service::{RecordStoreDependencies, RecordStoreService};
use parking_lot::Mutex;
use std::sync::Arc;

pub const T0: i64 = 1_700_000_000;

/// Held by tests that read or write `MI_*` environment variables.
pub static ENV_LOCK: Mutex<()> = parking_lot::const_mutex(());

pub type TestStore = RecordStoreService<
    InMemoryKVStore,
    Arc<ManualTimeSource>,
    DefaultChecksumProvider,
    BincodeRecordSerializer,
>;

pub fn tags(list: &[&str]) -> Vec<String> {
    list.iter().map(|t| t.to_string()).collect()
}

pub fn signer(seed: u8) -> Ed25519RecordSigner {
    Ed25519RecordSigner::from_seed([seed; 32])
}

/// In-memory store with a manual clock starting at `T0`.
pub fn make_test_store() -> (TestStore, Arc<ManualTimeSource>) {
    let clock = Arc::new(ManualTimeSource::new(T0));
    let deps = RecordStoreDependencies {
        kv_store: InMemoryKVStore::new(),
        time_source: Arc::clone(&clock),
        checksum: DefaultChecksumProvider,
        serializer: BincodeRecordSerializer,
    };
    (RecordStoreService::new(deps, StoreConfig::default()), clock)
}

/// Backend that fails every operation with an I/O error.
pub struct UnavailableKVStore;

impl UnavailableKVStore {
    fn down() -> KVStoreError {
        KVStoreError::IOError {
            message: "connection refused".to_string(),
        }
    }
}

impl KeyValueStore for UnavailableKVStore {
    fn get(&self, _key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        Err(Self::down())
    }

    fn insert_if_absent(&self, _key: &[u8], _value: &[u8]) -> Result<bool, KVStoreError> {
        Err(Self::down())
    }

    fn prefix_scan(&self, _prefix: &[u8]) -> Result<ScanResult, KVStoreError> {
        Err(Self::down())
    }
}

//! # Record Store Service
//!
//! The application service implementing `RecordStoreApi`.
//!
//! ## Write path
//!
//! 1. Validate size limits
//! 2. Verify the authority's signature over the operation
//! 3. Derive the address
//! 4. Stamp the time, seal the checksum, serialize
//! 5. Atomic insert-if-absent; an occupied slot is `AlreadyExists`
//!
//! Steps 1-4 are pure, so a rejected write never reaches storage.

use crate::adapters::{
    BincodeRecordSerializer, DefaultChecksumProvider, FileBackedKVStore, InMemoryKVStore,
    SystemTimeSource,
};
use crate::domain::address::AddressDeriver;
use crate::domain::entities::{
    Address, Authority, AuthorizedWrite, MemoryRecord, StoredRecord, WriteOperation,
};
use crate::domain::errors::MemoryError;
use crate::domain::validation::validate_write;
use crate::domain::value_objects::{KeyPrefix, StoreConfig};
use crate::ports::inbound::RecordStoreApi;
use crate::ports::outbound::{
    ChecksumProvider, KeyValueStore, RecordSerializer, RecordSigner, TimeSource,
};
use mi_telemetry::log_record_event;
use shared_crypto::Ed25519Signature;
use std::path::Path;
use tracing::{debug, error, warn};

const COMPONENT: &str = "record-store";

/// Outbound dependencies of the service.
pub struct RecordStoreDependencies<KV, TS, CS, RS> {
    /// Durable key-value substrate.
    pub kv_store: KV,
    /// Source of record timestamps.
    pub time_source: TS,
    /// Checksum provider for data integrity.
    pub checksum: CS,
    /// Record serializer.
    pub serializer: RS,
}

/// The Record Store Service.
pub struct RecordStoreService<KV, TS, CS, RS>
where
    KV: KeyValueStore,
    TS: TimeSource,
    CS: ChecksumProvider,
    RS: RecordSerializer,
{
    kv_store: KV,
    time_source: TS,
    checksum: CS,
    serializer: RS,
    deriver: AddressDeriver,
    config: StoreConfig,
}

/// Store over the in-memory adapter.
pub type InMemoryRecordStore = RecordStoreService<
    InMemoryKVStore,
    SystemTimeSource,
    DefaultChecksumProvider,
    BincodeRecordSerializer,
>;

/// Store over the file-backed record log.
pub type FileRecordStore = RecordStoreService<
    FileBackedKVStore,
    SystemTimeSource,
    DefaultChecksumProvider,
    BincodeRecordSerializer,
>;

/// Store whose backend is chosen at runtime from `StoreConfig`.
pub type DynRecordStore = RecordStoreService<
    Box<dyn KeyValueStore>,
    SystemTimeSource,
    DefaultChecksumProvider,
    BincodeRecordSerializer,
>;

impl<KV, TS, CS, RS> RecordStoreService<KV, TS, CS, RS>
where
    KV: KeyValueStore,
    TS: TimeSource,
    CS: ChecksumProvider,
    RS: RecordSerializer,
{
    /// Create a new Record Store Service with the given dependencies.
    pub fn new(deps: RecordStoreDependencies<KV, TS, CS, RS>, config: StoreConfig) -> Self {
        let deriver = AddressDeriver::new(&config.namespace);
        Self {
            kv_store: deps.kv_store,
            time_source: deps.time_source,
            checksum: deps.checksum,
            serializer: deps.serializer,
            deriver,
            config,
        }
    }

    /// Configuration the store was opened with.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The backing key-value store.
    pub fn kv_store(&self) -> &KV {
        &self.kv_store
    }

    fn verify_authorization(
        &self,
        operation: &WriteOperation,
        authority: &Authority,
        signature: &Ed25519Signature,
    ) -> Result<(), MemoryError> {
        authority
            .to_public_key()
            .and_then(|key| key.verify(&operation.signing_bytes(), signature))
            .map_err(|e| {
                warn!(component = COMPONENT, %authority, reason = %e, "Write rejected: bad signature");
                MemoryError::InvalidSignature {
                    authority: *authority,
                }
            })
    }

    /// Decode and verify the value stored under `address`.
    fn decode(&self, address: Address, bytes: &[u8]) -> Result<MemoryRecord, MemoryError> {
        let stored = self.serializer.deserialize(bytes).map_err(|e| {
            error!(component = COMPONENT, %address, error = %e, "Undecodable record");
            MemoryError::DataCorruption {
                message: format!("record {address}: {e}"),
            }
        })?;

        if !self.checksum.verify_crc32(&stored.checksum_input(), stored.checksum) {
            error!(component = COMPONENT, %address, "Record checksum mismatch");
            return Err(MemoryError::DataCorruption {
                message: format!("record {address}: checksum mismatch"),
            });
        }

        let expected = self.deriver.derive(&stored.authority, &stored.cid);
        if expected != address {
            error!(component = COMPONENT, %address, %expected, "Record stored under foreign address");
            return Err(MemoryError::DataCorruption {
                message: format!("record {address}: derives to {expected}"),
            });
        }

        Ok(stored.into_record(address))
    }
}

impl InMemoryRecordStore {
    /// Create a service over a fresh in-memory store.
    pub fn new_in_memory(config: StoreConfig) -> Self {
        Self::new(
            RecordStoreDependencies {
                kv_store: InMemoryKVStore::new(),
                time_source: SystemTimeSource,
                checksum: DefaultChecksumProvider,
                serializer: BincodeRecordSerializer,
            },
            config,
        )
    }
}

impl FileRecordStore {
    /// Open (or create) the record log at `path`.
    pub fn open_file_backed(
        path: impl AsRef<Path>,
        config: StoreConfig,
    ) -> Result<Self, MemoryError> {
        let kv_store = FileBackedKVStore::open(path)?;
        Ok(Self::new(
            RecordStoreDependencies {
                kv_store,
                time_source: SystemTimeSource,
                checksum: DefaultChecksumProvider,
                serializer: BincodeRecordSerializer,
            },
            config,
        ))
    }
}

impl DynRecordStore {
    /// Open the store described by `MI_NAMESPACE` and `MI_DATA_PATH`.
    pub fn from_env() -> Result<Self, MemoryError> {
        Self::open(StoreConfig::from_env())
    }

    /// File-backed when `config.data_path` is set, in-memory otherwise.
    pub fn open(config: StoreConfig) -> Result<Self, MemoryError> {
        let kv_store: Box<dyn KeyValueStore> = match &config.data_path {
            Some(path) => Box::new(FileBackedKVStore::open(path)?),
            None => Box::new(InMemoryKVStore::new()),
        };
        Ok(Self::new(
            RecordStoreDependencies {
                kv_store,
                time_source: SystemTimeSource,
                checksum: DefaultChecksumProvider,
                serializer: BincodeRecordSerializer,
            },
            config,
        ))
    }
}

impl<KV, TS, CS, RS> RecordStoreApi for RecordStoreService<KV, TS, CS, RS>
where
    KV: KeyValueStore,
    TS: TimeSource,
    CS: ChecksumProvider,
    RS: RecordSerializer,
{
    fn put(&self, write: AuthorizedWrite) -> Result<Address, MemoryError> {
        let AuthorizedWrite {
            operation,
            authority,
            signature,
        } = write;

        if let Err(err) = validate_write(&operation.cid, &operation.tags) {
            warn!(component = COMPONENT, %authority, error = %err, "Write rejected: validation");
            return Err(err);
        }
        self.verify_authorization(&operation, &authority, &signature)?;

        let address = self.deriver.derive(&authority, &operation.cid);
        let timestamp = self.time_source.now();
        let tag_count = operation.tags.len();

        let mut stored = StoredRecord::new(operation.cid, operation.tags, authority, timestamp);
        stored.checksum = self.checksum.compute_crc32(&stored.checksum_input());
        let bytes = self.serializer.serialize(&stored)?;

        let inserted = self
            .kv_store
            .insert_if_absent(&KeyPrefix::record_key(&address), &bytes)
            .map_err(|e| {
                log_record_event!(error, COMPONENT, "Write failed: storage error", address, error = %e);
                MemoryError::from(e)
            })?;

        if !inserted {
            log_record_event!(warn, COMPONENT, "Write rejected: address occupied", address);
            return Err(MemoryError::AlreadyExists { address });
        }

        log_record_event!(
            info,
            COMPONENT,
            "Memory stored",
            address,
            %authority,
            tag_count,
            timestamp
        );
        Ok(address)
    }

    fn store_memory(
        &self,
        signer: &dyn RecordSigner,
        cid: String,
        tags: Vec<String>,
    ) -> Result<Address, MemoryError> {
        validate_write(&cid, &tags)?;
        let write = signer.sign(WriteOperation::new(cid, tags));
        self.put(write)
    }

    fn get(&self, address: &Address) -> Result<MemoryRecord, MemoryError> {
        let bytes = self
            .kv_store
            .get(&KeyPrefix::record_key(address))?
            .ok_or(MemoryError::NotFound { address: *address })?;

        debug!(component = COMPONENT, %address, "Record read");
        self.decode(*address, &bytes)
    }

    fn get_by_cid(&self, authority: &Authority, cid: &str) -> Result<MemoryRecord, MemoryError> {
        self.get(&self.deriver.derive(authority, cid))
    }

    fn contains(&self, address: &Address) -> Result<bool, MemoryError> {
        Ok(self.kv_store.exists(&KeyPrefix::record_key(address))?)
    }

    fn derive_address(&self, authority: &Authority, cid: &str) -> Address {
        self.deriver.derive(authority, cid)
    }

    fn list_all(&self) -> Result<Vec<MemoryRecord>, MemoryError> {
        let entries = self.kv_store.prefix_scan(KeyPrefix::RECORD)?;

        let records = entries
            .into_iter()
            .map(|(key, value)| {
                let address =
                    KeyPrefix::parse_record_key(&key).ok_or_else(|| MemoryError::DataCorruption {
                        message: format!("malformed record key {}", hex::encode(&key)),
                    })?;
                self.decode(address, &value)
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(component = COMPONENT, count = records.len(), "Enumerated records");
        Ok(records)
    }
}

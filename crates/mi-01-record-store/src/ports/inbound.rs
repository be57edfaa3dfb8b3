//! # Inbound Ports (Driving Ports)
//!
//! The primary API of the Record Store.

use crate::domain::entities::{Address, Authority, AuthorizedWrite, MemoryRecord};
use crate::domain::errors::MemoryError;
use crate::ports::outbound::RecordSigner;

/// Primary API of the Record Store.
///
/// Implementations must enforce every write invariant before touching
/// storage and must never overwrite an occupied address.
pub trait RecordStoreApi: Send + Sync {
    /// Persist an authorized write.
    ///
    /// ## Errors
    ///
    /// - `CidTooLong` / `TooManyTags` / `TagTooLong`: size limits
    /// - `InvalidSignature`: signature does not verify for `write.authority`
    /// - `AlreadyExists`: the derived address is occupied
    /// - `StorageUnavailable`: backend failure
    fn put(&self, write: AuthorizedWrite) -> Result<Address, MemoryError>;

    /// Validate, authorize through `signer`, and persist a memory.
    ///
    /// Invalid input is rejected before the signer is asked to sign.
    fn store_memory(
        &self,
        signer: &dyn RecordSigner,
        cid: String,
        tags: Vec<String>,
    ) -> Result<Address, MemoryError>;

    /// Read the record at `address`.
    ///
    /// ## Errors
    ///
    /// - `NotFound`: the slot is empty
    /// - `DataCorruption`: checksum or address mismatch
    /// - `StorageUnavailable`: backend failure
    fn get(&self, address: &Address) -> Result<MemoryRecord, MemoryError>;

    /// Read the record `authority` stored for `cid`.
    fn get_by_cid(&self, authority: &Authority, cid: &str) -> Result<MemoryRecord, MemoryError>;

    /// Whether a record occupies `address`.
    fn contains(&self, address: &Address) -> Result<bool, MemoryError>;

    /// Address a write by `authority` for `cid` would occupy.
    fn derive_address(&self, authority: &Authority, cid: &str) -> Address;

    /// Every stored record, ordered by address.
    fn list_all(&self) -> Result<Vec<MemoryRecord>, MemoryError>;
}

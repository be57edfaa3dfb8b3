//! # Outbound Ports (Driven Ports)

use mi_01_record_store::{MemoryError, MemoryRecord};
use std::sync::Arc;

/// Full enumeration of stored records.
///
/// Production: `RecordStoreService` (see `adapters`)
pub trait RecordSource: Send + Sync {
    /// Every stored record, read from one consistent view of the store.
    fn snapshot(&self) -> Result<Vec<MemoryRecord>, MemoryError>;
}

impl<T: RecordSource + ?Sized> RecordSource for Arc<T> {
    fn snapshot(&self) -> Result<Vec<MemoryRecord>, MemoryError> {
        (**self).snapshot()
    }
}

//! Reads records straight from a `RecordStoreService`.

use crate::ports::outbound::RecordSource;
use mi_01_record_store::{
    ChecksumProvider, KeyValueStore, MemoryError, MemoryRecord, RecordSerializer, RecordStoreApi,
    RecordStoreService, TimeSource,
};

impl<KV, TS, CS, RS> RecordSource for RecordStoreService<KV, TS, CS, RS>
where
    KV: KeyValueStore,
    TS: TimeSource,
    CS: ChecksumProvider,
    RS: RecordSerializer,
{
    fn snapshot(&self) -> Result<Vec<MemoryRecord>, MemoryError> {
        self.list_all()
    }
}

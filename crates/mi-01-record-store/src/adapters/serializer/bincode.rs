use crate::domain::entities::StoredRecord;
use crate::domain::errors::SerializationError;
use crate::ports::outbound::RecordSerializer;

/// Default record serializer using bincode.
#[derive(Default, Clone, Copy)]
pub struct BincodeRecordSerializer;

impl RecordSerializer for BincodeRecordSerializer {
    fn serialize(&self, record: &StoredRecord) -> Result<Vec<u8>, SerializationError> {
        bincode::serialize(record).map_err(|e| SerializationError {
            message: e.to_string(),
        })
    }

    fn deserialize(&self, data: &[u8]) -> Result<StoredRecord, SerializationError> {
        bincode::deserialize(data).map_err(|e| SerializationError {
            message: e.to_string(),
        })
    }
}

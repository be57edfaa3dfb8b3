//! # Query Errors
//!
//! A query that matches nothing is `Ok(vec![])`. Errors only come from
//! reading the record set.

use mi_01_record_store::MemoryError;
use thiserror::Error;

/// Errors returned by the Query Engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The record source failed to enumerate records.
    #[error("Record enumeration failed: {0}")]
    Source(#[from] MemoryError),
}

impl QueryError {
    /// True when the backing store could not be reached.
    pub fn is_storage_unavailable(&self) -> bool {
        matches!(
            self,
            QueryError::Source(MemoryError::StorageUnavailable { .. })
        )
    }
}

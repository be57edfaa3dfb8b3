//! # Inbound Ports (Driving Ports)
//!
//! The search API of the Query Engine.

use crate::domain::errors::QueryError;
use crate::domain::filter::RecordFilter;
use mi_01_record_store::{Authority, MemoryRecord, Timestamp};

/// Read-only search over stored memories.
///
/// Each call reads the record set once. Results are ordered by address.
/// A query that matches nothing returns `Ok(vec![])`.
pub trait MemoryQueryApi: Send + Sync {
    /// Records accepted by `filter`.
    fn query(&self, filter: &RecordFilter) -> Result<Vec<MemoryRecord>, QueryError>;

    /// Records whose tags contain `tag`.
    fn by_tag(&self, tag: &str) -> Result<Vec<MemoryRecord>, QueryError>;

    /// Records carrying every tag in `tags`. An empty slice matches all.
    fn by_tags(&self, tags: &[&str]) -> Result<Vec<MemoryRecord>, QueryError>;

    /// Records written by `authority`.
    fn by_authority(&self, authority: &Authority) -> Result<Vec<MemoryRecord>, QueryError>;

    /// Records with `start <= timestamp <= end`.
    fn by_time_range(
        &self,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<MemoryRecord>, QueryError>;

    /// Every record.
    fn all(&self) -> Result<Vec<MemoryRecord>, QueryError>;

    /// Number of records, from the same view `all` would return.
    fn count(&self) -> Result<usize, QueryError>;
}

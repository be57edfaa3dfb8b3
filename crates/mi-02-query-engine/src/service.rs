//! # Memory Query Service
//!
//! Implements `MemoryQueryApi` as a linear scan: take one snapshot from the
//! record source, keep what the filter accepts, order by address.

use crate::domain::errors::QueryError;
use crate::domain::filter::RecordFilter;
use crate::ports::inbound::MemoryQueryApi;
use crate::ports::outbound::RecordSource;
use mi_01_record_store::{Authority, MemoryRecord, Timestamp};
use mi_telemetry::component_span;
use tracing::{debug, error};

const COMPONENT: &str = "query-engine";

/// The Memory Query Service.
pub struct MemoryQueryService<S: RecordSource> {
    source: S,
}

impl<S: RecordSource> MemoryQueryService<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// The record source queries read from.
    pub fn source(&self) -> &S {
        &self.source
    }

    fn snapshot(&self) -> Result<Vec<MemoryRecord>, QueryError> {
        self.source.snapshot().map_err(|e| {
            error!(component = COMPONENT, error = %e, "Record enumeration failed");
            QueryError::from(e)
        })
    }
}

impl<S: RecordSource> MemoryQueryApi for MemoryQueryService<S> {
    fn query(&self, filter: &RecordFilter) -> Result<Vec<MemoryRecord>, QueryError> {
        let _span = component_span!("query", component = COMPONENT).entered();

        if filter.is_unsatisfiable() {
            debug!(component = COMPONENT, ?filter, "Unsatisfiable filter, skipping scan");
            return Ok(Vec::new());
        }

        let records = self.snapshot()?;
        let scanned = records.len();

        let mut matched: Vec<MemoryRecord> =
            records.into_iter().filter(|r| filter.matches(r)).collect();
        matched.sort_by(|a, b| a.address.cmp(&b.address));

        debug!(
            component = COMPONENT,
            ?filter,
            scanned,
            matched = matched.len(),
            "Query complete"
        );
        Ok(matched)
    }

    fn by_tag(&self, tag: &str) -> Result<Vec<MemoryRecord>, QueryError> {
        self.query(&RecordFilter::Tag(tag.to_string()))
    }

    fn by_tags(&self, tags: &[&str]) -> Result<Vec<MemoryRecord>, QueryError> {
        self.query(&RecordFilter::all_tags(tags.iter().copied()))
    }

    fn by_authority(&self, authority: &Authority) -> Result<Vec<MemoryRecord>, QueryError> {
        self.query(&RecordFilter::Authority(*authority))
    }

    fn by_time_range(
        &self,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<MemoryRecord>, QueryError> {
        self.query(&RecordFilter::TimeRange { start, end })
    }

    fn all(&self) -> Result<Vec<MemoryRecord>, QueryError> {
        self.query(&RecordFilter::any())
    }

    fn count(&self) -> Result<usize, QueryError> {
        Ok(self.all()?.len())
    }
}

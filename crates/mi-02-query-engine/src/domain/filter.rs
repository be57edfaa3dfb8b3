//! # Record Filters
//!
//! Predicates evaluated against one record at a time. Matching is exact:
//! no case folding, trimming or other normalization of tags.

use mi_01_record_store::{Authority, MemoryRecord, Timestamp};

/// A predicate over memory records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordFilter {
    /// Record carries this tag.
    Tag(String),

    /// Record carries every listed tag. An empty list matches all records.
    AllTags(Vec<String>),

    /// Record was written by this authority.
    Authority(Authority),

    /// `start <= timestamp <= end`. Matches nothing when `start > end`.
    TimeRange { start: Timestamp, end: Timestamp },

    /// Every inner filter matches. An empty list matches all records.
    And(Vec<RecordFilter>),
}

impl RecordFilter {
    /// Filter accepting every record.
    pub fn any() -> Self {
        RecordFilter::AllTags(Vec::new())
    }

    /// AND over `tags`, with duplicates removed.
    pub fn all_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tags: Vec<String> = tags.into_iter().map(Into::into).collect();
        tags.sort_unstable();
        tags.dedup();
        RecordFilter::AllTags(tags)
    }

    /// Combine with `other`; nested `And`s are flattened.
    pub fn and(self, other: RecordFilter) -> Self {
        let mut parts = match self {
            RecordFilter::And(parts) => parts,
            single => vec![single],
        };
        match other {
            RecordFilter::And(more) => parts.extend(more),
            single => parts.push(single),
        }
        RecordFilter::And(parts)
    }

    /// Whether `record` satisfies this filter.
    pub fn matches(&self, record: &MemoryRecord) -> bool {
        match self {
            RecordFilter::Tag(tag) => record.has_tag(tag),
            RecordFilter::AllTags(tags) => tags.iter().all(|tag| record.has_tag(tag)),
            RecordFilter::Authority(authority) => record.authority == *authority,
            RecordFilter::TimeRange { start, end } => {
                *start <= record.timestamp && record.timestamp <= *end
            }
            RecordFilter::And(parts) => parts.iter().all(|part| part.matches(record)),
        }
    }

    /// True if no record can match, so a scan can be skipped.
    pub fn is_unsatisfiable(&self) -> bool {
        match self {
            RecordFilter::TimeRange { start, end } => start > end,
            RecordFilter::And(parts) => parts.iter().any(RecordFilter::is_unsatisfiable),
            _ => false,
        }
    }
}

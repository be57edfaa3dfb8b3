//! # Adapters Module
//!
//! - `store_source`: `RecordSource` backed by the Record Store

pub mod store_source;

//! # Query Engine (mi-02)
//!
//! Read-only search over the records held by the Record Store.
//!
//! Every query reads the full record set once through the `RecordSource`
//! port and keeps the records a `RecordFilter` accepts. There is no
//! secondary index: cost is linear in the number of stored records.
//!
//! ## Query Semantics
//!
//! | Query | Matches |
//! |-------|---------|
//! | `by_tag(t)` | records whose tags contain `t` (exact, case-sensitive) |
//! | `by_tags(ts)` | records carrying every tag in `ts`; empty `ts` matches all |
//! | `by_authority(a)` | records written by `a` |
//! | `by_time_range(s, e)` | `s <= timestamp <= e`; empty when `s > e` |
//! | `all()` | every record |
//! | `count()` | `all().len()` |
//!
//! Results are ordered by address.
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - `RecordFilter` and `QueryError`
//! - `ports/` - Inbound API (`MemoryQueryApi`) and outbound SPI (`RecordSource`)
//! - `adapters/` - `RecordSource` over a `RecordStoreService`
//! - `service.rs` - `MemoryQueryService`
//!
//! ## Usage
//!
//! ```ignore
//! use mi_02_query_engine::{MemoryQueryApi, MemoryQueryService};
//! use std::sync::Arc;
//!
//! let store = Arc::new(RecordStoreService::new_in_memory(StoreConfig::default()));
//! let queries = MemoryQueryService::new(Arc::clone(&store));
//!
//! let rust_notes = queries.by_tags(&["rust", "notes"])?;
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use domain::errors::QueryError;
pub use domain::filter::RecordFilter;
pub use ports::inbound::MemoryQueryApi;
pub use ports::outbound::RecordSource;
pub use service::MemoryQueryService;

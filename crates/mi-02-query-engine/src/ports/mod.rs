//! # Ports Layer
//!
//! - `inbound`: `MemoryQueryApi`, the search API
//! - `outbound`: `RecordSource`, where records are read from

pub mod inbound;
pub mod outbound;

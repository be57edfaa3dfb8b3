//! # Ports
//!
//! - `inbound` - The API this crate offers (`RecordStoreApi`)
//! - `outbound` - What the host supplies: storage, time, encoding, signing

pub mod inbound;
pub mod outbound;

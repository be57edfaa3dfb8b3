//! # Domain Layer
//!
//! Pure domain logic for the Record Store. No I/O happens here.
//!
//! ## Modules
//!
//! - `entities` - Records, addresses, authorities, write operations
//! - `address` - Deterministic address derivation
//! - `validation` - Write-time size limits
//! - `value_objects` - Store configuration and key layout
//! - `errors` - Domain error types

pub mod address;
pub mod entities;
pub mod errors;
pub mod validation;
pub mod value_objects;

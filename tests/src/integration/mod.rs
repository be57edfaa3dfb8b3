//! # Integration Tests
//!
//! - `flows`: write through the store, read back through the query engine
//! - `persistence`: file-backed log across reopen and corruption
//! - `concurrency`: racing writers and readers over a shared store

pub mod concurrency;
pub mod flows;
pub mod persistence;

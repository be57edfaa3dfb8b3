//! # Domain Layer
//!
//! Query predicates and errors.

pub mod errors;
pub mod filter;

//! # Address Derivation
//!
//! Records live at an address computed from `(namespace, authority, cid)`.
//! The byte layout below is the compatibility surface of a deployment: any
//! change to it orphans every existing record.
//!
//! ```text
//! namespace_id = BLAKE3(namespace utf8)
//! address      = BLAKE3-derive_key(
//!                    ADDRESS_CONTEXT,
//!                    namespace_id[32] || ADDRESS_SEED_PREFIX || authority[32] || cid utf8)
//! ```
//!
//! `authority` is fixed width and `cid` is last, so no length prefixes are needed.

use crate::domain::entities::{Address, Authority};
use shared_crypto::{blake3_derive_key, blake3_hash, Hash};

/// BLAKE3 derive-key context for record addresses.
pub const ADDRESS_CONTEXT: &str = "memory-index 2025-01-01 record address v1";

/// Seed prefix shared by every record address.
pub const ADDRESS_SEED_PREFIX: &[u8] = b"memory";

/// Derives record addresses for one namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressDeriver {
    namespace_id: Hash,
}

impl AddressDeriver {
    /// Create a deriver for `namespace`.
    pub fn new(namespace: &str) -> Self {
        Self {
            namespace_id: blake3_hash(namespace.as_bytes()),
        }
    }

    /// Hash of the namespace string.
    pub fn namespace_id(&self) -> &Hash {
        &self.namespace_id
    }

    /// Address of the record `authority` writes for `cid`.
    pub fn derive(&self, authority: &Authority, cid: &str) -> Address {
        Address::from_bytes(blake3_derive_key(
            ADDRESS_CONTEXT,
            &[
                &self.namespace_id,
                ADDRESS_SEED_PREFIX,
                authority.as_bytes(),
                cid.as_bytes(),
            ],
        ))
    }
}

//! # Domain Entities
//!
//! - `Address` / `Authority` - 32-byte identifiers, rendered as hex
//! - `MemoryRecord` - A record as returned to callers (address attached)
//! - `StoredRecord` - The persisted form of a record (address is the key)
//! - `WriteOperation` / `AuthorizedWrite` - A write before and after signing

use serde::{Deserialize, Serialize};
use shared_crypto::{CryptoError, Ed25519PublicKey, Ed25519Signature};
use std::fmt;
use std::str::FromStr;

/// Seconds since the unix epoch, as assigned by the store.
pub type Timestamp = i64;

/// Domain tag prepended to the bytes a signer authorizes.
const WRITE_SIGNING_DOMAIN: &[u8] = b"memory-index/store-memory/v1";

macro_rules! hex_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name([u8; 32]);

        impl $name {
            /// Wrap raw bytes.
            pub const fn from_bytes(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }

            /// Raw bytes.
            pub fn as_bytes(&self) -> &[u8; 32] {
                &self.0
            }

            /// Lowercase hex encoding (64 chars).
            pub fn to_hex(&self) -> String {
                hex::encode(self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({}..)", stringify!($name), &self.to_hex()[..8])
            }
        }

        impl FromStr for $name {
            type Err = hex::FromHexError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let mut bytes = [0u8; 32];
                hex::decode_to_slice(s, &mut bytes)?;
                Ok(Self(bytes))
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }
    };
}

hex_id! {
    /// Storage key of a record, derived from its addressing inputs.
    Address
}

hex_id! {
    /// Identity of the party that wrote a record: an Ed25519 public key.
    Authority
}

impl Authority {
    /// Interpret the authority as an Ed25519 verifying key.
    pub fn to_public_key(&self) -> Result<Ed25519PublicKey, CryptoError> {
        Ed25519PublicKey::from_bytes(self.0)
    }
}

impl From<Ed25519PublicKey> for Authority {
    fn from(key: Ed25519PublicKey) -> Self {
        Self(*key.as_bytes())
    }
}

/// A memory record as seen by readers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryRecord {
    /// Storage key; not part of the persisted value.
    pub address: Address,
    /// Content identifier of the off-store payload.
    pub cid: String,
    /// Labels in write order.
    pub tags: Vec<String>,
    /// Writer identity.
    pub authority: Authority,
    /// Time the store accepted the write.
    pub timestamp: Timestamp,
}

impl MemoryRecord {
    /// Exact, case-sensitive tag membership.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Persisted form of a record.
///
/// The checksum covers every field (see [`StoredRecord::checksum_input`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub cid: String,
    pub tags: Vec<String>,
    pub authority: Authority,
    pub timestamp: Timestamp,
    pub checksum: u32,
}

impl StoredRecord {
    /// Create a record with a zero checksum; the service seals it.
    pub fn new(cid: String, tags: Vec<String>, authority: Authority, timestamp: Timestamp) -> Self {
        Self {
            cid,
            tags,
            authority,
            timestamp,
            checksum: 0,
        }
    }

    /// Canonical bytes the checksum is computed over.
    ///
    /// Layout: `authority[32] || timestamp(i64 LE) || str(cid) || u32(n) || str(tag)*n`
    /// where `str(s) = u32 LE length || utf8 bytes`.
    pub fn checksum_input(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(32 + 8 + 8 + self.cid.len() + self.tags.len() * 16);
        buf.extend_from_slice(self.authority.as_bytes());
        buf.extend_from_slice(&self.timestamp.to_le_bytes());
        encode_fields(&mut buf, &self.cid, &self.tags);
        buf
    }

    /// Attach the address this record was read from.
    pub fn into_record(self, address: Address) -> MemoryRecord {
        MemoryRecord {
            address,
            cid: self.cid,
            tags: self.tags,
            authority: self.authority,
            timestamp: self.timestamp,
        }
    }
}

/// A write request before authorization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOperation {
    pub cid: String,
    pub tags: Vec<String>,
}

impl WriteOperation {
    pub fn new(cid: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            cid: cid.into(),
            tags,
        }
    }

    /// Bytes a signer commits to: a domain tag followed by the length-prefixed fields.
    pub fn signing_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(WRITE_SIGNING_DOMAIN.len() + 8 + self.cid.len());
        buf.extend_from_slice(WRITE_SIGNING_DOMAIN);
        encode_fields(&mut buf, &self.cid, &self.tags);
        buf
    }
}

/// A write operation bound to an authority by its signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizedWrite {
    pub operation: WriteOperation,
    pub authority: Authority,
    pub signature: Ed25519Signature,
}

fn encode_str(buf: &mut Vec<u8>, s: &str) {
    buf.extend_from_slice(&(s.len() as u32).to_le_bytes());
    buf.extend_from_slice(s.as_bytes());
}

fn encode_fields(buf: &mut Vec<u8>, cid: &str, tags: &[String]) {
    encode_str(buf, cid);
    buf.extend_from_slice(&(tags.len() as u32).to_le_bytes());
    for tag in tags {
        encode_str(buf, tag);
    }
}

//! Ed25519 signer capability.

use crate::domain::entities::{Authority, AuthorizedWrite, WriteOperation};
use crate::ports::outbound::RecordSigner;
use shared_crypto::Ed25519KeyPair;

/// `RecordSigner` backed by an in-process Ed25519 keypair.
#[derive(Debug)]
pub struct Ed25519RecordSigner {
    keypair: Ed25519KeyPair,
}

impl Ed25519RecordSigner {
    /// Signer with a freshly generated key.
    pub fn generate() -> Self {
        Self::from_keypair(Ed25519KeyPair::generate())
    }

    /// Signer for the key with this secret seed.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self::from_keypair(Ed25519KeyPair::from_seed(seed))
    }

    pub fn from_keypair(keypair: Ed25519KeyPair) -> Self {
        Self { keypair }
    }
}

impl RecordSigner for Ed25519RecordSigner {
    fn authority(&self) -> Authority {
        Authority::from(self.keypair.public_key())
    }

    fn sign(&self, operation: WriteOperation) -> AuthorizedWrite {
        let signature = self.keypair.sign(&operation.signing_bytes());
        AuthorizedWrite {
            operation,
            authority: self.authority(),
            signature,
        }
    }
}

use novapay_core::types::{AccountId, Signature, SigningPublicKey};
use pqcrypto_dilithium::dilithium2;
use pqcrypto_traits::sign::{PublicKey, SecretKey};
use serde::{Deserialize, Serialize};

use crate::hash::account_id_from_pubkey;
use crate::sign::{sign, SignatureError};

/// A NovaPay keypair: Dilithium2 public + secret keys with derived
/// [`AccountId`]. Shared address space between client accounts and
/// validator identities.
///
/// The secret key is held as a plain `Vec<u8>` and zeroized on drop.
#[derive(Serialize, Deserialize)]
pub struct KeyPair {
    pub account_id: AccountId,
    pub public_key: SigningPublicKey,
    secret_key: Vec<u8>,
}

impl KeyPair {
    /// Generate a fresh Dilithium2 keypair.
    pub fn generate() -> Self {
        let (pk, sk) = dilithium2::keypair();
        let pk_bytes = pk.as_bytes().to_vec();
        let account_id = account_id_from_pubkey(&pk_bytes);
        Self {
            account_id,
            public_key: SigningPublicKey(pk_bytes),
            secret_key: sk.as_bytes().to_vec(),
        }
    }

    /// Sign `message` with this keypair's secret key.
    pub fn sign(&self, message: &[u8]) -> Result<Signature, SignatureError> {
        sign(&self.secret_key, message)
    }

    /// Restore a `KeyPair` from raw bytes (e.g. loaded from a local keystore
    /// file). `novapay-crypto` has no opinion on how those bytes are stored.
    pub fn from_raw(pk_bytes: Vec<u8>, sk_bytes: Vec<u8>) -> Self {
        let account_id = account_id_from_pubkey(&pk_bytes);
        Self {
            account_id,
            public_key: SigningPublicKey(pk_bytes),
            secret_key: sk_bytes,
        }
    }
}

impl Drop for KeyPair {
    fn drop(&mut self) {
        use zeroize::Zeroize;
        self.secret_key.zeroize();
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "KeyPair {{ account_id: {:?} }}", self.account_id)
    }
}

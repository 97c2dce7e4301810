use serde::{Deserialize, Serialize};
use std::fmt;

/// Account balance, in the protocol's base unit. `u128` gives headroom far
/// beyond any realistic supply without ever needing a bignum crate.
pub type Balance = u128;

/// Per-account sequence number. Strictly non-decreasing.
pub type Nonce = u64;

/// A validator is identified by the same address space as a client account.
pub type ValidatorId = AccountId;

// ── AccountId ────────────────────────────────────────────────────────────────

/// 32-byte account address, derived as BLAKE3(signing public key).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountId(pub [u8; 32]);

impl AccountId {
    pub fn from_bytes(b: [u8; 32]) -> Self {
        Self(b)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Base-58 encoded string representation.
    pub fn to_b58(&self) -> String {
        bs58::encode(&self.0).into_string()
    }

    pub fn from_b58(s: &str) -> Result<Self, bs58::decode::Error> {
        let bytes = bs58::decode(s).into_vec()?;
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes[..32]);
        Ok(Self(arr))
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_b58())
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.to_b58();
        write!(f, "AccountId({})", &s[..8.min(s.len())])
    }
}

/// The fixed sentinel recipient address that marks a transaction as a
/// recovery transaction rather than a payment.
pub const RECOVERY_CONTRACT_ADDRESS: AccountId = AccountId([0xFFu8; 32]);

// ── TxHash ───────────────────────────────────────────────────────────────────

/// 32-byte content hash of a transaction's canonical (signed) body bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TxHash(pub [u8; 32]);

impl TxHash {
    pub fn from_bytes(b: [u8; 32]) -> Self {
        Self(b)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes[..32]);
        Ok(Self(arr))
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxHash({}…)", &self.to_hex()[..16])
    }
}

// ── VotePayload ────────────────────────────────────────────────────────────

/// What a vote is *for*: either a specific transaction, or the bottom (⊥)
/// sentinel that breaks an equivocation lock.
///
/// `Bottom`'s wire encoding hashes to the all-zero digest, which is
/// exactly what [`VotePayload::digest`] returns.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum VotePayload {
    Tx(TxHash),
    Bottom,
}

impl VotePayload {
    /// The 32 bytes folded into a vote's signed digest.
    pub fn digest(&self) -> [u8; 32] {
        match self {
            VotePayload::Tx(h) => *h.as_bytes(),
            VotePayload::Bottom => [0u8; 32],
        }
    }

    pub fn is_bottom(&self) -> bool {
        matches!(self, VotePayload::Bottom)
    }

    pub fn tx_hash(&self) -> Option<TxHash> {
        match self {
            VotePayload::Tx(h) => Some(*h),
            VotePayload::Bottom => None,
        }
    }
}

impl fmt::Display for VotePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VotePayload::Tx(h) => write!(f, "{h}"),
            VotePayload::Bottom => write!(f, "⊥"),
        }
    }
}

// ── Signing key material ──────────────────────────────────────────────────────

/// Dilithium2 public key (1312 bytes per NIST FIPS 204).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningPublicKey(pub Vec<u8>);

impl fmt::Debug for SigningPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SigningPublicKey({}b)", self.0.len())
    }
}

/// Dilithium2 detached signature (2420 bytes per NIST FIPS 204).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature(pub Vec<u8>);

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({}b)", self.0.len())
    }
}

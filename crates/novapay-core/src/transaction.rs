use serde::{Deserialize, Serialize};

use crate::constants::TX_DOMAIN_TAG;
use crate::types::{AccountId, Balance, Nonce, Signature, SigningPublicKey, TxHash, RECOVERY_CONTRACT_ADDRESS};

// ── TxKind ────────────────────────────────────────────────────────────────────

/// What a transaction *is*, derived from its recipient.
///
/// Payment and recovery share one wire shape; this is a read-only view over
/// `Transaction`, not a separately-encoded variant — the recipient address is
/// the tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TxKind {
    Payment,
    Recovery,
}

// ── Transaction ───────────────────────────────────────────────────────────────

/// A fully-formed, signed NovaPay transaction.
///
/// Treated by the validator core as opaque bytes plus the two properties it
/// actually consumes: a content hash and a recovered signer. Concretely, the
/// "recovery" of the signer is a verify against the embedded public key
/// (Dilithium2 has no key-recovery scheme); `sender` is trusted only once
/// [`crate::transaction::Transaction::verify_signature`] (implemented in
/// `novapay-crypto`, which owns the signature primitive) has succeeded.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// The account authorizing this transaction. Binding: `sender` MUST equal
    /// the BLAKE3 hash of `sender_public_key` for the transaction to be valid.
    pub sender: AccountId,

    /// Public key whose signature authorizes this transaction.
    pub sender_public_key: SigningPublicKey,

    /// Recipient address. [`RECOVERY_CONTRACT_ADDRESS`] marks this as a
    /// recovery transaction whose `data` carries a serialized tip
    /// transaction.
    pub recipient: AccountId,

    /// Transfer amount. For a recovery transaction this is conventionally 0;
    /// the validator does not interpret it (the tip's own amount is what
    /// moves funds).
    pub amount: Balance,

    /// Per-sender sequence number.
    pub nonce: Nonce,

    /// Opaque data payload. For a recovery transaction: the canonical
    /// (bincode) encoding of the tip `Transaction`.
    pub data: Vec<u8>,

    /// Signature over [`Transaction::body_bytes`] under `sender_public_key`.
    pub signature: Signature,
}

/// The signed portion of a transaction — everything except the signature
/// itself.
#[derive(Serialize)]
struct TransactionBody<'a> {
    sender: &'a AccountId,
    sender_public_key: &'a SigningPublicKey,
    recipient: &'a AccountId,
    amount: Balance,
    nonce: Nonce,
    data: &'a [u8],
}

impl Transaction {
    /// Canonical bytes that are signed and hashed, domain-separated from
    /// vote digests.
    pub fn body_bytes(&self) -> Vec<u8> {
        let body = TransactionBody {
            sender: &self.sender,
            sender_public_key: &self.sender_public_key,
            recipient: &self.recipient,
            amount: self.amount,
            nonce: self.nonce,
            data: &self.data,
        };
        let mut out = TX_DOMAIN_TAG.to_vec();
        out.extend(bincode::serialize(&body).expect("transaction body serialization is infallible"));
        out
    }

    /// Content hash: BLAKE3 of the canonical body bytes. Equality between
    /// transactions is by this hash.
    pub fn hash(&self) -> TxHash {
        TxHash::from_bytes(*blake3::hash(&self.body_bytes()).as_bytes())
    }

    /// Whether this is a payment or a recovery transaction, derived from the
    /// recipient address.
    pub fn kind(&self) -> TxKind {
        if self.recipient == RECOVERY_CONTRACT_ADDRESS {
            TxKind::Recovery
        } else {
            TxKind::Payment
        }
    }

    /// Decode the embedded tip transaction. Only meaningful when
    /// `kind() == TxKind::Recovery`; callers should check `kind()` first.
    pub fn decode_tip(&self) -> Result<Transaction, bincode::Error> {
        bincode::deserialize(&self.data)
    }
}

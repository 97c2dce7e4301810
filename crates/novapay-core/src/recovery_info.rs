use serde::{Deserialize, Serialize};

use crate::types::{AccountId, Nonce, TxHash};
use crate::vote::Certificate;

/// One entry in a recovery snapshot's `chain[]`: a
/// notarisation certificate for some nonce strictly between the account's
/// `finalised_nonce` and `current_nonce` — either for a specific
/// transaction or for ⊥.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ChainEntry {
    pub nonce: Nonce,
    pub certificate: Certificate,
}

/// Snapshot API return value: the evidence a client needs to
/// craft a recovery transaction after observing `Pending` or a nonce
/// mismatch.
///
/// `finalised_tx`/`finality_cert` are `None` only when `finalised_nonce ==
/// -1` (nothing has ever been applied to this account); once a payment has
/// finalised, both are always populated, since a finality certificate is
/// what caused `finalised` to advance in the first place.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RecoveryInfo {
    pub finalised_nonce: i64,
    pub finalised_tx: Option<TxHash>,
    pub finality_cert: Option<Certificate>,
    pub current_nonce: Nonce,
    pub chain: Vec<ChainEntry>,
}

impl RecoveryInfo {
    /// The transaction a client should use as the "tip" of a recovery
    /// transaction built from this snapshot: the latest
    /// non-⊥ certified transaction in `chain`, or `finalised_tx` if every
    /// entry in `chain` is ⊥.
    pub fn recovery_tip(&self) -> Option<TxHash> {
        self.chain
            .iter()
            .rev()
            .find_map(|entry| entry.certificate.payload.tx_hash())
            .or(self.finalised_tx)
    }

    pub fn account(&self) -> Option<AccountId> {
        self.finality_cert
            .as_ref()
            .map(|c| c.account)
            .or_else(|| self.chain.first().map(|e| e.certificate.account))
    }
}

use std::collections::HashMap;

use novapay_core::transaction::Transaction;
use novapay_core::types::TxHash;

/// Content-addressed cache of transactions this validator has locally
/// validated. Votes in [`crate::votes::VoteStore`] reference transactions
/// only by hash; this store is what lets the certificate processor recover
/// the full transaction — sender, recipient, amount, tip chain — behind a
/// certified hash.
#[derive(Debug, Default)]
pub struct TxStore {
    by_hash: HashMap<TxHash, Transaction>,
}

impl TxStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `tx`, keyed by its content hash. A transaction is immutable
    /// once inserted; re-inserting the same hash is a no-op overwrite with
    /// identical content.
    pub fn insert(&mut self, tx: Transaction) -> TxHash {
        let hash = tx.hash();
        self.by_hash.insert(hash, tx);
        hash
    }

    pub fn get(&self, hash: &TxHash) -> Option<&Transaction> {
        self.by_hash.get(hash)
    }
}

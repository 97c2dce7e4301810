use std::collections::HashMap;

use novapay_core::types::{AccountId, Nonce, ValidatorId, VotePayload};
use novapay_core::vote::Vote;

/// Per-`(account, nonce)` bag of votes, the only cross-account read/write
/// surface inside one validator.
///
/// Dedup rules, enforced in [`VoteStore::append`]:
/// - A second transaction-vote from the same validator at the same nonce is
///   dropped (equivocation — the first one binds).
/// - A validator may additionally cast exactly one ⊥-vote at the same
///   nonce; a second ⊥-vote from the same validator is dropped.
#[derive(Debug, Default)]
pub struct VoteStore {
    votes: HashMap<(AccountId, Nonce), Vec<Vote>>,
}

impl VoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `vote`, applying the dedup rules. Returns `true` if the vote
    /// was newly stored, `false` if it was dropped as a duplicate.
    pub fn append(&mut self, vote: Vote) -> bool {
        let key = (vote.account, vote.nonce);
        let bucket = self.votes.entry(key).or_default();

        let duplicate = bucket.iter().any(|existing| {
            existing.validator == vote.validator
                && match vote.payload {
                    VotePayload::Bottom => existing.payload.is_bottom(),
                    VotePayload::Tx(_) => !existing.payload.is_bottom(),
                }
        });
        if duplicate {
            tracing::debug!(
                account = %vote.account, nonce = vote.nonce, validator = %vote.validator,
                "dropping duplicate vote"
            );
            return false;
        }

        bucket.push(vote);
        true
    }

    /// All votes stored for `(account, nonce)`.
    pub fn votes(&self, account: AccountId, nonce: Nonce) -> &[Vote] {
        self.votes
            .get(&(account, nonce))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Unique-validator count voting for `payload` at `(account, nonce)`.
    pub fn count_distinct(&self, account: AccountId, nonce: Nonce, payload: &VotePayload) -> usize {
        self.votes(account, nonce)
            .iter()
            .filter(|v| &v.payload == payload)
            .map(|v| v.validator)
            .collect::<std::collections::HashSet<ValidatorId>>()
            .len()
    }

    /// Whether `validator` has already cast a ⊥-vote at `(account, nonce)` —
    /// used by the certificate processor's (R1) one-⊥-per-validator guard.
    pub fn has_bottom_vote_from(&self, account: AccountId, nonce: Nonce, validator: ValidatorId) -> bool {
        self.votes(account, nonce)
            .iter()
            .any(|v| v.validator == validator && v.payload.is_bottom())
    }
}

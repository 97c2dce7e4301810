use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::constants::VOTE_DOMAIN_TAG;
use crate::types::{AccountId, Nonce, Signature, ValidatorId, VotePayload};

/// `(validator, account, nonce, payload, signature)` — a single validator's
/// vote for what should happen at one account's one nonce.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Vote {
    pub validator: ValidatorId,
    pub account: AccountId,
    pub nonce: Nonce,
    pub payload: VotePayload,
    pub signature: Signature,
}

/// The signed portion of a vote.
#[derive(Serialize)]
struct VoteBody<'a> {
    account: &'a AccountId,
    nonce: Nonce,
    payload_digest: [u8; 32],
}

impl Vote {
    /// Canonical bytes signed by the validator: `(account, nonce,
    /// payload-or-zero-hash)` under a domain-separated tag.
    pub fn body_bytes(&self) -> Vec<u8> {
        let body = VoteBody {
            account: &self.account,
            nonce: self.nonce,
            payload_digest: self.payload.digest(),
        };
        let mut out = VOTE_DOMAIN_TAG.to_vec();
        out.extend(bincode::serialize(&body).expect("vote body serialization is infallible"));
        out
    }
}

/// A derived view over a bag of votes sharing `(account, nonce, payload)`.
/// Never persisted as a primary record — assembled on demand from the vote
/// store.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Certificate {
    pub account: AccountId,
    pub nonce: Nonce,
    pub payload: VotePayload,
    pub votes: Vec<Vote>,
}

impl Certificate {
    /// Number of distinct validators represented (vote-store dedup already
    /// guarantees at most one vote per validator per payload-kind, but this
    /// stays defensive against a certificate assembled from raw, unchecked
    /// vote lists).
    pub fn distinct_count(&self) -> usize {
        self.votes
            .iter()
            .map(|v| v.validator)
            .collect::<HashSet<_>>()
            .len()
    }

    /// Whether this certificate meets or exceeds `threshold` distinct votes.
    pub fn meets(&self, threshold: usize) -> bool {
        self.distinct_count() >= threshold
    }
}

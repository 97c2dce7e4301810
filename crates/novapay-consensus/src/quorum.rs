use std::collections::HashSet;

use novapay_core::types::{ValidatorId, VotePayload};
use novapay_core::vote::Vote;

/// The result of evaluating a vote bag: the winning payload (by distinct
/// validator count) and its count.
#[derive(Clone, Debug, PartialEq)]
pub struct QuorumResult {
    pub max_count: usize,
    pub payload: VotePayload,
    pub members: Vec<ValidatorId>,
}

/// Partition `votes` by payload, count distinct validators per partition,
/// and return the maximum.
///
/// Tie-break is deterministic but not safety-critical: groups are built in
/// first-seen order and `Iterator::max_by_key` keeps the *last* maximum on a
/// tie, so two runs over the same vote sequence agree even under a tie.
pub fn evaluate(votes: &[Vote]) -> QuorumResult {
    // Stable grouping: a Vec of (payload, members) built in first-seen order,
    // not a HashMap (whose iteration order is not guaranteed stable).
    let mut groups: Vec<(VotePayload, Vec<ValidatorId>)> = Vec::new();

    for vote in votes {
        if let Some((_, members)) = groups.iter_mut().find(|(p, _)| *p == vote.payload) {
            if !members.contains(&vote.validator) {
                members.push(vote.validator);
            }
        } else {
            groups.push((vote.payload, vec![vote.validator]));
        }
    }

    groups
        .into_iter()
        .max_by_key(|(_, members)| members.len())
        .map(|(payload, members)| QuorumResult {
            max_count: members.len(),
            payload,
            members,
        })
        .unwrap_or(QuorumResult {
            max_count: 0,
            payload: VotePayload::Bottom,
            members: Vec::new(),
        })
}

/// Total distinct validators across all payloads at this nonce, regardless
/// of what they voted for — used to check the `n - f` total bound before
/// casting a ⊥ vote.
pub fn total_distinct(votes: &[Vote]) -> usize {
    votes
        .iter()
        .map(|v| v.validator)
        .collect::<HashSet<_>>()
        .len()
}

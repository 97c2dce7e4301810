use serde::{Deserialize, Serialize};

use crate::constants::NO_FINALISED_NONCE;
use crate::types::{AccountId, Balance, Nonce};

/// Per-account mutable state.
///
/// Invariants maintained by the certificate processor, never by `Account`
/// itself: `finalised < nonce` always; `nonce` and `finalised` are
/// monotonically non-decreasing.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Account {
    pub account_id: AccountId,

    /// Non-negative balance in the protocol's base unit.
    pub balance: Balance,

    /// Next nonce this validator will vote for. Starts at 0.
    pub nonce: Nonce,

    /// True iff a vote has been cast at `nonce` but `nonce` has not yet
    /// advanced — i.e. the account is "locked" on its current nonce.
    pub pending: bool,

    /// Highest nonce whose payment effect has been applied. `-1` means
    /// nothing has been applied yet.
    pub finalised: i64,
}

impl Account {
    /// A freshly created account: zero balance, nonce 0, nothing pending or
    /// finalised.
    pub fn new(account_id: AccountId) -> Self {
        Self {
            account_id,
            balance: 0,
            nonce: 0,
            pending: false,
            finalised: NO_FINALISED_NONCE,
        }
    }

    /// Seed a genesis account with an initial balance, everything else at
    /// its default.
    pub fn genesis(account_id: AccountId, balance: Balance) -> Self {
        Self {
            balance,
            ..Self::new(account_id)
        }
    }
}

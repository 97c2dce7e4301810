use serde::{Deserialize, Serialize};

use crate::error::NovaPayError;
use crate::types::{AccountId, RECOVERY_CONTRACT_ADDRESS};

/// Process-wide configuration, resolved once at startup.
///
/// `n >= 5f + 1` is enforced by [`Params::new`], not by the type itself, so
/// that a bad configuration fails loudly at startup rather than silently
/// producing nonsensical thresholds.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Params {
    /// Byzantine fault budget.
    pub f: u64,

    /// Validator count. Must satisfy `n >= 5f + 1`.
    pub n: u64,

    /// `n - f` — the finality quorum.
    pub finality_quorum: u64,

    /// `n - 3f` — the notarisation quorum.
    pub notarisation_quorum: u64,

    /// Fixed sentinel recipient address marking a recovery transaction.
    pub recovery_contract_address: AccountId,
}

impl Params {
    /// Validate and derive quorum thresholds. Fails startup if `n < 5f + 1`.
    pub fn new(n: u64, f: u64) -> Result<Self, NovaPayError> {
        if n < 5 * f + 1 {
            return Err(NovaPayError::InvalidFaultModel { n, f });
        }
        Ok(Self {
            f,
            n,
            finality_quorum: n - f,
            notarisation_quorum: n - 3 * f,
            recovery_contract_address: RECOVERY_CONTRACT_ADDRESS,
        })
    }

    /// The classic 3f+1 comparison variant: same `n`/`f`, single
    /// threshold, no notarisation/finality split.
    pub fn new_classic(n: u64, f: u64) -> Result<Self, NovaPayError> {
        if n < 3 * f + 1 {
            return Err(NovaPayError::InvalidFaultModel { n, f });
        }
        Ok(Self {
            f,
            n,
            finality_quorum: n - f,
            notarisation_quorum: n - f,
            recovery_contract_address: RECOVERY_CONTRACT_ADDRESS,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_undersized_validator_set() {
        assert!(Params::new(5, 1).is_err());
        assert!(Params::new(6, 1).is_ok());
    }

    #[test]
    fn derives_thresholds() {
        let p = Params::new(6, 1).unwrap();
        assert_eq!(p.finality_quorum, 5);
        assert_eq!(p.notarisation_quorum, 3);
    }
}

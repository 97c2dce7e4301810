use crate::constants::MAX_RECOVERY_CHAIN_DEPTH;
use crate::error::RecoveryError;
use crate::transaction::{Transaction, TxKind};

/// Walk a recovery transaction's "tip" pointer down to the original payment
/// whose effects should be applied.
///
/// A recovery's tip is always embedded inline in its `data` payload, so this
/// is a pure function of `tx` alone — no store lookup needed. Iterative, not
/// recursive, and capped at [`MAX_RECOVERY_CHAIN_DEPTH`]: a recovery whose
/// tip is itself a recovery is allowed, but a chain deeper than the cap is
/// rejected as `RecursionTooDeep`. A cycle is impossible — each inner
/// layer's nonce is strictly lower than its parent's — but pathological
/// input could still build an arbitrarily long chain, which the cap guards
/// against.
///
/// Both the certificate processor (`novapay-consensus`) and the transaction
/// validator (`novapay-validator`) call this; it lives here, in
/// `novapay-core`, so neither crate needs to depend on the other just to
/// share it. `novapay-validator::recovery_chain` re-exports it under the
/// name the component design calls for.
pub fn chain_start(tx: &Transaction) -> Result<Transaction, RecoveryError> {
    let mut current = tx.clone();
    let mut depth = 0usize;

    loop {
        match current.kind() {
            TxKind::Payment => return Ok(current),
            TxKind::Recovery => {
                depth += 1;
                if depth > MAX_RECOVERY_CHAIN_DEPTH {
                    return Err(RecoveryError::RecursionTooDeep {
                        cap: MAX_RECOVERY_CHAIN_DEPTH,
                    });
                }
                current = current.decode_tip().map_err(|_| RecoveryError::MissingTip)?;
            }
        }
    }
}

use thiserror::Error;

/// Sub-kinds of a rejected recovery transaction.
///
/// Nested rather than flattened into [`NovaPayError`] because these are all
/// sub-kinds of a single `InvalidRecovery` failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecoveryError {
    #[error("recovery data payload does not decode to a tip transaction")]
    MissingTip,

    #[error("tip transaction sender does not match the recovery transaction's sender")]
    TipSenderMismatch,

    #[error("no notarisation certificate exists for the tip at nonce {tip_nonce}")]
    TipNotNotarised { tip_nonce: u64 },

    #[error("no notarisation certificate for ⊥ at intermediate nonce {nonce}")]
    IntermediateNotBottom { nonce: u64 },

    #[error("recovery chain depth exceeds the cap of {cap}")]
    RecursionTooDeep { cap: usize },
}

/// The validator state machine's error taxonomy.
///
/// One variant per named error kind; the only swallowed case is a
/// peer-broadcast failure, which is logged and dropped in `novapay-node`
/// and never surfaced here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NovaPayError {
    // ── Transaction validation ────────────────────────────────────
    #[error("malformed or unverifiable signature")]
    BadSignature,

    #[error("vote or transaction signer {0} is not in the configured validator set")]
    NotInValidatorSet(String),

    #[error("account already has an in-flight vote at its current nonce")]
    Pending,

    #[error("nonce mismatch: account is at {account_nonce}, transaction carries {tx_nonce}")]
    NonceMismatch { account_nonce: u64, tx_nonce: u64 },

    #[error("payment submitted at nonce {nonce} while finalised is still {finalised}")]
    NotFinalisedPrev { nonce: u64, finalised: i64 },

    #[error("insufficient balance: need {need}, have {have}")]
    InsufficientBalance { need: u128, have: u128 },

    #[error("invalid recovery transaction: {0}")]
    InvalidRecovery(#[from] RecoveryError),

    // ── Recovery-info assembly ────────────────────────────────
    #[error("missing notarisation certificate for nonce {nonce}: invariant violation")]
    MissingNotarisation { nonce: u64 },

    // ── Parameter / configuration validation ────────────────────────
    #[error("n = {n} does not satisfy n >= 5f + 1 for f = {f}")]
    InvalidFaultModel { n: u64, f: u64 },

    // ── Wire / encoding errors (ambient; ties opaque bytes to the core) ───────
    #[error("transaction envelope failed to decode: {0}")]
    MalformedTransaction(String),

    #[error("{0}")]
    Other(String),
}

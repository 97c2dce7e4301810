//! novapay-recovery
//!
//! The recovery-info assembler: a thin read-side service over
//! the account and vote stores that builds the snapshot a client needs to
//! craft a recovery transaction after observing `Pending` or a nonce
//! mismatch. The state transitions that make recovery possible — the ⊥-vote
//! rule and the recovery-transaction validation rule — live in
//! `novapay-consensus` and `novapay-validator`; this crate only assembles
//! evidence, it never mutates account state.

pub mod snapshot;

pub use snapshot::{snapshot, RecoveryQuery};

//! ─── NovaPay protocol constants ─────────────────────────────────────────────
//!
//! A 5f+1 BFT payment protocol with single-round-trip finality and a
//! deterministic ⊥-vote recovery rule.

/// Domain-separation tag folded into every vote digest before signing, so a
/// vote signature can never be replayed as a signature over an unrelated
/// message type.
pub const VOTE_DOMAIN_TAG: &[u8] = b"novapay.vote.v1";

/// Domain-separation tag for transaction body hashing / signing.
pub const TX_DOMAIN_TAG: &[u8] = b"novapay.tx.v1";

/// Maximum recursion depth when walking a recovery transaction's tip chain.
pub const MAX_RECOVERY_CHAIN_DEPTH: usize = 8;

/// Sentinel value for `Account::finalised` meaning "nothing applied yet".
pub const NO_FINALISED_NONCE: i64 = -1;

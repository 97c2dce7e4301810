//! Re-exports the recovery-chain resolver under the name this
//! crate's component design calls for. The actual walk lives in
//! `novapay-core` so the certificate processor (`novapay-consensus`) can
//! call it without depending on this crate.
pub use novapay_core::chain_start;

use serde::{Deserialize, Serialize};

use novapay_core::types::{TxHash, VotePayload};

/// JSON-friendly encoding of a [`novapay_core::Vote`]: addresses base58,
/// hashes/signatures hex, rather than exposing raw byte arrays over JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcVote {
    pub validator: String,
    pub account: String,
    pub nonce: u64,
    /// `"bottom"` or the hex-encoded transaction hash.
    pub payload: String,
    pub signature_hex: String,
}

/// Response to `submit_vote`/`submit_votes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcAck {
    pub ok: bool,
    pub detail: Option<String>,
}

impl RpcAck {
    pub fn ok() -> Self {
        Self { ok: true, detail: None }
    }
}

/// JSON-friendly encoding of a [`novapay_core::Certificate`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcCertificate {
    pub account: String,
    pub nonce: u64,
    pub payload: String,
    pub votes: Vec<RpcVote>,
    pub distinct_count: usize,
}

/// JSON-friendly encoding of one [`novapay_core::ChainEntry`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcChainEntry {
    pub nonce: u64,
    pub certificate: RpcCertificate,
}

/// JSON-friendly encoding of [`novapay_core::RecoveryInfo`], the response to
/// `get_recovery_info`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcRecoveryInfo {
    pub finalised_nonce: i64,
    pub finalised_tx: Option<String>,
    pub finality_cert: Option<RpcCertificate>,
    pub current_nonce: u64,
    pub chain: Vec<RpcChainEntry>,
    /// The transaction a client should embed as the "tip" of its next
    /// recovery transaction, precomputed from `chain`/`finalised_tx`
    /// so clients don't have to reimplement the walk.
    pub recovery_tip: Option<String>,
}

pub(crate) fn encode_payload(payload: &VotePayload) -> String {
    match payload {
        VotePayload::Bottom => "bottom".to_string(),
        VotePayload::Tx(hash) => hash.to_hex(),
    }
}

pub(crate) fn decode_payload(s: &str) -> Result<VotePayload, String> {
    if s == "bottom" {
        Ok(VotePayload::Bottom)
    } else {
        TxHash::from_hex(s)
            .map(VotePayload::Tx)
            .map_err(|e| format!("invalid payload hash: {e}"))
    }
}

use novapay_core::types::{AccountId, Signature, ValidatorId};
use novapay_core::vote::{Certificate, Vote};
use novapay_core::{ChainEntry, RecoveryInfo};

use crate::types::{decode_payload, encode_payload, RpcCertificate, RpcChainEntry, RpcRecoveryInfo, RpcVote};

impl From<&Vote> for RpcVote {
    fn from(vote: &Vote) -> Self {
        Self {
            validator: vote.validator.to_b58(),
            account: vote.account.to_b58(),
            nonce: vote.nonce,
            payload: encode_payload(&vote.payload),
            signature_hex: hex::encode(&vote.signature.0),
        }
    }
}

impl TryFrom<&RpcVote> for Vote {
    type Error = String;

    fn try_from(rpc: &RpcVote) -> Result<Self, Self::Error> {
        Ok(Vote {
            validator: ValidatorId::from_b58(&rpc.validator).map_err(|e| e.to_string())?,
            account: AccountId::from_b58(&rpc.account).map_err(|e| e.to_string())?,
            nonce: rpc.nonce,
            payload: decode_payload(&rpc.payload)?,
            signature: Signature(hex::decode(&rpc.signature_hex).map_err(|e| e.to_string())?),
        })
    }
}

impl From<&Certificate> for RpcCertificate {
    fn from(cert: &Certificate) -> Self {
        Self {
            account: cert.account.to_b58(),
            nonce: cert.nonce,
            payload: encode_payload(&cert.payload),
            distinct_count: cert.distinct_count(),
            votes: cert.votes.iter().map(RpcVote::from).collect(),
        }
    }
}

impl From<&ChainEntry> for RpcChainEntry {
    fn from(entry: &ChainEntry) -> Self {
        Self {
            nonce: entry.nonce,
            certificate: RpcCertificate::from(&entry.certificate),
        }
    }
}

impl From<&RecoveryInfo> for RpcRecoveryInfo {
    fn from(info: &RecoveryInfo) -> Self {
        Self {
            finalised_nonce: info.finalised_nonce,
            finalised_tx: info.finalised_tx.map(|h| h.to_hex()),
            finality_cert: info.finality_cert.as_ref().map(RpcCertificate::from),
            current_nonce: info.current_nonce,
            chain: info.chain.iter().map(RpcChainEntry::from).collect(),
            recovery_tip: info.recovery_tip().map(|h| h.to_hex()),
        }
    }
}

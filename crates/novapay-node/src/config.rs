//! On-disk configuration formats for `novapay-node`: the validator set and
//! an optional genesis balances file. Kept separate from `main.rs` so the
//! parsing and validation logic can be unit-tested without spawning a
//! process.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use novapay_core::types::{AccountId, Balance, SigningPublicKey, ValidatorId};

/// One entry in the validator-set file: a peer's identity, signing key, and
/// the RPC endpoint this node broadcasts votes to.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PeerConfig {
    /// Base58-encoded [`AccountId`] — the peer's validator identity.
    pub account_id: String,
    /// Hex-encoded Dilithium2 public key.
    pub public_key_hex: String,
    /// Base URL of the peer's JSON-RPC endpoint, e.g. `http://127.0.0.1:8546`.
    pub rpc_url: String,
}

/// The full validator set as loaded from disk: every validator's identity,
/// public key, and RPC address, including this node's own entry.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ValidatorSetConfig {
    pub validators: Vec<PeerConfig>,
}

impl ValidatorSetConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("reading validator set {}: {e}", path.display()))?;
        let config: Self = serde_json::from_str(&json)
            .map_err(|e| anyhow::anyhow!("parsing validator set {}: {e}", path.display()))?;
        Ok(config)
    }

    /// The `(ValidatorId -> SigningPublicKey)` map the core uses to verify
    /// peer votes.
    pub fn validator_keys(&self) -> anyhow::Result<HashMap<ValidatorId, SigningPublicKey>> {
        self.validators
            .iter()
            .map(|p| {
                let id = ValidatorId::from_b58(&p.account_id)
                    .map_err(|e| anyhow::anyhow!("invalid account_id {}: {e}", p.account_id))?;
                let key_bytes = hex::decode(&p.public_key_hex)
                    .map_err(|e| anyhow::anyhow!("invalid public_key_hex for {}: {e}", p.account_id))?;
                Ok((id, SigningPublicKey(key_bytes)))
            })
            .collect()
    }

    /// Every peer's broadcast target except `self_id`.
    pub fn broadcast_targets(&self, self_id: ValidatorId) -> anyhow::Result<Vec<String>> {
        self.validators
            .iter()
            .filter_map(|p| match ValidatorId::from_b58(&p.account_id) {
                Ok(id) if id == self_id => None,
                Ok(_) => Some(Ok(p.rpc_url.clone())),
                Err(e) => Some(Err(anyhow::anyhow!("invalid account_id {}: {e}", p.account_id))),
            })
            .collect()
    }
}

/// Optional genesis balances file: a flat `{account_id_b58: balance}` map
/// seeded into the account store at startup.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct GenesisConfig {
    pub balances: HashMap<String, Balance>,
}

impl GenesisConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("reading genesis file {}: {e}", path.display()))?;
        let config: Self = serde_json::from_str(&json)
            .map_err(|e| anyhow::anyhow!("parsing genesis file {}: {e}", path.display()))?;
        Ok(config)
    }

    pub fn accounts(&self) -> anyhow::Result<Vec<(AccountId, Balance)>> {
        self.balances
            .iter()
            .map(|(addr, balance)| {
                let id = AccountId::from_b58(addr)
                    .map_err(|e| anyhow::anyhow!("invalid genesis account_id {addr}: {e}"))?;
                Ok((id, *balance))
            })
            .collect()
    }
}

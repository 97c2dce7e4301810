use std::net::SocketAddr;
use std::sync::Arc;

use jsonrpsee::core::{async_trait, RpcResult};
use jsonrpsee::server::{Server, ServerHandle};
use jsonrpsee::types::ErrorObject;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use novapay_core::types::AccountId;
use novapay_core::vote::Vote;
use novapay_core::Transaction;
use novapay_validator::Validator;

use crate::api::NovaPayApiServer;
use crate::types::{RpcAck, RpcRecoveryInfo, RpcVote};

fn rpc_err(code: i32, msg: impl Into<String>) -> ErrorObject<'static> {
    ErrorObject::owned(code, msg.into(), None::<()>)
}

/// Shared state behind the RPC facade: the validator's mutable state behind
/// one coarse lock plus the channel the node
/// binary drains to actually broadcast votes to peers.
///
/// Handing votes off through `outbound_votes` rather than broadcasting
/// inline keeps this crate transport-agnostic about *how* peers are
/// reached — `novapay-node` owns the one concrete HTTP broadcaster.
pub struct RpcServerState {
    pub validator: tokio::sync::Mutex<Validator>,
    pub outbound_votes: tokio::sync::mpsc::Sender<Vote>,
}

/// The RPC server implementation.
pub struct RpcServer {
    state: Arc<RpcServerState>,
}

impl RpcServer {
    pub fn new(state: Arc<RpcServerState>) -> Self {
        Self { state }
    }

    /// Start the JSON-RPC server on `addr` with permissive CORS headers.
    /// Returns a handle to stop it.
    pub async fn start(self, addr: SocketAddr) -> anyhow::Result<ServerHandle> {
        let cors = CorsLayer::new()
            .allow_methods(Any)
            .allow_origin(Any)
            .allow_headers(Any);

        let server = Server::builder()
            .set_http_middleware(tower::ServiceBuilder::new().layer(cors))
            .build(addr)
            .await?;

        let module = self.into_rpc();
        let handle = server.start(module);
        info!(%addr, "RPC server started");
        Ok(handle)
    }
}

/// Queue `votes` for fire-and-forget broadcast, dropping (and logging) any
/// that don't fit — the channel's capacity bounds how much broadcast lag
/// this validator will tolerate before it starts shedding.
fn enqueue_broadcast(state: &RpcServerState, votes: Vec<Vote>) {
    for vote in votes {
        if let Err(e) = state.outbound_votes.try_send(vote) {
            warn!(error = %e, "dropping vote from the broadcast queue");
        }
    }
}

#[async_trait]
impl NovaPayApiServer for RpcServer {
    async fn send_raw_transaction(&self, tx_hex: String) -> RpcResult<RpcVote> {
        let bytes = hex::decode(&tx_hex).map_err(|e| rpc_err(-32602, format!("invalid hex: {e}")))?;
        let tx: Transaction = bincode::deserialize(&bytes)
            .map_err(|e| rpc_err(-32602, format!("invalid transaction encoding: {e}")))?;

        let outbox = {
            let mut validator = self.state.validator.lock().await;
            validator
                .on_transaction(tx)
                .map_err(|e| rpc_err(-32000, e.to_string()))?
        };

        let self_vote = outbox
            .first()
            .cloned()
            .ok_or_else(|| rpc_err(-32603, "validator accepted the transaction but cast no self-vote"))?;
        let response = RpcVote::from(&self_vote);

        enqueue_broadcast(&self.state, outbox);
        Ok(response)
    }

    async fn submit_vote(&self, vote: RpcVote) -> RpcResult<RpcAck> {
        let parsed = Vote::try_from(&vote).map_err(|e| rpc_err(-32602, e))?;

        let outbox = {
            let mut validator = self.state.validator.lock().await;
            validator.on_vote(parsed).map_err(|e| rpc_err(-32000, e.to_string()))?
        };

        enqueue_broadcast(&self.state, outbox);
        Ok(RpcAck::ok())
    }

    async fn submit_votes(&self, votes: Vec<RpcVote>) -> RpcResult<RpcAck> {
        let total = votes.len();
        let mut accepted = 0usize;

        for rpc_vote in votes {
            let parsed = match Vote::try_from(&rpc_vote) {
                Ok(v) => v,
                Err(e) => {
                    warn!(error = %e, "batched vote failed to decode; skipping");
                    continue;
                }
            };

            let outbox = {
                let mut validator = self.state.validator.lock().await;
                validator.on_vote(parsed)
            };
            match outbox {
                Ok(votes) => {
                    accepted += 1;
                    enqueue_broadcast(&self.state, votes);
                }
                Err(e) => warn!(error = %e, "batched vote rejected; skipping"),
            }
        }

        Ok(RpcAck { ok: true, detail: Some(format!("{accepted}/{total} votes accepted")) })
    }

    async fn get_recovery_info(&self, account_id: String) -> RpcResult<RpcRecoveryInfo> {
        let id = AccountId::from_b58(&account_id)
            .map_err(|e| rpc_err(-32602, format!("invalid account id: {e}")))?;

        let info = {
            let validator = self.state.validator.lock().await;
            validator.recovery_info(id).map_err(|e| {
                tracing::error!(%account_id, error = %e, "recovery info assembly failed: invariant violation");
                rpc_err(-32000, e.to_string())
            })?
        };

        Ok(RpcRecoveryInfo::from(&info))
    }
}

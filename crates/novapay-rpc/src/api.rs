use jsonrpsee::core::RpcResult;
use jsonrpsee::proc_macros::rpc;

use crate::types::{RpcAck, RpcRecoveryInfo, RpcVote};

/// NovaPay JSON-RPC 2.0 API definition.
///
/// All method names are prefixed with "novapay_" via `namespace = "novapay"`.
/// This is one possible transport binding; the core state machine itself
/// stays transport-agnostic.
#[rpc(server, namespace = "novapay")]
pub trait NovaPayApi {
    /// `send_raw_transaction(bytes) -> Vote | Error`. `tx_hex` is
    /// hex-encoded `bincode(Transaction)`. Returns this validator's self-vote
    /// — the call does not wait for peer acknowledgement of the broadcast.
    #[method(name = "sendRawTransaction")]
    async fn send_raw_transaction(&self, tx_hex: String) -> RpcResult<RpcVote>;

    /// `submit_vote(Vote) -> Ack | Error`: peer vote propagation.
    #[method(name = "submitVote")]
    async fn submit_vote(&self, vote: RpcVote) -> RpcResult<RpcAck>;

    /// `submit_votes([Vote]) -> Ack`: batched variant. Best-effort
    /// — an individual malformed or rejected vote in the batch is logged and
    /// skipped rather than failing the whole call.
    #[method(name = "submitVotes")]
    async fn submit_votes(&self, votes: Vec<RpcVote>) -> RpcResult<RpcAck>;

    /// `get_recovery_info(address) -> RecoveryInfo | Error`:
    /// the snapshot API clients use to craft a recovery transaction.
    #[method(name = "getRecoveryInfo")]
    async fn get_recovery_info(&self, account_id: String) -> RpcResult<RpcRecoveryInfo>;
}

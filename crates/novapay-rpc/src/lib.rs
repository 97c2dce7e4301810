//! novapay-rpc
//!
//! JSON-RPC 2.0 server for NovaPay validators. This is one
//! possible transport binding — the validator core is transport-agnostic
//! and could equally be driven over gRPC, a raw socket protocol,
//! or an in-process call from a test harness.
//!
//! Namespace: "novapay"
//! Methods:
//!   novapay_sendRawTransaction — ingress for signed transactions
//!   novapay_submitVote         — peer vote propagation
//!   novapay_submitVotes        — batched peer vote propagation
//!   novapay_getRecoveryInfo    — recovery-info snapshot

pub mod api;
pub mod convert;
pub mod server;
pub mod types;

pub use server::RpcServer;
pub use server::RpcServerState;
pub use types::{RpcAck, RpcCertificate, RpcChainEntry, RpcRecoveryInfo, RpcVote};

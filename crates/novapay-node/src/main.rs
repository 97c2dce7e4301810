//! novapay-node — the NovaPay validator process binary.
//!
//! Startup sequence:
//!   1. Parse CLI config: fault model (`n`/`f`), this validator's keypair,
//!      the static validator set, and an optional genesis balances file.
//!   2. Build the in-memory `Validator`.
//!   3. Start the JSON-RPC 2.0 server (`novapay-rpc`).
//!   4. Run the fire-and-forget peer broadcaster: drains votes the
//!      validator wants gossiped and POSTs them to every other validator's
//!      RPC endpoint, never blocking the caller that produced them.

mod config;

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use novapay_core::Params;
use novapay_crypto::KeyPair;
use novapay_rpc::server::RpcServerState;
use novapay_rpc::{RpcServer, RpcVote};
use novapay_validator::Validator;

use config::{GenesisConfig, ValidatorSetConfig};

#[derive(Parser, Debug)]
#[command(
    name = "novapay-node",
    version,
    about = "NovaPay validator — single-round-trip BFT payments with ⊥-vote recovery"
)]
struct Args {
    /// Validator count.
    #[arg(long)]
    n: u64,

    /// Byzantine fault budget. Startup
    /// fails unless `n >= 5f + 1`.
    #[arg(long)]
    f: u64,

    /// JSON-RPC listen address.
    #[arg(long, default_value = "127.0.0.1:8545")]
    rpc_addr: SocketAddr,

    /// Path to this validator's signing keypair (bincode-encoded). Generated
    /// ephemeral if absent — only useful for local development, since an
    /// ephemeral key cannot be reproduced across restarts or shared with the
    /// validator-set file other nodes load.
    #[arg(long)]
    keypair_path: Option<PathBuf>,

    /// Path to the validator-set JSON file: every validator's address,
    /// public key, and RPC broadcast target.
    #[arg(long)]
    validator_set: PathBuf,

    /// Path to an optional genesis balances JSON file.
    #[arg(long)]
    genesis: Option<PathBuf>,

    /// How long to wait for a peer's RPC response before giving up on one
    /// broadcast attempt (fire-and-forget: the caller of `on_transaction`/
    /// `on_vote` never waits on this).
    #[arg(long, default_value_t = 2000)]
    broadcast_timeout_ms: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,novapay=debug".parse().unwrap()),
        )
        .init();

    let args = Args::parse();
    info!("NovaPay validator starting");

    // ── Fault model ───────────────────────────────────────────────────────────
    let params = Params::new(args.n, args.f).context("validating fault model (n, f)")?;
    info!(
        n = params.n,
        f = params.f,
        finality_quorum = params.finality_quorum,
        notarisation_quorum = params.notarisation_quorum,
        "fault model resolved"
    );

    // ── Identity ──────────────────────────────────────────────────────────────
    let keypair = load_or_generate_keypair(args.keypair_path.as_deref())?;
    info!(account_id = %keypair.account_id, "validator identity loaded");

    // ── Validator set ─────────────────────────────────────────────────────────
    let validator_set = ValidatorSetConfig::load(&args.validator_set).context("loading validator set")?;
    let validator_keys = validator_set.validator_keys().context("parsing validator set keys")?;
    let broadcast_targets = validator_set
        .broadcast_targets(keypair.account_id)
        .context("resolving peer broadcast targets")?;
    info!(peers = broadcast_targets.len(), "validator set loaded");

    // ── Validator state ───────────────────────────────────────────────────────
    let mut validator = Validator::new(params, keypair, validator_keys);
    if let Some(path) = &args.genesis {
        let genesis = GenesisConfig::load(path).context("loading genesis file")?;
        let accounts = genesis.accounts().context("parsing genesis accounts")?;
        info!(accounts = accounts.len(), "seeding genesis balances");
        validator.seed_genesis(accounts);
    }

    // ── Broadcast channel ─────────────────────────────────────────────────────
    let (outbound_tx, outbound_rx) = tokio::sync::mpsc::channel(1024);
    let state = Arc::new(RpcServerState {
        validator: tokio::sync::Mutex::new(validator),
        outbound_votes: outbound_tx,
    });

    // ── Peer broadcaster ──────────────────────────────────────────────────────
    tokio::spawn(run_broadcaster(
        outbound_rx,
        broadcast_targets,
        Duration::from_millis(args.broadcast_timeout_ms),
    ));

    // ── RPC server ────────────────────────────────────────────────────────────
    let rpc_handle = RpcServer::new(state)
        .start(args.rpc_addr)
        .await
        .context("starting RPC server")?;

    info!(addr = %args.rpc_addr, "node ready");
    tokio::signal::ctrl_c().await.context("waiting for shutdown signal")?;
    info!("shutdown requested");
    let _ = rpc_handle.stop();

    Ok(())
}

/// Drain `rx` and forward each vote to every peer in `targets` as a
/// `novapay_submitVote` JSON-RPC call. Fire-and-forget: a failed or slow
/// peer is logged and dropped, never retried and never allowed to back up
/// the channel into the ingress path.
async fn run_broadcaster(
    mut rx: tokio::sync::mpsc::Receiver<novapay_core::Vote>,
    targets: Vec<String>,
    timeout: Duration,
) {
    if targets.is_empty() {
        warn!("no peers configured; votes will not be broadcast");
    }
    let http = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .expect("building the broadcast HTTP client is infallible with these options");

    while let Some(vote) = rx.recv().await {
        let rpc_vote = RpcVote::from(&vote);
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "method": "novapay_submitVote",
            "params": [rpc_vote],
            "id": 1,
        });

        for target in &targets {
            let http = http.clone();
            let target = target.clone();
            let body = body.clone();
            tokio::spawn(async move {
                if let Err(e) = http.post(&target).json(&body).send().await {
                    warn!(peer = %target, error = %e, "vote broadcast failed; dropping");
                }
            });
        }
    }
}

/// Load a keypair from `path` (bincode-encoded), or generate an ephemeral
/// one if no path is given: a loud warning on the development fallback,
/// never a silent one.
fn load_or_generate_keypair(path: Option<&std::path::Path>) -> anyhow::Result<KeyPair> {
    if let Some(p) = path {
        let bytes = std::fs::read(p).with_context(|| format!("reading keypair from {}", p.display()))?;
        return bincode::deserialize(&bytes).context("decoding keypair file");
    }
    warn!("no --keypair-path provided; generating an ephemeral keypair — DO NOT USE IN PRODUCTION");
    Ok(KeyPair::generate())
}

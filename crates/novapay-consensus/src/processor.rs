use novapay_core::chain_start;
use novapay_core::types::{AccountId, Nonce};
use novapay_core::vote::Vote;
use novapay_core::Params;
use novapay_crypto::KeyPair;
use novapay_store::{AccountStore, TxStore, VoteStore};

use crate::quorum;

/// The central state machine. Triggered on every vote insertion
/// into `(account, nonce)`; re-evaluates whether the account's nonce should
/// advance, whether to cast a ⊥ vote, and whether a transaction becomes
/// finalised. Owns no storage of its own — it is handed the account store,
/// vote store, and transaction cache belonging to one validator, and the
/// validator's own keypair to sign any ⊥ vote it casts.
///
/// Returns the ⊥ votes cast this round, to be broadcast fire-and-forget by
/// the caller — broadcasting is not this function's concern.
pub fn process(
    params: &Params,
    accounts: &mut AccountStore,
    account_id: AccountId,
    votes: &mut VoteStore,
    txs: &TxStore,
    self_id: AccountId,
    keypair: &KeyPair,
    entry_nonce: Nonce,
) -> Vec<Vote> {
    let mut outbox = Vec::new();
    let mut nonce = entry_nonce;

    loop {
        let (advanced, cast) = settle_one(params, accounts, account_id, votes, txs, self_id, keypair, nonce);
        outbox.extend(cast);
        if !advanced {
            break;
        }
        // Re-entry: votes for the new current nonce may already be
        // present in the store.
        nonce = accounts
            .get(&account_id)
            .expect("account was just mutated by settle_one")
            .nonce;
    }

    outbox
}

/// One pass of the bottom-vote, notarisation-advance, and finality-execute
/// checks for a single `nonce`. Returns whether the account's `nonce` field
/// advanced as a result (triggering another pass in the caller) and any ⊥
/// vote cast.
fn settle_one(
    params: &Params,
    accounts: &mut AccountStore,
    account_id: AccountId,
    votes: &mut VoteStore,
    txs: &TxStore,
    self_id: AccountId,
    keypair: &KeyPair,
    nonce: Nonce,
) -> (bool, Vec<Vote>) {
    let mut outbox = Vec::new();
    let mut advanced = false;

    let current_nonce = accounts.get_or_create(account_id).nonce;
    if nonce == current_nonce {
        let votes_at = votes.votes(account_id, nonce).to_vec();
        let result = quorum::evaluate(&votes_at);
        let total = quorum::total_distinct(&votes_at);

        // Bottom-vote rule: no payload can still reach notarisation, but
        // enough validators have already weighed in that nothing further
        // will change that — cast ⊥ to unlock the account.
        if result.max_count < params.notarisation_quorum as usize
            && total >= params.finality_quorum as usize
            && !votes.has_bottom_vote_from(account_id, nonce, self_id)
        {
            accounts.get_or_create(account_id).pending = true;
            let bottom_vote =
                keypair.cast_vote(account_id, nonce, novapay_core::types::VotePayload::Bottom);
            votes.append(bottom_vote.clone());
            outbox.push(bottom_vote);
            tracing::info!(%account_id, nonce, "cast ⊥ vote: no payload reached notarisation");
        }

        // Re-evaluate including any ⊥ vote just cast.
        let votes_at = votes.votes(account_id, nonce).to_vec();
        let result = quorum::evaluate(&votes_at);
        let pending = accounts.get(&account_id).map(|a| a.pending).unwrap_or(false);

        // Notarisation advance: a quorum has settled on one payload.
        if result.max_count >= params.notarisation_quorum as usize && pending {
            let acc = accounts.get_or_create(account_id);
            acc.nonce = nonce + 1;
            acc.pending = false;
            advanced = true;
            tracing::info!(%account_id, nonce, "notarisation certificate formed: advancing nonce");
        }
    }

    // Finality execute — independent of `nonce == account.nonce`: a
    // finality certificate can complete after the nonce has already
    // advanced via the notarisation check above.
    if apply_finality(params, accounts, account_id, votes, txs, nonce) {
        advanced = true;
    }

    (advanced, outbox)
}

/// Apply a payment's economic effect once its finality certificate forms.
/// Returns whether `account.nonce` was advanced as a side effect.
fn apply_finality(
    params: &Params,
    accounts: &mut AccountStore,
    account_id: AccountId,
    votes: &VoteStore,
    txs: &TxStore,
    nonce: Nonce,
) -> bool {
    let finalised_before = accounts.get(&account_id).map(|a| a.finalised).unwrap_or(-1);
    if nonce as i64 <= finalised_before {
        return false;
    }

    let votes_at = votes.votes(account_id, nonce);
    if votes_at.is_empty() {
        return false;
    }

    let result = quorum::evaluate(votes_at);
    if result.max_count < params.finality_quorum as usize || result.payload.is_bottom() {
        return false;
    }

    let Some(tx_hash) = result.payload.tx_hash() else {
        return false;
    };
    let Some(tx) = txs.get(&tx_hash) else {
        tracing::warn!(%account_id, nonce, "finality certificate formed but transaction body unavailable");
        return false;
    };

    let orig = match chain_start(tx) {
        Ok(o) => o,
        Err(e) => {
            tracing::warn!(%account_id, nonce, error = %e, "finality certificate references an invalid recovery chain; ignoring");
            return false;
        }
    };

    if orig.nonce as i64 == finalised_before + 1 {
        {
            let sender = accounts.get_or_create(account_id);
            sender.balance = sender.balance.saturating_sub(orig.amount);
        }
        {
            let recipient = accounts.get_or_create(orig.recipient);
            recipient.balance += orig.amount;
        }
        tracing::info!(%account_id, nonce, amount = orig.amount, "payment finalised");
    } else if orig.nonce as i64 == finalised_before {
        tracing::debug!(%account_id, nonce, "tip already executed; advancing finalised only");
    } else {
        tracing::warn!(
            %account_id, nonce, orig_nonce = orig.nonce, finalised = finalised_before,
            "chain-start nonce inconsistent with finalised; ignoring"
        );
        return false;
    }

    let acc = accounts.get_or_create(account_id);
    acc.finalised = nonce as i64;
    if acc.nonce <= nonce {
        acc.nonce = nonce + 1;
        acc.pending = false;
        return true;
    }

    false
}

use std::collections::HashMap;

use novapay_core::error::RecoveryError;
use novapay_core::transaction::{Transaction, TxKind};
use novapay_core::types::{Nonce, SigningPublicKey, ValidatorId};
use novapay_core::vote::Vote;
use novapay_core::{NovaPayError, Params};
use novapay_crypto::{account_id_from_pubkey, verify_vote_signature};
use novapay_store::{AccountStore, VoteStore};

/// Validate an inbound signed transaction against `account`'s current state.
/// Checks run in order and bail on the first failure: one concern per step,
/// composed into a single top-level function.
///
/// 1. Signature recovers to a non-empty `sender`.
/// 2. `account.pending == false`.
/// 3. `tx.nonce == account.nonce`.
/// 4. Branch on recipient: payment balance/gap checks, or recovery chain
///    checks.
///
/// Does not mutate anything; the caller (`Validator::on_transaction`)
/// applies the effects once this returns `Ok`.
pub fn validate_transaction(
    tx: &Transaction,
    accounts: &AccountStore,
    votes: &VoteStore,
    params: &Params,
) -> Result<(), NovaPayError> {
    verify_transaction_signature(tx)?;

    let default = novapay_core::Account::new(tx.sender);
    let account = accounts.get(&tx.sender).unwrap_or(&default);

    if account.pending {
        return Err(NovaPayError::Pending);
    }
    if tx.nonce != account.nonce {
        return Err(NovaPayError::NonceMismatch {
            account_nonce: account.nonce,
            tx_nonce: tx.nonce,
        });
    }

    match tx.kind() {
        TxKind::Payment => {
            if account.finalised + 1 != tx.nonce as i64 {
                return Err(NovaPayError::NotFinalisedPrev {
                    nonce: tx.nonce,
                    finalised: account.finalised,
                });
            }
            if account.balance < tx.amount {
                return Err(NovaPayError::InsufficientBalance {
                    need: tx.amount,
                    have: account.balance,
                });
            }
            Ok(())
        }
        TxKind::Recovery => validate_recovery(tx, votes, params).map_err(NovaPayError::InvalidRecovery),
    }
}

fn verify_transaction_signature(tx: &Transaction) -> Result<(), NovaPayError> {
    if tx.sender != account_id_from_pubkey(&tx.sender_public_key.0) {
        return Err(NovaPayError::BadSignature);
    }
    novapay_crypto::verify_signature(&tx.sender_public_key, &tx.body_bytes(), &tx.signature)
        .map_err(|_| NovaPayError::BadSignature)
}

/// Recovery-specific checks:
/// - `tx.data` decodes to a tip transaction whose sender equals `tx.sender`.
/// - the vote store holds a notarisation certificate for the tip, at the
///   tip's own nonce.
/// - the vote store holds a ⊥ notarisation certificate for every nonce
///   strictly between the tip's nonce and `tx.nonce`.
fn validate_recovery(tx: &Transaction, votes: &VoteStore, params: &Params) -> Result<(), RecoveryError> {
    let tip = tx.decode_tip().map_err(|_| RecoveryError::MissingTip)?;
    if tip.sender != tx.sender {
        return Err(RecoveryError::TipSenderMismatch);
    }

    let tip_hash = tip.hash();
    let tip_cert = novapay_consensus::evaluate(votes.votes(tx.sender, tip.nonce));
    let tip_notarised = tip_cert.payload.tx_hash() == Some(tip_hash)
        && tip_cert.max_count >= params.notarisation_quorum as usize;
    if !tip_notarised {
        return Err(RecoveryError::TipNotNotarised { tip_nonce: tip.nonce });
    }

    for k in (tip.nonce + 1)..tx.nonce {
        let cert = novapay_consensus::evaluate(votes.votes(tx.sender, k));
        let bottom_notarised = cert.payload.is_bottom() && cert.max_count >= params.notarisation_quorum as usize;
        if !bottom_notarised {
            return Err(RecoveryError::IntermediateNotBottom { nonce: k });
        }
    }

    Ok(())
}

/// Verify a peer-submitted vote before admitting it into the local vote
/// store: the signature must recover to `vote.validator`, and
/// that validator must be a member of the configured validator set.
/// Self-generated votes never go through this — the signer trusts its own
/// material.
pub fn verify_peer_vote(
    vote: &Vote,
    validator_keys: &HashMap<ValidatorId, SigningPublicKey>,
) -> Result<(), NovaPayError> {
    let public_key = validator_keys
        .get(&vote.validator)
        .ok_or_else(|| NovaPayError::NotInValidatorSet(vote.validator.to_b58()))?;
    verify_vote_signature(vote, public_key).map_err(|_| NovaPayError::BadSignature)
}

#[cfg(test)]
mod tests {
    use super::*;
    use novapay_core::types::{AccountId, Balance, Signature, RECOVERY_CONTRACT_ADDRESS};
    use novapay_core::Account;
    use novapay_crypto::KeyPair;

    fn params() -> Params {
        Params::new(6, 1).unwrap()
    }

    fn payment(sender: &KeyPair, recipient: AccountId, amount: Balance, nonce: Nonce) -> Transaction {
        let mut tx = Transaction {
            sender: sender.account_id,
            sender_public_key: sender.public_key.clone(),
            recipient,
            amount,
            nonce,
            data: Vec::new(),
            signature: Signature(Vec::new()),
        };
        tx.signature = sender.sign(&tx.body_bytes()).unwrap();
        tx
    }

    fn recovery(sender: &KeyPair, tip: &Transaction, nonce: Nonce) -> Transaction {
        let mut tx = Transaction {
            sender: sender.account_id,
            sender_public_key: sender.public_key.clone(),
            recipient: RECOVERY_CONTRACT_ADDRESS,
            amount: 0,
            nonce,
            data: bincode::serialize(tip).unwrap(),
            signature: Signature(Vec::new()),
        };
        tx.signature = sender.sign(&tx.body_bytes()).unwrap();
        tx
    }

    #[test]
    fn valid_first_payment_passes() {
        let sender = KeyPair::generate();
        let recipient = AccountId::from_bytes([1; 32]);
        let mut accounts = AccountStore::new();
        accounts.seed_genesis([(sender.account_id, 1000u128)]);
        let votes = VoteStore::new();

        let tx = payment(&sender, recipient, 100, 0);
        assert!(validate_transaction(&tx, &accounts, &votes, &params()).is_ok());
    }

    #[test]
    fn tampered_signature_is_rejected() {
        let sender = KeyPair::generate();
        let recipient = AccountId::from_bytes([1; 32]);
        let accounts = AccountStore::new();
        let votes = VoteStore::new();

        let mut tx = payment(&sender, recipient, 100, 0);
        tx.amount = 999; // mutate after signing
        assert!(matches!(
            validate_transaction(&tx, &accounts, &votes, &params()),
            Err(NovaPayError::BadSignature)
        ));
    }

    #[test]
    fn pending_account_rejects_new_transactions() {
        let sender = KeyPair::generate();
        let recipient = AccountId::from_bytes([1; 32]);
        let mut accounts = AccountStore::new();
        accounts.seed_genesis([(sender.account_id, 1000u128)]);
        accounts.get_or_create(sender.account_id).pending = true;
        let votes = VoteStore::new();

        let tx = payment(&sender, recipient, 100, 0);
        assert!(matches!(
            validate_transaction(&tx, &accounts, &votes, &params()),
            Err(NovaPayError::Pending)
        ));
    }

    #[test]
    fn wrong_nonce_is_rejected() {
        let sender = KeyPair::generate();
        let recipient = AccountId::from_bytes([1; 32]);
        let mut accounts = AccountStore::new();
        accounts.seed_genesis([(sender.account_id, 1000u128)]);
        let votes = VoteStore::new();

        let tx = payment(&sender, recipient, 100, 5);
        assert!(matches!(
            validate_transaction(&tx, &accounts, &votes, &params()),
            Err(NovaPayError::NonceMismatch { .. })
        ));
    }

    #[test]
    fn insufficient_balance_is_rejected() {
        let sender = KeyPair::generate();
        let recipient = AccountId::from_bytes([1; 32]);
        let mut accounts = AccountStore::new();
        accounts.seed_genesis([(sender.account_id, 100u128)]);
        let votes = VoteStore::new();

        let tx = payment(&sender, recipient, 200, 0);
        assert!(matches!(
            validate_transaction(&tx, &accounts, &votes, &params()),
            Err(NovaPayError::InsufficientBalance { .. })
        ));
    }

    #[test]
    fn recovery_without_tip_notarisation_is_rejected() {
        let sender = KeyPair::generate();
        let recipient = AccountId::from_bytes([1; 32]);
        let mut accounts = AccountStore::new();
        accounts.seed_genesis([(sender.account_id, 1000u128)]);
        accounts.get_or_create(sender.account_id).nonce = 2;
        let votes = VoteStore::new();

        let tip = payment(&sender, recipient, 100, 0);
        let tx = recovery(&sender, &tip, 2);
        assert!(matches!(
            validate_transaction(&tx, &accounts, &votes, &params()),
            Err(NovaPayError::InvalidRecovery(RecoveryError::TipNotNotarised { .. }))
        ));
    }

    #[test]
    fn recovery_with_full_notarisation_chain_passes() {
        let sender = KeyPair::generate();
        let recipient = AccountId::from_bytes([1; 32]);
        let validators: Vec<KeyPair> = (0..6).map(|_| KeyPair::generate()).collect();

        let mut accounts = AccountStore::new();
        accounts.seed_genesis([(sender.account_id, 1000u128)]);
        accounts.get_or_create(sender.account_id).nonce = 2;
        let mut votes = VoteStore::new();

        let tip = payment(&sender, recipient, 100, 0);
        let tip_hash = tip.hash();
        for v in &validators {
            votes.append(v.cast_vote(
                sender.account_id,
                0,
                novapay_core::types::VotePayload::Tx(tip_hash),
            ));
        }
        for v in &validators {
            votes.append(v.cast_vote(sender.account_id, 1, novapay_core::types::VotePayload::Bottom));
        }

        let tx = recovery(&sender, &tip, 2);
        assert!(validate_transaction(&tx, &accounts, &votes, &params()).is_ok());

        let _ = Account::new(sender.account_id); // exercise the default-account path too
    }
}

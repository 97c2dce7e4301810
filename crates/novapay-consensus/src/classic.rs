use novapay_core::types::{AccountId, Nonce};
use novapay_core::Params;
use novapay_store::{AccountStore, TxStore, VoteStore};

use crate::quorum;

/// The classic 3f+1 comparison variant: a single quorum threshold,
/// no ⊥ sentinel, no recovery chain. Built against [`Params::new_classic`],
/// whose `notarisation_quorum` and `finality_quorum` both equal `n - f`.
///
/// Exists for comparison and tests only — `novapay-node`'s default binary
/// path always wires up [`crate::processor::process`] instead. Unlike the
/// main processor, a sub-quorum split here is a dead end: the account stays
/// `pending` permanently locked, since no bottom-vote unlock exists in this
/// model.
pub fn process_classic(
    params: &Params,
    accounts: &mut AccountStore,
    account_id: AccountId,
    votes: &VoteStore,
    txs: &TxStore,
    entry_nonce: Nonce,
) {
    let mut nonce = entry_nonce;

    loop {
        let acc = accounts.get_or_create(account_id);
        if nonce != acc.nonce || !acc.pending {
            return;
        }

        let votes_at = votes.votes(account_id, nonce);
        let result = quorum::evaluate(votes_at);
        if result.max_count < params.finality_quorum as usize {
            // Sub-quorum split: the account stays locked at this nonce.
            return;
        }

        let Some(tx_hash) = result.payload.tx_hash() else {
            return;
        };
        let Some(tx) = txs.get(&tx_hash) else {
            tracing::warn!(%account_id, nonce, "classic quorum formed but transaction body unavailable");
            return;
        };

        {
            let sender = accounts.get_or_create(account_id);
            sender.balance = sender.balance.saturating_sub(tx.amount);
        }
        {
            let recipient = accounts.get_or_create(tx.recipient);
            recipient.balance += tx.amount;
        }

        let acc = accounts.get_or_create(account_id);
        acc.finalised = nonce as i64;
        acc.nonce = nonce + 1;
        acc.pending = false;
        tracing::info!(%account_id, nonce, "classic quorum reached: payment committed");

        nonce = acc.nonce;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use novapay_core::types::{Balance, Signature, VotePayload};
    use novapay_core::{Transaction, Vote};
    use novapay_crypto::KeyPair;

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

    fn vote_for(validator: &KeyPair, account: AccountId, nonce: Nonce, hash: novapay_core::types::TxHash) -> Vote {
        validator.cast_vote(account, nonce, VotePayload::Tx(hash))
    }

    #[test]
    fn quorum_of_n_minus_f_commits_the_payment() {
        let params = Params::new_classic(4, 1).unwrap();
        let sender = KeyPair::generate();
        let recipient = AccountId::from_bytes([0x11; 32]);
        let validators: Vec<KeyPair> = (0..4).map(|_| KeyPair::generate()).collect();

        let mut accounts = AccountStore::new();
        accounts.seed_genesis([(sender.account_id, 1000u128)]);
        accounts.get_or_create(sender.account_id).pending = true;
        let mut votes = VoteStore::new();
        let mut txs = TxStore::new();

        let tx = payment(&sender, recipient, 100, 0);
        let hash = txs.insert(tx);

        for v in &validators[..3] {
            votes.append(vote_for(v, sender.account_id, 0, hash));
        }

        process_classic(&params, &mut accounts, sender.account_id, &votes, &txs, 0);

        let acc = accounts.get(&sender.account_id).unwrap();
        assert_eq!(acc.nonce, 1);
        assert_eq!(acc.finalised, 0);
        assert!(!acc.pending);
        assert_eq!(acc.balance, 900);
    }

    #[test]
    fn sub_quorum_split_locks_the_account_permanently() {
        let params = Params::new_classic(4, 1).unwrap();
        let sender = KeyPair::generate();
        let recipient_a = AccountId::from_bytes([0x11; 32]);
        let recipient_b = AccountId::from_bytes([0x22; 32]);
        let validators: Vec<KeyPair> = (0..4).map(|_| KeyPair::generate()).collect();

        let mut accounts = AccountStore::new();
        accounts.seed_genesis([(sender.account_id, 1000u128)]);
        accounts.get_or_create(sender.account_id).pending = true;
        let mut votes = VoteStore::new();
        let mut txs = TxStore::new();

        let tx_a = payment(&sender, recipient_a, 100, 0);
        let tx_b = payment(&sender, recipient_b, 100, 0);
        let hash_a = txs.insert(tx_a);
        let hash_b = txs.insert(tx_b);

        votes.append(vote_for(&validators[0], sender.account_id, 0, hash_a));
        votes.append(vote_for(&validators[1], sender.account_id, 0, hash_a));
        votes.append(vote_for(&validators[2], sender.account_id, 0, hash_b));
        votes.append(vote_for(&validators[3], sender.account_id, 0, hash_b));

        process_classic(&params, &mut accounts, sender.account_id, &votes, &txs, 0);

        let acc = accounts.get(&sender.account_id).unwrap();
        assert_eq!(acc.nonce, 0);
        assert!(acc.pending);
        assert_eq!(acc.finalised, -1);
    }
}

use std::collections::HashMap;

use novapay_core::types::{AccountId, Balance, SigningPublicKey, ValidatorId, VotePayload};
use novapay_core::vote::Vote;
use novapay_core::{Account, NovaPayError, Params, RecoveryInfo, Transaction};
use novapay_crypto::KeyPair;
use novapay_recovery::RecoveryQuery;
use novapay_store::{AccountStore, TxStore, VoteStore};

pub mod recovery_chain;
pub mod validate;

pub use recovery_chain::chain_start;
pub use validate::{validate_transaction, verify_peer_vote};

/// One local validator process's state: the account store, vote store, and
/// transaction cache it owns, plus its own signing identity and the public
/// keys of its peers. The top-level facade wiring `novapay-store`,
/// `novapay-consensus`, and `novapay-crypto` together for a single
/// validator.
///
/// Keeps the self-vote and peer-vote ingress paths distinct: [`Validator::on_transaction`] trusts its own signer and appends
/// directly; [`Validator::on_vote`] verifies a peer's signature and
/// validator-set membership first.
pub struct Validator {
    params: Params,
    keypair: KeyPair,
    validator_keys: HashMap<ValidatorId, SigningPublicKey>,
    accounts: AccountStore,
    votes: VoteStore,
    txs: TxStore,
}

impl Validator {
    pub fn new(params: Params, keypair: KeyPair, validator_keys: HashMap<ValidatorId, SigningPublicKey>) -> Self {
        Self {
            params,
            keypair,
            validator_keys,
            accounts: AccountStore::new(),
            votes: VoteStore::new(),
            txs: TxStore::new(),
        }
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn account(&self, id: &AccountId) -> Option<&Account> {
        self.accounts.get(id)
    }

    pub fn accounts(&self) -> &AccountStore {
        &self.accounts
    }

    pub fn votes(&self) -> &VoteStore {
        &self.votes
    }

    /// `get_recovery_info(address)`: the snapshot a client needs
    /// to craft a recovery transaction.
    pub fn recovery_info(&self, account_id: AccountId) -> Result<RecoveryInfo, NovaPayError> {
        RecoveryQuery::new(&self.accounts, &self.votes, &self.params).snapshot(account_id)
    }

    pub fn seed_genesis(&mut self, balances: impl IntoIterator<Item = (AccountId, Balance)>) {
        self.accounts.seed_genesis(balances);
    }

    /// Self-vote fast path: validate, mark the account
    /// `pending`, sign and append a self-vote bypassing peer verification,
    /// then drive the certificate processor. Returns the votes to broadcast
    /// — the self-vote plus any ⊥ vote the processor cast in the same pass.
    pub fn on_transaction(&mut self, tx: Transaction) -> Result<Vec<Vote>, NovaPayError> {
        validate::validate_transaction(&tx, &self.accounts, &self.votes, &self.params)?;

        let sender = tx.sender;
        let nonce = tx.nonce;
        let tx_hash = self.txs.insert(tx);

        self.accounts.get_or_create(sender).pending = true;
        let self_vote = self.keypair.cast_vote(sender, nonce, VotePayload::Tx(tx_hash));
        self.votes.append(self_vote.clone());

        let mut outbox = vec![self_vote];
        outbox.extend(novapay_consensus::process(
            &self.params,
            &mut self.accounts,
            sender,
            &mut self.votes,
            &self.txs,
            self.keypair.account_id,
            &self.keypair,
            nonce,
        ));
        Ok(outbox)
    }

    /// Peer-vote path: verify the vote's signature and
    /// validator-set membership before admitting it, then drive the
    /// certificate processor the same way `on_transaction` does.
    pub fn on_vote(&mut self, vote: Vote) -> Result<Vec<Vote>, NovaPayError> {
        validate::verify_peer_vote(&vote, &self.validator_keys)?;

        let account = vote.account;
        let nonce = vote.nonce;
        self.votes.append(vote);

        Ok(novapay_consensus::process(
            &self.params,
            &mut self.accounts,
            account,
            &mut self.votes,
            &self.txs,
            self.keypair.account_id,
            &self.keypair,
            nonce,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use novapay_core::types::Signature;

    fn make_validators(n: u64) -> (Vec<KeyPair>, HashMap<ValidatorId, SigningPublicKey>) {
        let keys: Vec<KeyPair> = (0..n).map(|_| KeyPair::generate()).collect();
        let map = keys.iter().map(|k| (k.account_id, k.public_key.clone())).collect();
        (keys, map)
    }

    fn payment(sender: &KeyPair, recipient: AccountId, amount: Balance, nonce: u64) -> Transaction {
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

    #[test]
    fn happy_path_across_a_simulated_cluster() {
        let (keys, validator_keys) = make_validators(6);
        let params = Params::new(6, 1).unwrap();
        let sender = KeyPair::generate();
        let recipient = AccountId::from_bytes([0x42; 32]);

        let mut cluster: Vec<Validator> = keys
            .iter()
            .map(|_| {
                let mut v = Validator::new(
                    params,
                    KeyPair::generate(),
                    validator_keys.clone(),
                );
                v.seed_genesis([(sender.account_id, 1000u128)]);
                v
            })
            .collect();
        // Overwrite each simulated validator's identity with the matching
        // cluster key so peer-vote verification lines up across nodes.
        for (v, key) in cluster.iter_mut().zip(keys.into_iter()) {
            *v = {
                let mut nv = Validator::new(params, key, validator_keys.clone());
                nv.seed_genesis([(sender.account_id, 1000u128)]);
                nv
            };
        }

        let tx = payment(&sender, recipient, 100, 0);

        // Validator 0 receives the transaction directly and self-votes.
        let outbox = cluster[0].on_transaction(tx.clone()).unwrap();
        assert_eq!(outbox.len(), 1);
        let self_vote = outbox[0].clone();

        // Every other validator receives the same raw transaction (as a
        // real client broadcast would deliver it) and self-votes too.
        let mut all_votes = vec![self_vote];
        for v in cluster.iter_mut().skip(1) {
            let votes = v.on_transaction(tx.clone()).unwrap();
            all_votes.extend(votes);
        }

        // Gossip: deliver every vote to every validator's peer path.
        for v in cluster.iter_mut() {
            for vote in &all_votes {
                let _ = v.on_vote(vote.clone());
            }
        }

        for v in &cluster {
            let acc = v.account(&sender.account_id).unwrap();
            assert_eq!(acc.nonce, 1);
            assert_eq!(acc.finalised, 0);
            assert_eq!(acc.balance, 900);
        }
    }
}

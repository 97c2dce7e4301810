use novapay_core::types::{AccountId, Nonce};
use novapay_core::vote::{Certificate, Vote};
use novapay_core::{Account, ChainEntry, NovaPayError, Params, RecoveryInfo};
use novapay_store::{AccountStore, VoteStore};

/// Query helpers over one validator's local store, assembling the
/// recovery-info snapshot a client needs. Read-only: never
/// mutates `accounts` or `votes`.
pub struct RecoveryQuery<'a> {
    accounts: &'a AccountStore,
    votes: &'a VoteStore,
    params: &'a Params,
}

impl<'a> RecoveryQuery<'a> {
    pub fn new(accounts: &'a AccountStore, votes: &'a VoteStore, params: &'a Params) -> Self {
        Self { accounts, votes, params }
    }

    /// `get_recovery_info(address)`: the snapshot API.
    pub fn snapshot(&self, account_id: AccountId) -> Result<RecoveryInfo, NovaPayError> {
        snapshot(account_id, self.accounts, self.votes, self.params)
    }
}

/// Reconstruct the certificate backing the winning payload at
/// `(account, nonce)`, or `None` if no votes are stored there at all.
fn certificate_for(account: AccountId, nonce: Nonce, votes_at: &[Vote]) -> Option<Certificate> {
    let result = novapay_consensus::evaluate(votes_at);
    if result.max_count == 0 {
        return None;
    }
    let matching: Vec<Vote> = votes_at
        .iter()
        .filter(|v| v.payload == result.payload)
        .cloned()
        .collect();
    Some(Certificate {
        account,
        nonce,
        payload: result.payload,
        votes: matching,
    })
}

/// `snapshot(account)`: the finalised payload plus the chain of
/// notarisation certificates for every nonce strictly between `finalised`
/// and `nonce`.
///
/// FAILs with `MissingNotarisation` the moment any intermediate nonce lacks
/// a notarisation certificate — an invariant violation, since the account's
/// `nonce` should only ever have advanced past that nonce via (R2)/(R3),
/// both of which require one.
pub fn snapshot(
    account_id: AccountId,
    accounts: &AccountStore,
    votes: &VoteStore,
    params: &Params,
) -> Result<RecoveryInfo, NovaPayError> {
    let default = Account::new(account_id);
    let account = accounts.get(&account_id).unwrap_or(&default);
    let finalised_nonce = account.finalised;
    let current_nonce = account.nonce;

    let (finalised_tx, finality_cert) = if finalised_nonce >= 0 {
        let nonce = finalised_nonce as u64;
        let votes_at = votes.votes(account_id, nonce);
        let result = novapay_consensus::evaluate(votes_at);
        if result.max_count >= params.finality_quorum as usize && !result.payload.is_bottom() {
            let cert = certificate_for(account_id, nonce, votes_at)
                .expect("a non-empty quorum result implies a reconstructible certificate");
            (cert.payload.tx_hash(), Some(cert))
        } else {
            tracing::warn!(
                %account_id, nonce,
                "account.finalised advanced past a nonce with no reconstructible finality certificate"
            );
            (None, None)
        }
    } else {
        (None, None)
    };

    let mut chain = Vec::new();
    let mut nonce = finalised_nonce + 1;
    while nonce < current_nonce as i64 {
        let n = nonce as Nonce;
        let votes_at = votes.votes(account_id, n);
        let result = novapay_consensus::evaluate(votes_at);
        if result.max_count < params.notarisation_quorum as usize {
            return Err(NovaPayError::MissingNotarisation { nonce: n });
        }
        let cert = certificate_for(account_id, n, votes_at)
            .ok_or(NovaPayError::MissingNotarisation { nonce: n })?;
        chain.push(ChainEntry { nonce: n, certificate: cert });
        nonce += 1;
    }

    Ok(RecoveryInfo {
        finalised_nonce,
        finalised_tx,
        finality_cert,
        current_nonce,
        chain,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use novapay_core::types::{Balance, Signature, VotePayload, RECOVERY_CONTRACT_ADDRESS};
    use novapay_core::Transaction;
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

    #[test]
    fn fresh_account_has_empty_snapshot() {
        let accounts = AccountStore::new();
        let votes = VoteStore::new();
        let addr = AccountId::from_bytes([1; 32]);

        let info = snapshot(addr, &accounts, &votes, &params()).unwrap();
        assert_eq!(info.finalised_nonce, -1);
        assert_eq!(info.current_nonce, 0);
        assert!(info.finalised_tx.is_none());
        assert!(info.chain.is_empty());
    }

    #[test]
    fn adjacent_finalised_and_current_nonce_yields_empty_chain() {
        let sender = KeyPair::generate();
        let recipient = AccountId::from_bytes([2; 32]);
        let validators: Vec<KeyPair> = (0..6).map(|_| KeyPair::generate()).collect();

        let mut accounts = AccountStore::new();
        accounts.seed_genesis([(sender.account_id, 1000u128)]);
        {
            let acc = accounts.get_or_create(sender.account_id);
            acc.finalised = 0;
            acc.nonce = 1;
        }
        let mut votes = VoteStore::new();
        let tx = payment(&sender, recipient, 100, 0);
        let hash = tx.hash();
        for v in &validators {
            votes.append(v.cast_vote(sender.account_id, 0, VotePayload::Tx(hash)));
        }

        let info = snapshot(sender.account_id, &accounts, &votes, &params()).unwrap();
        assert_eq!(info.finalised_nonce, 0);
        assert_eq!(info.finalised_tx, Some(hash));
        assert!(info.finality_cert.unwrap().meets(5));
        assert!(info.chain.is_empty());
    }

    #[test]
    fn missing_intermediate_notarisation_is_an_error() {
        let sender = KeyPair::generate();
        let mut accounts = AccountStore::new();
        accounts.seed_genesis([(sender.account_id, 1000u128)]);
        {
            let acc = accounts.get_or_create(sender.account_id);
            acc.finalised = 0;
            acc.nonce = 2; // nonce 1 has advanced, but we never stored any votes for it
        }
        let votes = VoteStore::new();

        let err = snapshot(sender.account_id, &accounts, &votes, &params()).unwrap_err();
        assert!(matches!(err, NovaPayError::MissingNotarisation { nonce: 1 }));
    }

    #[test]
    fn bottom_certificate_is_a_valid_chain_entry() {
        let sender = KeyPair::generate();
        let validators: Vec<KeyPair> = (0..6).map(|_| KeyPair::generate()).collect();

        let mut accounts = AccountStore::new();
        accounts.seed_genesis([(sender.account_id, 1000u128)]);
        {
            let acc = accounts.get_or_create(sender.account_id);
            acc.finalised = 0;
            acc.nonce = 2;
        }
        let mut votes = VoteStore::new();
        for v in &validators {
            votes.append(v.cast_vote(sender.account_id, 0, VotePayload::Bottom));
        }
        // Finalised via recovery rather than payment: no non-bottom finality
        // certificate exists at nonce 0, which is allowed — `finality_cert`
        // is just `None` in that case.
        for v in &validators[..3] {
            votes.append(v.cast_vote(sender.account_id, 1, VotePayload::Bottom));
        }

        let info = snapshot(sender.account_id, &accounts, &votes, &params()).unwrap();
        assert_eq!(info.chain.len(), 1);
        assert!(info.chain[0].certificate.payload.is_bottom());
        assert!(info.recovery_tip().is_none());
    }

    #[test]
    fn recovery_tip_prefers_latest_non_bottom_chain_entry() {
        let sender = KeyPair::generate();
        let recipient = AccountId::from_bytes([3; 32]);
        let validators: Vec<KeyPair> = (0..6).map(|_| KeyPair::generate()).collect();

        let mut accounts = AccountStore::new();
        accounts.seed_genesis([(sender.account_id, 1000u128)]);
        {
            let acc = accounts.get_or_create(sender.account_id);
            acc.finalised = 0;
            acc.nonce = 3;
        }
        let mut votes = VoteStore::new();

        let finalised_tx = payment(&sender, recipient, 100, 0);
        let finalised_hash = finalised_tx.hash();
        for v in &validators {
            votes.append(v.cast_vote(sender.account_id, 0, VotePayload::Tx(finalised_hash)));
        }

        let mut equivocating = Transaction {
            sender: sender.account_id,
            sender_public_key: sender.public_key.clone(),
            recipient: RECOVERY_CONTRACT_ADDRESS,
            amount: 0,
            nonce: 1,
            data: bincode::serialize(&finalised_tx).unwrap(),
            signature: Signature(Vec::new()),
        };
        equivocating.signature = sender.sign(&equivocating.body_bytes()).unwrap();
        let recovery_hash = equivocating.hash();
        for v in &validators[..3] {
            votes.append(v.cast_vote(sender.account_id, 1, VotePayload::Tx(recovery_hash)));
        }
        for v in &validators {
            votes.append(v.cast_vote(sender.account_id, 2, VotePayload::Bottom));
        }

        let info = snapshot(sender.account_id, &accounts, &votes, &params()).unwrap();
        assert_eq!(info.chain.len(), 2);
        assert_eq!(info.recovery_tip(), Some(recovery_hash));
    }
}

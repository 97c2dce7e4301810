use novapay_core::types::{AccountId, Nonce, SigningPublicKey, VotePayload};
use novapay_core::vote::Vote;

use crate::keypair::KeyPair;
use crate::sign::{verify_signature, SignatureError};

impl KeyPair {
    /// Cast and sign a vote for `(account, nonce, payload)` as this
    /// validator. Used for both the self-vote fast path and ⊥-vote casting.
    pub fn cast_vote(&self, account: AccountId, nonce: Nonce, payload: VotePayload) -> Vote {
        let unsigned = Vote {
            validator: self.account_id,
            account,
            nonce,
            payload,
            signature: novapay_core::types::Signature(Vec::new()),
        };
        let signature = self
            .sign(&unsigned.body_bytes())
            .expect("signing with a freshly generated secret key is infallible");
        Vote {
            signature,
            ..unsigned
        }
    }
}

/// Verify a peer-submitted vote's signature against the claimed validator's
/// public key. The caller is responsible for checking that
/// `validator` is actually in the configured validator set; this function
/// only checks the cryptographic binding.
pub fn verify_vote_signature(
    vote: &Vote,
    validator_public_key: &SigningPublicKey,
) -> Result<(), SignatureError> {
    verify_signature(validator_public_key, &vote.body_bytes(), &vote.signature)
}

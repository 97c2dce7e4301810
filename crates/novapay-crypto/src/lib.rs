pub mod hash;
pub mod keypair;
pub mod sign;
pub mod votes;

pub use hash::{account_id_from_pubkey, blake3_hash};
pub use keypair::KeyPair;
pub use sign::{sign, verify_signature, SignatureError};
pub use votes::verify_vote_signature;

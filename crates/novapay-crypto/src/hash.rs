use novapay_core::types::AccountId;

/// Compute BLAKE3 hash of arbitrary bytes → 32-byte array.
pub fn blake3_hash(data: &[u8]) -> [u8; 32] {
    *blake3::hash(data).as_bytes()
}

/// Derive an [`AccountId`] from raw public key bytes using BLAKE3.
pub fn account_id_from_pubkey(pubkey_bytes: &[u8]) -> AccountId {
    AccountId::from_bytes(blake3_hash(pubkey_bytes))
}

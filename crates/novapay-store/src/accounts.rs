use std::collections::HashMap;

use novapay_core::account::Account;
use novapay_core::types::{AccountId, Balance};

/// Per-address mutable state store. Pure in-memory — no
/// persistence is part of this core.
#[derive(Debug, Default)]
pub struct AccountStore {
    accounts: HashMap<AccountId, Account>,
}

impl AccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch (auto-creating with defaults and zero balance) a mutable
    /// reference to `addr`'s account.
    pub fn get_or_create(&mut self, addr: AccountId) -> &mut Account {
        self.accounts
            .entry(addr)
            .or_insert_with(|| Account::new(addr))
    }

    /// Read-only lookup; `None` if the account has never been referenced.
    pub fn get(&self, addr: &AccountId) -> Option<&Account> {
        self.accounts.get(addr)
    }

    /// Seed a set of genesis balances. Only meaningful before any
    /// transaction activity; re-seeding an already-active account
    /// overwrites its balance but leaves `nonce`/`pending`/`finalised`
    /// untouched if the account already exists.
    pub fn seed_genesis(&mut self, balances: impl IntoIterator<Item = (AccountId, Balance)>) {
        for (addr, balance) in balances {
            self.accounts
                .entry(addr)
                .and_modify(|a| a.balance = balance)
                .or_insert_with(|| Account::genesis(addr, balance));
        }
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_creates_with_zero_balance() {
        let mut store = AccountStore::new();
        let addr = AccountId::from_bytes([1u8; 32]);
        let acc = store.get_or_create(addr);
        assert_eq!(acc.balance, 0);
        assert_eq!(acc.nonce, 0);
        assert_eq!(acc.finalised, -1);
    }

    #[test]
    fn seed_genesis_sets_balance() {
        let mut store = AccountStore::new();
        let addr = AccountId::from_bytes([2u8; 32]);
        store.seed_genesis([(addr, 1000u128)]);
        assert_eq!(store.get(&addr).unwrap().balance, 1000);
    }
}

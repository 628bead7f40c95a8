//! In-Memory Account Keeper
//!
//! Implements the `AccountKeeper` port over a locked hash map, for embedding
//! and tests.

use crate::ports::outbound::AccountKeeper;
use parking_lot::RwLock;
use shared_types::{AccAddress, Account};
use std::collections::HashMap;
use tracing::debug;

/// Account store held in memory.
#[derive(Debug, Default)]
pub struct InMemoryAccountKeeper {
    accounts: RwLock<HashMap<AccAddress, Account>>,
}

impl InMemoryAccountKeeper {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an account.
    pub fn set_account(&self, account: Account) {
        self.accounts.write().insert(account.address, account);
    }

    /// Advance an account's sequence by one, as the sequence-increment step
    /// after a committed transaction does. Returns the new sequence.
    pub fn increment_sequence(&self, address: &AccAddress) -> Option<u64> {
        let mut accounts = self.accounts.write();
        let account = accounts.get_mut(address)?;
        account.sequence = account.sequence.saturating_add(1);

        debug!(address = %address, sequence = account.sequence, "Account sequence advanced");
        Some(account.sequence)
    }
}

impl AccountKeeper for InMemoryAccountKeeper {
    fn get_account(&self, address: &AccAddress) -> Option<Account> {
        self.accounts.read().get(address).cloned()
    }
}

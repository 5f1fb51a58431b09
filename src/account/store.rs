//! Persistence collaborator for accounts.
//!
//! The auth core only needs four lookups, each atomic at single-account
//! granularity; real deployments put a database behind this trait.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use uuid::Uuid;

use crate::prelude::*;

use super::Account;

pub trait AccountStore: Send + Sync {
    fn find_by_id(&self, id: &Uuid) -> Result<Option<Account>>;
    /// Lookup by email. Callers pass an already normalized address, see
    /// [`super::normalize_email`].
    fn find_by_email(&self, email: &str) -> Result<Option<Account>>;
    fn find_by_reset_hash(&self, token_hash: &str) -> Result<Option<Account>>;
    /// Insert or replace the whole record in one step.
    fn save(&self, account: &Account) -> Result<()>;
}

/// Mutex-guarded in-memory store, used by tests and the demo server.
#[derive(Debug, Default)]
pub struct MemoryStore {
    accounts: Mutex<HashMap<Uuid, Account>>,
}

impl MemoryStore {
    fn lock(&self) -> Result<MutexGuard<'_, HashMap<Uuid, Account>>> {
        self.accounts
            .lock()
            .map_err(|_| Error::Generic(String::from("account store mutex poisoned")))
    }
}

impl AccountStore for MemoryStore {
    fn find_by_id(&self, id: &Uuid) -> Result<Option<Account>> {
        Ok(self.lock()?.get(id).cloned())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
        Ok(self.lock()?.values().find(|a| a.email == email).cloned())
    }

    fn find_by_reset_hash(&self, token_hash: &str) -> Result<Option<Account>> {
        Ok(self
            .lock()?
            .values()
            .find(|a| a.password_reset_token_hash.as_deref() == Some(token_hash))
            .cloned())
    }

    fn save(&self, account: &Account) -> Result<()> {
        self.lock()?.insert(account.id, account.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::Role;

    fn account(email: &str) -> Account {
        Account::new(
            String::from("Test"),
            String::from(email),
            String::from("hash"),
            Role::User,
        )
    }

    #[test]
    fn save_and_find() {
        let store = MemoryStore::default();
        let account = account("a@example.com");
        store.save(&account).unwrap();

        assert_eq!(store.find_by_id(&account.id).unwrap().unwrap().id, account.id);
        assert_eq!(
            store.find_by_email("a@example.com").unwrap().unwrap().id,
            account.id
        );
        assert!(store.find_by_email("b@example.com").unwrap().is_none());
    }

    #[test]
    fn save_replaces_existing_record() {
        let store = MemoryStore::default();
        let mut account = account("a@example.com");
        store.save(&account).unwrap();

        account.set_reset_token(String::from("reset-hash"), chrono::TimeDelta::minutes(10));
        store.save(&account).unwrap();

        let found = store.find_by_reset_hash("reset-hash").unwrap().unwrap();
        assert_eq!(found.id, account.id);
    }
}

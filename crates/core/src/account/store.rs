use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user. Credentials are kept in plain text: this is a
/// local demo store, not an authentication system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    pub mail: String,
}

impl Account {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        mail: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            password: password.into(),
            mail: mail.into(),
        }
    }
}

/// Account storage seam. Swap the backing store without touching login logic.
pub trait AccountStore: Send + Sync {
    fn find_by_username(&self, username: &str) -> Option<&Account>;

    /// Insert an account. Returns false if the username already exists.
    fn insert(&mut self, account: Account) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-local account store keyed by username.
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    accounts: HashMap<String, Account>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-loaded with the `demo` / `demo123` account.
    pub fn with_demo_account() -> Self {
        let mut store = Self::new();
        store.insert(Account::new("demo", "demo123", "demo@example.com"));
        store
    }
}

impl AccountStore for InMemoryAccountStore {
    fn find_by_username(&self, username: &str) -> Option<&Account> {
        self.accounts.get(username)
    }

    fn insert(&mut self, account: Account) -> bool {
        if self.accounts.contains_key(&account.username) {
            return false;
        }
        self.accounts.insert(account.username.clone(), account);
        true
    }

    fn len(&self) -> usize {
        self.accounts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_account_seeded() {
        let store = InMemoryAccountStore::with_demo_account();
        let demo = store.find_by_username("demo").unwrap();
        assert_eq!(demo.password, "demo123");
        assert_eq!(demo.mail, "demo@example.com");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn insert_rejects_duplicate_username() {
        let mut store = InMemoryAccountStore::new();
        assert!(store.is_empty());
        assert!(store.insert(Account::new("kim", "pw", "kim@example.com")));
        assert!(!store.insert(Account::new("kim", "other", "kim2@example.com")));
        assert_eq!(store.find_by_username("kim").unwrap().password, "pw");
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let store = InMemoryAccountStore::with_demo_account();
        assert!(store.find_by_username("Demo").is_none());
    }

    #[test]
    fn password_not_serialized() {
        let json = serde_json::to_string(&Account::new("a", "secret", "a@b.c")).unwrap();
        assert!(!json.contains("secret"));
    }
}

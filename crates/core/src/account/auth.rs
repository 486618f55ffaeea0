use super::store::{Account, AccountStore};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("please fill in all fields")]
    MissingFields,
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("username '{0}' is already taken")]
    UsernameTaken(String),
}

/// Login and registration over any [`AccountStore`].
#[derive(Debug)]
pub struct Authenticator<S> {
    store: S,
}

impl<S: AccountStore> Authenticator<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Look up a user and check the password.
    pub fn login(&self, username: &str, password: &str) -> Result<Account, AccountError> {
        if username.is_empty() || password.is_empty() {
            return Err(AccountError::MissingFields);
        }
        match self.store.find_by_username(username) {
            Some(account) if account.password == password => {
                tracing::info!(user = username, "login succeeded");
                Ok(account.clone())
            }
            _ => {
                tracing::warn!(user = username, "login rejected");
                Err(AccountError::InvalidCredentials)
            }
        }
    }

    /// Create an account and return it, already logged in.
    pub fn register(
        &mut self,
        username: &str,
        password: &str,
        mail: &str,
    ) -> Result<Account, AccountError> {
        if username.is_empty() || password.is_empty() || mail.is_empty() {
            return Err(AccountError::MissingFields);
        }
        let account = Account::new(username, password, mail);
        if !self.store.insert(account.clone()) {
            tracing::warn!(user = username, "registration rejected: username taken");
            return Err(AccountError::UsernameTaken(username.to_owned()));
        }
        tracing::info!(user = username, id = %account.id, "account registered");
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::store::InMemoryAccountStore;

    fn auth() -> Authenticator<InMemoryAccountStore> {
        Authenticator::new(InMemoryAccountStore::with_demo_account())
    }

    #[test]
    fn demo_login() {
        let account = auth().login("demo", "demo123").unwrap();
        assert_eq!(account.username, "demo");
    }

    #[test]
    fn wrong_password() {
        assert_eq!(auth().login("demo", "nope"), Err(AccountError::InvalidCredentials));
        assert_eq!(auth().login("ghost", "demo123"), Err(AccountError::InvalidCredentials));
    }

    #[test]
    fn empty_fields() {
        assert_eq!(auth().login("", "demo123"), Err(AccountError::MissingFields));
        assert_eq!(auth().login("demo", ""), Err(AccountError::MissingFields));
        assert_eq!(auth().register("new", "pw", ""), Err(AccountError::MissingFields));
    }

    #[test]
    fn register_then_login() {
        let mut auth = auth();
        let created = auth.register("sam", "pw1", "sam@example.com").unwrap();
        let logged_in = auth.login("sam", "pw1").unwrap();
        assert_eq!(created.id, logged_in.id);
        assert_eq!(auth.store().len(), 2);
    }

    #[test]
    fn register_duplicate() {
        let mut auth = auth();
        assert_eq!(
            auth.register("demo", "x", "x@example.com"),
            Err(AccountError::UsernameTaken("demo".into()))
        );
        // original credentials untouched
        assert!(auth.login("demo", "demo123").is_ok());
    }
}

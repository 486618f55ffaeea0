pub mod auth;
pub mod store;

pub use auth::{AccountError, Authenticator};
pub use store::{Account, AccountStore, InMemoryAccountStore};

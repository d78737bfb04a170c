use crate::domain_model::Account;

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("No such domain: {0}")]
    UnknownDomain(String),
    #[error("account already exists")]
    AccountExists,
    #[error("store error: {0}")]
    Store(String),
    #[error("internal error: {0}")]
    InternalError(String),
}

#[async_trait::async_trait]
pub trait CredentialHasher: Send + Sync {
    async fn hash_password(&self, password: &str) -> Result<String, AccountError>;
    async fn verify_password(
        &self,
        password: &str,
        password_hash: &str,
    ) -> Result<bool, AccountError>;
}

/// Checks a username/password pair and hands back the account it belongs to.
#[async_trait::async_trait]
pub trait AccountAuthenticator: Send + Sync {
    async fn authenticate(&self, username: &str, password: &str) -> Result<Account, AccountError>;
}

use crate::application_port::AccountError;
use crate::domain_model::{Account, Uid};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct AccountRecord {
    pub uid: Uid,
    pub username: String,
    pub password_hash: String,
    pub private_key: String,
    pub encrypted_private_key: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<AccountRecord> for Account {
    fn from(rec: AccountRecord) -> Self {
        Account {
            uid: rec.uid,
            username: rec.username,
            private_key: rec.private_key,
            encrypted_private_key: rec.encrypted_private_key,
        }
    }
}

#[async_trait::async_trait]
pub trait AccountRepo: Send + Sync {
    /// Fails with `AccountExists` if the username is already taken.
    async fn insert(&self, record: AccountRecord) -> Result<(), AccountError>;

    /// Fetch an account by username (for login).
    async fn get_by_username(&self, username: &str) -> Result<Option<AccountRecord>, AccountError>;
}

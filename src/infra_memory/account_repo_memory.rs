use crate::application_port::AccountError;
use crate::domain_port::{AccountRecord, AccountRepo};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

/// Accounts keyed by lowercased username.
#[derive(Debug, Default)]
pub struct MemoryAccountRepo {
    accounts: DashMap<String, AccountRecord>,
}

impl MemoryAccountRepo {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn key(username: &str) -> String {
        username.to_lowercase()
    }
}

#[async_trait::async_trait]
impl AccountRepo for MemoryAccountRepo {
    async fn insert(&self, record: AccountRecord) -> Result<(), AccountError> {
        match self.accounts.entry(Self::key(&record.username)) {
            Entry::Occupied(_) => Err(AccountError::AccountExists),
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(())
            }
        }
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<AccountRecord>, AccountError> {
        Ok(self
            .accounts
            .get(&Self::key(username))
            .map(|rec| rec.value().clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_model::Uid;
    use chrono::Utc;

    fn record(username: &str) -> AccountRecord {
        AccountRecord {
            uid: Uid(uuid::Uuid::new_v4()),
            username: username.to_string(),
            password_hash: "hash".to_string(),
            private_key: "key".to_string(),
            encrypted_private_key: "key".to_string(),
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn lookup_ignores_username_case() {
        let repo = MemoryAccountRepo::new();
        let rec = record("Alice");
        repo.insert(rec.clone()).await.unwrap();

        let found = repo.get_by_username("alice").await.unwrap().unwrap();
        assert_eq!(found.uid, rec.uid);
        assert!(repo.get_by_username("bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let repo = MemoryAccountRepo::new();
        repo.insert(record("alice")).await.unwrap();
        assert!(matches!(
            repo.insert(record("ALICE")).await,
            Err(AccountError::AccountExists)
        ));
    }
}

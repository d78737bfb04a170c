use crate::application_port::{AccountAuthenticator, AccountError};
use crate::domain_model::{Account, Uid};

pub const FAKE_PASSWORD: &str = "correct";
/// Authenticates fine but carries no usable key material.
pub const FAKE_BROKEN_KEY_USER: &str = "broken-key";

/// Accepts any username with [`FAKE_PASSWORD`] and hands out the same key
/// ring to everyone.
#[derive(Debug)]
pub struct FakeAccountAuthenticator {
    private_key: String,
}

impl FakeAccountAuthenticator {
    pub fn new(private_key: impl Into<String>) -> Self {
        Self {
            private_key: private_key.into(),
        }
    }
}

// Minimal fake for local runs and tests.
#[async_trait::async_trait]
impl AccountAuthenticator for FakeAccountAuthenticator {
    async fn authenticate(&self, username: &str, password: &str) -> Result<Account, AccountError> {
        if password != FAKE_PASSWORD {
            return Err(AccountError::InvalidCredentials);
        }

        let private_key = if username == FAKE_BROKEN_KEY_USER {
            String::new()
        } else {
            self.private_key.clone()
        };
        Ok(Account {
            uid: get_fake_id(username),
            username: username.to_string(),
            encrypted_private_key: private_key.clone(),
            private_key,
        })
    }
}

fn get_fake_id(username: &str) -> Uid {
    Uid(uuid::Uuid::new_v5(
        &uuid::Uuid::NAMESPACE_OID,
        username.as_bytes(),
    ))
}

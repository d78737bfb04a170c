use crate::application_port::{AccountAuthenticator, AccountError, CredentialHasher};
use crate::domain_model::Account;
use crate::domain_port::{AccountRepo, DomainStore, DomainStoreError};
use crate::logger::*;
use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use std::sync::Arc;

/// Argon2id with default parameters. Hashing runs on the blocking pool.
pub struct Argon2PasswordHasher;

#[async_trait::async_trait]
impl CredentialHasher for Argon2PasswordHasher {
    async fn hash_password(&self, password: &str) -> Result<String, AccountError> {
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            Argon2::default()
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|e| AccountError::InternalError(e.to_string()))
        })
        .await
        .map_err(|e| AccountError::InternalError(e.to_string()))?
    }

    async fn verify_password(
        &self,
        password: &str,
        password_hash: &str,
    ) -> Result<bool, AccountError> {
        let password = password.to_owned();
        let password_hash = password_hash.to_owned();
        tokio::task::spawn_blocking(move || {
            let parsed = PasswordHash::new(&password_hash)
                .map_err(|e| AccountError::InternalError(format!("invalid PHC hash: {e}")))?;

            match Argon2::default().verify_password(password.as_bytes(), &parsed) {
                Ok(_) => Ok(true),
                Err(argon2::password_hash::Error::Password) => Ok(false),
                Err(e) => Err(AccountError::InternalError(format!("verify error: {e}"))),
            }
        })
        .await
        .map_err(|e| AccountError::InternalError(e.to_string()))?
    }
}

/// Resolves `name` or `name@domain` against the directory and the account
/// repository, then checks the password.
pub struct RealAccountAuthenticator {
    account_repo: Arc<dyn AccountRepo>,
    domain_store: Arc<dyn DomainStore>,
    credential_hasher: Arc<dyn CredentialHasher>,
}

impl RealAccountAuthenticator {
    pub fn new(
        account_repo: Arc<dyn AccountRepo>,
        domain_store: Arc<dyn DomainStore>,
        credential_hasher: Arc<dyn CredentialHasher>,
    ) -> Self {
        Self {
            account_repo,
            domain_store,
            credential_hasher,
        }
    }

    async fn resolve_local_part<'a>(&self, username: &'a str) -> Result<&'a str, AccountError> {
        let Some((local, domain)) = username.rsplit_once('@') else {
            return Ok(username);
        };

        match self.domain_store.get_domain_by_name(domain).await {
            Ok(_) => Ok(local),
            Err(DomainStoreError::NotFound) => Err(AccountError::UnknownDomain(domain.to_string())),
            Err(e) => Err(AccountError::Store(e.to_string())),
        }
    }
}

#[async_trait::async_trait]
impl AccountAuthenticator for RealAccountAuthenticator {
    async fn authenticate(&self, username: &str, password: &str) -> Result<Account, AccountError> {
        let local = self.resolve_local_part(username).await?;

        let rec = self
            .account_repo
            .get_by_username(local)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        if !rec.is_active {
            debug!(uid = %rec.uid, "login attempt on inactive account");
            return Err(AccountError::InvalidCredentials);
        }

        let ok = self
            .credential_hasher
            .verify_password(password, &rec.password_hash)
            .await?;
        if !ok {
            return Err(AccountError::InvalidCredentials);
        }

        Ok(rec.into())
    }
}

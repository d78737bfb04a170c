use crate::application_impl::*;
use crate::application_port::*;
use crate::domain_model::{DomainRecord, Uid};
use crate::domain_port::*;
use crate::infra_crypto::{KeyRing, PgpTokenSealer, can_receive};
use crate::infra_memory::*;
use crate::logger::*;
use crate::settings::{AccountSeed, Settings};
use anyhow::Context;
use chrono::Utc;
use nanoid::nanoid;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Composition root. Owns every store and hands the services to the HTTP layer.
pub struct Server {
    pub auth_service: Arc<dyn AuthService>,
    pub domain_service: Arc<dyn DomainService>,
    cancel: CancellationToken,
}

impl Server {
    pub fn new(auth_service: Arc<dyn AuthService>, domain_service: Arc<dyn DomainService>) -> Self {
        Self {
            auth_service,
            domain_service,
            cancel: CancellationToken::new(),
        }
    }

    pub async fn try_new(settings: &Settings) -> anyhow::Result<Self> {
        let alphabet: [char; 16] = [
            '1', '2', '3', '4', '5', '6', '7', '8', '9', '0', 'a', 'b', 'c', 'd', 'e', 'f',
        ];
        let run_id = nanoid!(10, &alphabet);

        let domain_store: Arc<dyn DomainStore> = Arc::new(MemoryDomainStore::new());
        for name in &settings.directory.domains {
            let domain = domain_store
                .insert_domain(DomainRecord::new(name.clone()))
                .await
                .with_context(|| format!("seeding domain {name:?}"))?;
            debug!(id = %domain.id, name = %domain.name, "domain registered");
        }

        let account_repo: Arc<dyn AccountRepo> = Arc::new(MemoryAccountRepo::new());
        let credential_hasher: Arc<dyn CredentialHasher> = Arc::new(Argon2PasswordHasher);
        for seed in &settings.accounts {
            seed_account(account_repo.as_ref(), credential_hasher.as_ref(), seed)
                .await
                .with_context(|| format!("seeding account {:?}", seed.username))?;
        }

        let authenticator: Arc<dyn AccountAuthenticator> = match settings.auth.backend.as_str() {
            "fake" => Arc::new(FakeAccountAuthenticator::new(KeyRing::generate_armored(
                "fake@localhost",
            )?)),
            "real" => Arc::new(RealAccountAuthenticator::new(
                account_repo,
                domain_store.clone(),
                credential_hasher,
            )),
            other => return Err(anyhow::anyhow!("Unknown auth backend: {}", other)),
        };

        let token_sealer: Arc<dyn TokenSealer> = Arc::new(PgpTokenSealer::new());
        let timeouts = AuthTimeouts {
            authenticate: Duration::from_millis(settings.auth.authenticate_timeout_ms),
            seal: Duration::from_millis(settings.auth.seal_timeout_ms),
        };
        let auth_service: Arc<dyn AuthService> = Arc::new(RealAuthService::new(
            authenticator,
            token_sealer,
            TokenPolicy::default(),
            timeouts,
        ));
        let domain_service: Arc<dyn DomainService> =
            Arc::new(RealDomainService::new(domain_store));

        info!(
            run_id = %run_id,
            backend = %settings.auth.backend,
            domains = settings.directory.domains.len(),
            accounts = settings.accounts.len(),
            "server started"
        );

        Ok(Self::new(auth_service, domain_service))
    }

    /// Resolves once [`Server::shutdown`] has been called.
    pub async fn shutdown_signal(&self) {
        self.cancel.cancelled().await
    }

    pub async fn shutdown(&self) {
        info!("server shutting down...");
        self.cancel.cancel();
    }
}

async fn seed_account(
    repo: &dyn AccountRepo,
    hasher: &dyn CredentialHasher,
    seed: &AccountSeed,
) -> anyhow::Result<()> {
    let private_key = match &seed.private_key_path {
        Some(path) => {
            let text = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("reading key ring {path:?}"))?;
            let ring = KeyRing::parse_armored(&text)?;
            match ring.primary() {
                None => return Err(anyhow::anyhow!("key ring {:?} contains no key", path)),
                Some(primary) if !can_receive(primary) => {
                    return Err(anyhow::anyhow!(
                        "primary key in {:?} has no encryption key",
                        path
                    ));
                }
                Some(_) => {}
            }
            text
        }
        None => {
            warn!(username = %seed.username, "no key ring configured, generating one");
            KeyRing::generate_armored(&seed.username)?
        }
    };

    let password_hash = hasher.hash_password(&seed.password).await?;
    let uid = Uid(uuid::Uuid::new_v4());
    repo.insert(AccountRecord {
        uid,
        username: seed.username.clone(),
        password_hash,
        encrypted_private_key: private_key.clone(),
        private_key,
        is_active: true,
        created_at: Utc::now(),
    })
    .await?;

    debug!(%uid, username = %seed.username, "account registered");
    Ok(())
}

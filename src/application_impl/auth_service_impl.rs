use crate::application_port::*;
use crate::domain_model::{Account, GRANT_PASSWORD, GRANT_REFRESH_TOKEN, GrantType};
use crate::logger::*;
use nanoid::nanoid;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;
use tracing::{Instrument, info_span};

#[derive(Debug, Clone, Copy)]
pub struct AuthTimeouts {
    pub authenticate: Duration,
    pub seal: Duration,
}

impl Default for AuthTimeouts {
    fn default() -> Self {
        AuthTimeouts {
            authenticate: Duration::from_secs(5),
            seal: Duration::from_secs(5),
        }
    }
}

/// Grant dispatcher.
///
/// `password`: authenticate, seal [`ACCESS_TOKEN_PAYLOAD`] to the account's
/// primary key, answer with a full [`AuthResponse`]. Every failure along the
/// way ends the request with exactly one [`AuthError`].
///
/// `refresh_token`: checked, then refused with [`AuthError::NotImplemented`].
pub struct RealAuthService {
    authenticator: Arc<dyn AccountAuthenticator>,
    sealer: Arc<dyn TokenSealer>,
    policy: TokenPolicy,
    timeouts: AuthTimeouts,
}

impl RealAuthService {
    pub fn new(
        authenticator: Arc<dyn AccountAuthenticator>,
        sealer: Arc<dyn TokenSealer>,
        policy: TokenPolicy,
        timeouts: AuthTimeouts,
    ) -> Self {
        Self {
            authenticator,
            sealer,
            policy,
            timeouts,
        }
    }

    async fn authenticate(&self, username: &str, password: &str) -> Result<Account, AuthError> {
        let attempt = self.authenticator.authenticate(username, password);
        match tokio::time::timeout(self.timeouts.authenticate, attempt).await {
            Ok(Ok(account)) => Ok(account),
            Ok(Err(e)) => {
                debug!(username, error = %e, "credentials rejected");
                Err(AuthError::Rejected(e.to_string()))
            }
            Err(_) => {
                warn!(username, "account authentication timed out");
                Err(AuthError::Unavailable(
                    "account authentication timed out".to_string(),
                ))
            }
        }
    }

    async fn seal_access_token(&self, account: &Account) -> Result<String, AuthError> {
        let sealer = self.sealer.clone();
        let key_material = account.private_key.clone();
        let task =
            tokio::task::spawn_blocking(move || sealer.seal(ACCESS_TOKEN_PAYLOAD, &key_material));

        match tokio::time::timeout(self.timeouts.seal, task).await {
            Ok(Ok(Ok(envelope))) => Ok(envelope),
            Ok(Ok(Err(e))) => Err(AuthError::InvalidKey(e.to_string())),
            Ok(Err(e)) => Err(AuthError::InvalidKey(format!("sealing task failed: {e}"))),
            Err(_) => Err(AuthError::InvalidKey(
                "sealing the access token timed out".to_string(),
            )),
        }
    }

    async fn password_grant(&self, request: AuthRequest) -> Result<AuthResponse, AuthError> {
        if request.grant_type != Some(GrantType::Password) {
            debug!(grant_type = ?request.grant_type, "unsupported grant");
            return Err(AuthError::InvalidGrant {
                expected: GRANT_PASSWORD,
            });
        }

        let account = self
            .authenticate(&request.username, &request.password)
            .await?;

        let access_token = self
            .seal_access_token(&account)
            .await
            .inspect_err(|e| warn!(uid = %account.uid, error = %e, "cannot seal access token"))?;

        info!(uid = %account.uid, "password grant issued");
        Ok(AuthResponse::granted(account, access_token, &self.policy))
    }
}

#[async_trait::async_trait]
impl AuthService for RealAuthService {
    async fn auth(&self, request: AuthRequest) -> Result<AuthResponse, AuthError> {
        let span = info_span!("auth", request_id = %nanoid!(10));
        self.password_grant(request).instrument(span).await
    }

    async fn auth_cookies(&self, request: AuthCookiesRequest) -> Result<Infallible, AuthError> {
        if request.grant_type != Some(GrantType::RefreshToken) {
            return Err(AuthError::InvalidGrant {
                expected: GRANT_REFRESH_TOKEN,
            });
        }
        debug!(client_id = %request.client_id, "refresh grant requested");
        Err(AuthError::NotImplemented)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_model::Uid;
    use crate::infra_crypto::{KeyRing, PgpTokenSealer};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubAuthenticator {
        account: Account,
        password: &'static str,
        delay: Option<Duration>,
        calls: AtomicUsize,
    }

    impl StubAuthenticator {
        fn new(private_key: String) -> Self {
            StubAuthenticator {
                account: Account {
                    uid: Uid(uuid::Uuid::new_v4()),
                    username: "alice".to_string(),
                    encrypted_private_key: private_key.clone(),
                    private_key,
                },
                password: "correct",
                delay: None,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait::async_trait]
    impl AccountAuthenticator for StubAuthenticator {
        async fn authenticate(
            &self,
            username: &str,
            password: &str,
        ) -> Result<Account, AccountError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if username == self.account.username && password == self.password {
                Ok(self.account.clone())
            } else {
                Err(AccountError::InvalidCredentials)
            }
        }
    }

    #[derive(Default)]
    struct CountingSealer {
        inner: PgpTokenSealer,
        calls: AtomicUsize,
    }

    impl TokenSealer for CountingSealer {
        fn seal(&self, plaintext: &str, key_material: &str) -> Result<String, SealError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.seal(plaintext, key_material)
        }

        fn open(&self, envelope: &str, key_material: &str) -> Result<String, SealError> {
            self.inner.open(envelope, key_material)
        }
    }

    fn test_key() -> String {
        KeyRing::generate_armored("alice@example.com").unwrap()
    }

    /// Blocks the sealing thread, or panics in it.
    enum StuckSealer {
        Sleep(Duration),
        Panic,
    }

    impl TokenSealer for StuckSealer {
        fn seal(&self, _plaintext: &str, _key_material: &str) -> Result<String, SealError> {
            match self {
                StuckSealer::Sleep(delay) => {
                    std::thread::sleep(*delay);
                    Ok("late".to_string())
                }
                StuckSealer::Panic => panic!("sealer crashed"),
            }
        }

        fn open(&self, _envelope: &str, _key_material: &str) -> Result<String, SealError> {
            Err(SealError::NoUsableKey)
        }
    }

    fn service(
        authenticator: Arc<StubAuthenticator>,
        sealer: Arc<CountingSealer>,
        timeouts: AuthTimeouts,
    ) -> RealAuthService {
        RealAuthService::new(authenticator, sealer, TokenPolicy::default(), timeouts)
    }

    fn password_request(username: &str, password: &str) -> AuthRequest {
        AuthRequest {
            grant_type: Some(GrantType::Password),
            username: username.to_string(),
            password: password.to_string(),
            response_type: "token".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn non_password_grants_are_rejected_before_any_work() {
        let authenticator = Arc::new(StubAuthenticator::new(test_key()));
        let sealer = Arc::new(CountingSealer::default());
        let svc = service(authenticator.clone(), sealer.clone(), AuthTimeouts::default());

        let grants = [
            None,
            Some(GrantType::RefreshToken),
            Some(GrantType::Other("client_credentials".to_string())),
            Some(GrantType::Other(String::new())),
        ];
        for grant_type in grants {
            let mut request = password_request("alice", "correct");
            request.grant_type = grant_type;

            let response = ErrorResponse::from(svc.auth(request).await.unwrap_err());
            assert_eq!(response.code, 400);
            assert_eq!(response.error, "invalid_grant");
            assert_eq!(response.error_description, "GrantType must be set to password");
        }
        assert_eq!(authenticator.calls.load(Ordering::SeqCst), 0);
        assert_eq!(sealer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn password_grant_issues_sealed_token() {
        let key = test_key();
        let authenticator = Arc::new(StubAuthenticator::new(key.clone()));
        let sealer = Arc::new(CountingSealer::default());
        let svc = service(authenticator.clone(), sealer.clone(), AuthTimeouts::default());

        let response = svc.auth(password_request("alice", "correct")).await.unwrap();
        assert_eq!(response.code, 1000);
        assert_eq!(response.expires_in, 360000);
        assert_eq!(response.token_type, crate::domain_model::TokenType::Bearer);
        assert_eq!(response.scope, "full mail payments reset keys");
        assert_eq!(response.refresh_token, "refresh_token");
        assert_eq!(response.event_id, DEFAULT_EVENT_ID);
        assert_eq!(response.uid, authenticator.account.uid);
        assert_eq!(response.private_key, key);
        assert_eq!(response.encrypted_private_key, key);

        assert!(!response.access_token.is_empty());
        let opened = PgpTokenSealer::new()
            .open(&response.access_token, &key)
            .unwrap();
        assert_eq!(opened, "access_token");
        assert_eq!(sealer.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn rejected_credentials_carry_authenticator_message() {
        let authenticator = Arc::new(StubAuthenticator::new(test_key()));
        let sealer = Arc::new(CountingSealer::default());
        let svc = service(authenticator, sealer.clone(), AuthTimeouts::default());

        let response =
            ErrorResponse::from(svc.auth(password_request("alice", "wrong")).await.unwrap_err());
        assert_eq!(response.code, 401);
        assert_eq!(response.error, "invalid_grant");
        assert_eq!(
            response.error_description,
            AccountError::InvalidCredentials.to_string()
        );
        assert_eq!(sealer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unusable_key_material_is_invalid_key() {
        for key in [String::new(), "  \n".to_string(), "garbage".to_string()] {
            let authenticator = Arc::new(StubAuthenticator::new(key));
            let sealer = Arc::new(CountingSealer::default());
            let svc = service(authenticator, sealer, AuthTimeouts::default());

            let err = svc
                .auth(password_request("alice", "correct"))
                .await
                .unwrap_err();
            assert!(matches!(err, AuthError::InvalidKey(_)));
            let response = ErrorResponse::from(err);
            assert_eq!(response.code, 500);
            assert_eq!(response.error, "invalid_key");
            assert!(!response.error_description.is_empty());
        }
    }

    #[tokio::test]
    async fn slow_authenticator_times_out() {
        let mut stub = StubAuthenticator::new(test_key());
        stub.delay = Some(Duration::from_millis(500));
        let sealer = Arc::new(CountingSealer::default());
        let svc = service(
            Arc::new(stub),
            sealer.clone(),
            AuthTimeouts {
                authenticate: Duration::from_millis(20),
                seal: Duration::from_secs(5),
            },
        );

        let err = svc
            .auth(password_request("alice", "correct"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Unavailable(_)));
        assert_eq!(ErrorResponse::from(err).code, 503);
        assert_eq!(sealer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn slow_sealer_times_out_as_invalid_key() {
        let svc = RealAuthService::new(
            Arc::new(StubAuthenticator::new(test_key())),
            Arc::new(StuckSealer::Sleep(Duration::from_millis(500))),
            TokenPolicy::default(),
            AuthTimeouts {
                authenticate: Duration::from_secs(5),
                seal: Duration::from_millis(20),
            },
        );

        let result = svc.auth(password_request("alice", "correct")).await;
        let err = result.unwrap_err();
        assert!(matches!(err, AuthError::InvalidKey(_)));
        let response = ErrorResponse::from(err);
        assert_eq!(response.code, 500);
        assert_eq!(response.error, "invalid_key");
        assert_eq!(
            response.error_description,
            "sealing the access token timed out"
        );
    }

    #[tokio::test]
    async fn crashed_sealing_task_is_invalid_key() {
        let svc = RealAuthService::new(
            Arc::new(StubAuthenticator::new(test_key())),
            Arc::new(StuckSealer::Panic),
            TokenPolicy::default(),
            AuthTimeouts::default(),
        );

        let err = svc
            .auth(password_request("alice", "correct"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidKey(ref m) if m.starts_with("sealing task failed")));
        assert_eq!(ErrorResponse::from(err).code, 500);
    }

    #[tokio::test]
    async fn refresh_grant_is_validated_then_not_implemented() {
        let authenticator = Arc::new(StubAuthenticator::new(test_key()));
        let sealer = Arc::new(CountingSealer::default());
        let svc = service(authenticator, sealer, AuthTimeouts::default());

        let wrong = AuthCookiesRequest {
            grant_type: Some(GrantType::Password),
            ..Default::default()
        };
        let response = ErrorResponse::from(svc.auth_cookies(wrong).await.unwrap_err());
        assert_eq!(response.code, 400);
        assert_eq!(response.error, "invalid_grant");
        assert_eq!(
            response.error_description,
            "GrantType must be set to refresh_token"
        );

        let refresh = AuthCookiesRequest {
            grant_type: Some(GrantType::RefreshToken),
            refresh_token: "refresh_token".to_string(),
            ..Default::default()
        };
        let err = svc.auth_cookies(refresh).await.unwrap_err();
        assert!(matches!(err, AuthError::NotImplemented));
        assert_eq!(ErrorResponse::from(err).code, 501);
    }
}

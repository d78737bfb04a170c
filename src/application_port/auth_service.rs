use crate::domain_model::{Account, GrantType, TokenType, Uid};
use serde::Serialize;
use std::convert::Infallible;

pub const CODE_SUCCESS: u32 = 1000;
pub const CODE_BAD_REQUEST: u32 = 400;
pub const CODE_UNAUTHORIZED: u32 = 401;
pub const CODE_SERVER_ERROR: u32 = 500;
pub const CODE_NOT_IMPLEMENTED: u32 = 501;
pub const CODE_UNAVAILABLE: u32 = 503;

/// Plaintext sealed into every access token.
pub const ACCESS_TOKEN_PAYLOAD: &str = "access_token";

// The literals below are what clients currently receive. They look like
// placeholders and are kept verbatim until real values are specified.
pub const DEFAULT_EXPIRES_IN: u64 = 360_000;
pub const DEFAULT_SCOPE: &str = "full mail payments reset keys";
pub const DEFAULT_REFRESH_TOKEN: &str = "refresh_token";
pub const DEFAULT_EVENT_ID: &str =
    "gnFPgsx4P9uXvB7IW8sIAUEcxEGGGH7mmRFiCmWwcn1jY3hxPxnCh39qvQInv5LkQFPn5rYh8qzfP_bJPrvHrg==";

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("GrantType must be set to {expected}")]
    InvalidGrant { expected: &'static str },
    #[error("{0}")]
    Rejected(String),
    #[error("{0}")]
    InvalidKey(String),
    #[error("refresh token exchange is not implemented")]
    NotImplemented,
    #[error("{0}")]
    Unavailable(String),
}

impl AuthError {
    pub fn code(&self) -> u32 {
        match self {
            AuthError::InvalidGrant { .. } => CODE_BAD_REQUEST,
            AuthError::Rejected(_) => CODE_UNAUTHORIZED,
            AuthError::InvalidKey(_) => CODE_SERVER_ERROR,
            AuthError::NotImplemented => CODE_NOT_IMPLEMENTED,
            AuthError::Unavailable(_) => CODE_UNAVAILABLE,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::InvalidGrant { .. } | AuthError::Rejected(_) => "invalid_grant",
            AuthError::InvalidKey(_) => "invalid_key",
            AuthError::NotImplemented => "not_implemented",
            AuthError::Unavailable(_) => "temporarily_unavailable",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AuthRequest {
    pub client_id: String,
    pub client_secret: String,
    pub grant_type: Option<GrantType>,
    pub username: String,
    pub password: String,
    pub redirect_uri: String,
    pub response_type: String,
    pub state: String,
}

#[derive(Debug, Clone, Default)]
pub struct AuthCookiesRequest {
    pub client_id: String,
    pub response_type: String,
    pub grant_type: Option<GrantType>,
    pub refresh_token: String,
    pub redirect_uri: String,
    pub state: String,
}

/// Fixed values stamped on every issued session.
#[derive(Debug, Clone)]
pub struct TokenPolicy {
    pub expires_in: u64,
    pub token_type: TokenType,
    pub scope: String,
    pub refresh_token: String,
    pub event_id: String,
}

impl Default for TokenPolicy {
    fn default() -> Self {
        TokenPolicy {
            expires_in: DEFAULT_EXPIRES_IN,
            token_type: TokenType::Bearer,
            scope: DEFAULT_SCOPE.to_string(),
            refresh_token: DEFAULT_REFRESH_TOKEN.to_string(),
            event_id: DEFAULT_EVENT_ID.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AuthResponse {
    pub code: u32,
    pub access_token: String,
    pub expires_in: u64,
    pub token_type: TokenType,
    pub scope: String,
    pub uid: Uid,
    pub refresh_token: String,
    pub user_status: u32,
    pub private_key: String,
    #[serde(rename = "EncPrivateKey")]
    pub encrypted_private_key: String,
    #[serde(rename = "EventID")]
    pub event_id: String,
}

impl AuthResponse {
    /// The only way to build a successful response: every field is filled
    /// from the account, the sealed token and the policy at once.
    pub fn granted(account: Account, access_token: String, policy: &TokenPolicy) -> Self {
        AuthResponse {
            code: CODE_SUCCESS,
            access_token,
            expires_in: policy.expires_in,
            token_type: policy.token_type,
            scope: policy.scope.clone(),
            uid: account.uid,
            refresh_token: policy.refresh_token.clone(),
            user_status: 0,
            private_key: account.private_key,
            encrypted_private_key: account.encrypted_private_key,
            event_id: policy.event_id.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub error_description: String,
}

impl ErrorResponse {
    pub fn new(code: u32, error: impl Into<String>, description: impl Into<String>) -> Self {
        ErrorResponse {
            code,
            error: error.into(),
            error_description: description.into(),
        }
    }
}

impl From<AuthError> for ErrorResponse {
    fn from(error: AuthError) -> Self {
        ErrorResponse::new(error.code(), error.error_code(), error.to_string())
    }
}

#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Password grant. Produces either a full session or exactly one error.
    async fn auth(&self, request: AuthRequest) -> Result<AuthResponse, AuthError>;
    /// Refresh grant. There is no success path yet.
    async fn auth_cookies(&self, request: AuthCookiesRequest) -> Result<Infallible, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> Account {
        Account {
            uid: Uid(uuid::Uuid::nil()),
            username: "alice".to_string(),
            private_key: "raw-key".to_string(),
            encrypted_private_key: "enc-key".to_string(),
        }
    }

    #[test]
    fn granted_response_uses_wire_names() {
        let response = AuthResponse::granted(account(), "sealed".into(), &TokenPolicy::default());
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["Code"], 1000);
        assert_eq!(json["AccessToken"], "sealed");
        assert_eq!(json["ExpiresIn"], 360000);
        assert_eq!(json["TokenType"], "Bearer");
        assert_eq!(json["Scope"], "full mail payments reset keys");
        assert_eq!(json["Uid"], uuid::Uuid::nil().to_string());
        assert_eq!(json["RefreshToken"], "refresh_token");
        assert_eq!(json["UserStatus"], 0);
        assert_eq!(json["PrivateKey"], "raw-key");
        assert_eq!(json["EncPrivateKey"], "enc-key");
        assert_eq!(json["EventID"], DEFAULT_EVENT_ID);
    }

    #[test]
    fn errors_map_to_protocol_codes() {
        let cases = [
            (AuthError::InvalidGrant { expected: "password" }, 400, "invalid_grant"),
            (AuthError::Rejected("nope".into()), 401, "invalid_grant"),
            (AuthError::InvalidKey("bad key".into()), 500, "invalid_key"),
            (AuthError::NotImplemented, 501, "not_implemented"),
            (AuthError::Unavailable("slow".into()), 503, "temporarily_unavailable"),
        ];
        for (error, code, name) in cases {
            let response = ErrorResponse::from(error);
            assert_eq!(response.code, code);
            assert_eq!(response.error, name);
        }
    }

    #[test]
    fn invalid_grant_names_expected_type() {
        let response = ErrorResponse::from(AuthError::InvalidGrant { expected: "password" });
        assert_eq!(response.error_description, "GrantType must be set to password");

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["Code"], 400);
        assert_eq!(json["Error"], "invalid_grant");
        assert_eq!(json["ErrorDescription"], "GrantType must be set to password");
    }
}

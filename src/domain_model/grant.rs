use serde::Serialize;
use std::convert::Infallible;

pub const GRANT_PASSWORD: &str = "password";
pub const GRANT_REFRESH_TOKEN: &str = "refresh_token";

/// The flow a client asks for. Unknown values are kept verbatim so they can
/// be rejected with a proper error instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrantType {
    Password,
    RefreshToken,
    Other(String),
}

impl std::str::FromStr for GrantType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            GRANT_PASSWORD => GrantType::Password,
            GRANT_REFRESH_TOKEN => GrantType::RefreshToken,
            other => GrantType::Other(other.to_string()),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenType {
    Bearer,
}

use super::error::*;
use crate::application_port::*;
use crate::domain_model::GrantType;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use warp::{self, reject};

// Wire bodies keep the field names clients already send. Every field is
// optional so that a missing GrantType is answered with invalid_grant rather
// than a deserialization error.

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AuthRequestBody {
    #[serde(rename = "ClientID")]
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub grant_type: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    #[serde(rename = "RedirectURI")]
    pub redirect_uri: Option<String>,
    pub response_type: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AuthCookiesRequestBody {
    #[serde(rename = "ClientID")]
    pub client_id: Option<String>,
    pub response_type: Option<String>,
    pub grant_type: Option<String>,
    pub refresh_token: Option<String>,
    #[serde(rename = "RedirectURI")]
    pub redirect_uri: Option<String>,
    pub state: Option<String>,
}

fn grant_type(raw: Option<String>) -> Option<GrantType> {
    raw.and_then(|g| g.parse().ok())
}

impl From<AuthRequestBody> for AuthRequest {
    fn from(body: AuthRequestBody) -> Self {
        AuthRequest {
            client_id: body.client_id.unwrap_or_default(),
            client_secret: body.client_secret.unwrap_or_default(),
            grant_type: grant_type(body.grant_type),
            username: body.username.unwrap_or_default(),
            password: body.password.unwrap_or_default(),
            redirect_uri: body.redirect_uri.unwrap_or_default(),
            response_type: body.response_type.unwrap_or_default(),
            state: body.state.unwrap_or_default(),
        }
    }
}

impl From<AuthCookiesRequestBody> for AuthCookiesRequest {
    fn from(body: AuthCookiesRequestBody) -> Self {
        AuthCookiesRequest {
            client_id: body.client_id.unwrap_or_default(),
            response_type: body.response_type.unwrap_or_default(),
            grant_type: grant_type(body.grant_type),
            refresh_token: body.refresh_token.unwrap_or_default(),
            redirect_uri: body.redirect_uri.unwrap_or_default(),
            state: body.state.unwrap_or_default(),
        }
    }
}

pub async fn auth(
    body: AuthRequestBody,
    auth_service: Arc<dyn AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let reply = match auth_service.auth(body.into()).await {
        Ok(response) => warp::reply::json(&response),
        Err(e) => warp::reply::json(&ErrorResponse::from(e)),
    };
    Ok(reply)
}

pub async fn auth_cookies(
    body: AuthCookiesRequestBody,
    auth_service: Arc<dyn AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let error = match auth_service.auth_cookies(body.into()).await {
        Ok(never) => match never {},
        Err(e) => e,
    };
    Ok(warp::reply::json(&ErrorResponse::from(error)))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DomainsResponse {
    pub code: u32,
    pub domains: Vec<String>,
}

pub async fn available_domains(
    domain_service: Arc<dyn DomainService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let domains = domain_service
        .available_domains()
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&DomainsResponse {
        code: CODE_SUCCESS,
        domains,
    }))
}

use crate::application_port::*;
use std::convert::Infallible;
use thiserror::Error;
use tracing::warn;
use warp::filters::body::BodyDeserializeError;
use warp::http::StatusCode;
use warp::{Rejection, reject};

/// Protocol errors travel in the body with transport status 200, like the
/// grant errors do. Only routing failures use a non-200 status.
pub async fn recover_error(err: Rejection) -> Result<impl warp::Reply, Infallible> {
    let (status, body) = if let Some(code) = err.find::<ApiErrorCode>() {
        (StatusCode::OK, ErrorResponse::from(code.clone()))
    } else if let Some(e) = err.find::<BodyDeserializeError>() {
        (
            StatusCode::OK,
            ErrorResponse::new(CODE_BAD_REQUEST, "invalid_request", e.to_string()),
        )
    } else if err.is_not_found() {
        (
            StatusCode::NOT_FOUND,
            ErrorResponse::new(404, "not_found", "Not found"),
        )
    } else if err.find::<reject::PayloadTooLarge>().is_some() {
        (
            StatusCode::PAYLOAD_TOO_LARGE,
            ErrorResponse::new(413, "payload_too_large", "Request body too large"),
        )
    } else if err.find::<reject::MethodNotAllowed>().is_some() {
        (
            StatusCode::METHOD_NOT_ALLOWED,
            ErrorResponse::new(405, "method_not_allowed", "Method not allowed"),
        )
    } else {
        warn!("unhandled rejection: {:?}", err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse::new(
                CODE_SERVER_ERROR,
                "internal_error",
                format!("Unhandled error: {:?}", err),
            ),
        )
    };
    Ok(warp::reply::with_status(warp::reply::json(&body), status))
}

#[derive(Debug, Clone, Error)]
pub enum ApiErrorCode {
    #[error("Internal error")]
    InternalError,
}

impl ApiErrorCode {
    pub fn internal<E: std::fmt::Display>(error: E) -> ApiErrorCode {
        warn!("Internal error: {}", error);
        ApiErrorCode::InternalError
    }
}

impl reject::Reject for ApiErrorCode {}

impl From<DomainError> for ApiErrorCode {
    fn from(error: DomainError) -> Self {
        ApiErrorCode::internal(error)
    }
}

impl From<ApiErrorCode> for ErrorResponse {
    fn from(code: ApiErrorCode) -> Self {
        match code {
            ApiErrorCode::InternalError => {
                ErrorResponse::new(CODE_SERVER_ERROR, "internal_error", code.to_string())
            }
        }
    }
}

use super::handler;
use crate::server::*;
use std::convert::Infallible;
use std::sync::Arc;
use warp::Filter;

const MAX_BODY_BYTES: u64 = 16 * 1024;

pub fn routes(
    server: Arc<Server>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    // path before method, so that unknown paths stay 404 instead of 405
    let auth = warp::path("auth")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json())
        .and(with(server.auth_service.clone()))
        .and_then(handler::auth);

    let auth_cookies = warp::path!("auth" / "cookies")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json())
        .and(with(server.auth_service.clone()))
        .and_then(handler::auth_cookies);

    let available_domains = warp::path!("domains" / "available")
        .and(warp::get())
        .and(with(server.domain_service.clone()))
        .and_then(handler::available_domains);

    auth.or(auth_cookies).or(available_domains)
}

fn with<ServiceType>(
    service: Arc<ServiceType>,
) -> impl Filter<Extract = (Arc<ServiceType>,), Error = Infallible> + Clone
where
    ServiceType: Send + Sync + ?Sized,
{
    warp::any().map(move || service.clone())
}

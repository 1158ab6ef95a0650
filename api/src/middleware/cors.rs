//! CORS configuration

use actix_cors::Cors;
use actix_web::http::{header, Method};

/// Preflight cache lifetime in seconds
const CORS_MAX_AGE: usize = 3600;

/// Build the CORS middleware
///
/// With no configured origins any origin is accepted, which is what local
/// development wants; deployments list their front-end origins explicitly.
pub fn create_cors(allowed_origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .max_age(CORS_MAX_AGE);

    if allowed_origins.is_empty() {
        tracing::info!("CORS allows any origin");
        return cors.allow_any_origin();
    }

    allowed_origins
        .iter()
        .map(|origin| origin.trim())
        .filter(|origin| !origin.is_empty())
        .fold(cors, |cors, origin| {
            tracing::info!(origin, "Adding allowed origin");
            cors.allowed_origin(origin)
        })
}

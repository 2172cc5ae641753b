//! CORS middleware configuration for cross-origin requests.
//!
//! Development accepts any origin. Staging and production accept only the
//! origins listed in `server.allowed_origins`.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use tracing::info;

use otp_shared::{Environment, ServerConfig};

/// Creates a CORS middleware instance configured for the environment.
pub fn create_cors(environment: Environment, server: &ServerConfig) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .max_age(server.cors_max_age);

    if environment.is_development() {
        return cors.allow_any_origin();
    }

    server
        .allowed_origins
        .iter()
        .map(|origin| origin.trim())
        .filter(|origin| !origin.is_empty())
        .fold(cors, |cors, origin| {
            info!("Adding allowed origin: {}", origin);
            cors.allowed_origin(origin)
        })
}

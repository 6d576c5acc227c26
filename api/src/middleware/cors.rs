//! CORS middleware configuration for cross-origin requests.
//!
//! Development allows any origin. Other environments only admit the origins
//! listed in [`CorsConfig`].

use actix_cors::Cors;
use actix_web::http::{header, Method};
use rent_shared::config::{CorsConfig, Environment};

/// Creates a CORS middleware instance for `environment`
pub fn create_cors(config: &CorsConfig, environment: Environment) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::ACCEPT_LANGUAGE,
            header::CONTENT_TYPE,
        ])
        .max_age(config.max_age);

    if environment == Environment::Development {
        tracing::info!("Configuring permissive CORS for development");
        return cors.allow_any_origin();
    }

    config
        .allowed_origins
        .iter()
        .map(|origin| origin.trim())
        .filter(|origin| !origin.is_empty())
        .fold(cors, |cors, origin| {
            tracing::info!(origin, "Adding allowed origin");
            cors.allowed_origin(origin)
        })
}

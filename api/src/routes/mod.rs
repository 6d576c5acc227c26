//! HTTP route handlers grouped by resource
//!
//! Authorization is decided by the policy middleware before any handler runs.
//! Handlers only perform the checks that depend on loaded data, such as rental
//! ownership.

pub mod auth;
pub mod health;
pub mod rentals;
pub mod users;
pub mod vehicles;

use actix_web::{web, HttpResponse};
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use rent_core::errors::DomainResult;
use rent_shared::{ApiResponse, Language};

use crate::app::AppState;
use crate::handlers::error::handle_validation_errors;
use crate::middleware::AuthContext;

/// Register every route of the service
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check)).service(
        web::scope("/api/v1")
            .route("", web::get().to(health::api_index))
            .service(web::scope("/auth").configure(auth::configure))
            .service(web::scope("/vehicles").configure(vehicles::configure))
            .service(web::scope("/rentals").configure(rentals::configure))
            .service(web::scope("/users").configure(users::configure)),
    );
}

/// Resolves the caller's user id, from the token when it carries one
pub(crate) async fn current_user_id(state: &AppState, auth: &AuthContext) -> DomainResult<Uuid> {
    match auth.user_id() {
        Some(id) => Ok(id),
        None => state.users.get_by_email(auth.email()).await.map(|user| user.id),
    }
}

/// Runs `validator` checks, producing the 400 response on failure
pub(crate) fn validate<T: Validate>(payload: &T, lang: Language) -> Result<(), HttpResponse> {
    payload
        .validate()
        .map_err(|errors| handle_validation_errors(&errors, lang))
}

pub(crate) fn ok<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(data))
}

pub(crate) fn created<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Created().json(ApiResponse::success(data))
}

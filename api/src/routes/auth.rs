//! Authentication route handlers
//!
//! - `POST /api/v1/auth/register`: client self-registration, returns a token
//! - `POST /api/v1/auth/register/staff`: staff-only, returns the new user
//! - `POST /api/v1/auth/login`: email and password login

use actix_web::{web, HttpRequest, HttpResponse};

use crate::app::AppState;
use crate::dto::auth::{LoginRequest, RegisterRequest};
use crate::dto::user::UserResponse;
use crate::handlers::error::{extract_language, handle_domain_error_with_lang};

use super::{created, ok, validate};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/register", web::post().to(register))
        .route("/register/staff", web::post().to(register_staff))
        .route("/login", web::post().to(login));
}

/// Handler for POST /api/v1/auth/register
///
/// # Response
///
/// ## Success (201 Created)
/// An `AuthResponse` with the access token of the new client.
///
/// ## Errors
/// - 400 Bad Request: validation failure
/// - 409 Conflict: email or national id already registered
pub async fn register(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> HttpResponse {
    let lang = extract_language(&req);
    if let Err(response) = validate(&*body, lang) {
        return response;
    }

    match state.auth.register(body.into_inner().into()).await {
        Ok(response) => created(response),
        Err(error) => handle_domain_error_with_lang(&error, lang),
    }
}

/// Handler for POST /api/v1/auth/register/staff
///
/// No token is issued for the new account; the staff member logs in separately.
pub async fn register_staff(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> HttpResponse {
    let lang = extract_language(&req);
    if let Err(response) = validate(&*body, lang) {
        return response;
    }

    match state.auth.register_staff(body.into_inner().into()).await {
        Ok(user) => created(UserResponse::from(user)),
        Err(error) => handle_domain_error_with_lang(&error, lang),
    }
}

/// Handler for POST /api/v1/auth/login
///
/// ## Errors
/// - 401 Unauthorized: unknown email or wrong password, indistinguishably
/// - 403 Forbidden: the account is inactive
pub async fn login(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> HttpResponse {
    let lang = extract_language(&req);
    if let Err(response) = validate(&*body, lang) {
        return response;
    }

    match state.auth.login(&body.email, &body.password).await {
        Ok(response) => ok(response),
        Err(error) => handle_domain_error_with_lang(&error, lang),
    }
}

//! User routes
//!
//! `/users/me/**` is self-service for any authenticated caller. Everything
//! else under `/users` is staff administration.

use actix_web::{web, HttpRequest, HttpResponse};
use uuid::Uuid;

use rent_core::domain::entities::{RentalStatus, User};
use rent_core::errors::DomainResult;

use crate::app::AppState;
use crate::dto::rental::rental_list;
use crate::dto::user::{user_list, AddressPayload, ProfileUpdateRequest, RoleQuery, UserResponse};
use crate::handlers::error::{extract_language, handle_domain_error_with_lang};
use crate::middleware::AuthContext;

use super::{current_user_id, ok, validate};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/me", web::get().to(get_profile))
        .route("/me", web::put().to(update_profile))
        .route("/me/address", web::put().to(set_address))
        .route("/me/address", web::delete().to(remove_address))
        .route("/me/rentals", web::get().to(my_rentals))
        .route("/me/rentals/active", web::get().to(my_active_rentals))
        .route("/me/statistics", web::get().to(my_statistics))
        .route("/me/deactivate", web::patch().to(deactivate_me))
        .route("", web::get().to(list_users))
        .route("/{id}", web::get().to(get_user))
        .route("/{id}", web::put().to(update_user))
        .route("/{id}", web::delete().to(delete_user))
        .route("/{id}/promote", web::put().to(promote_user))
        .route("/{id}/demote", web::put().to(demote_user))
        .route("/{id}/activate", web::patch().to(activate_user))
        .route("/{id}/deactivate", web::patch().to(deactivate_user));
}

fn respond_user(req: &HttpRequest, result: DomainResult<User>) -> HttpResponse {
    match result {
        Ok(user) => ok(UserResponse::from(user)),
        Err(error) => handle_domain_error_with_lang(&error, extract_language(req)),
    }
}

// Self-service

/// Handler for GET /api/v1/users/me
pub async fn get_profile(req: HttpRequest, state: web::Data<AppState>, auth: AuthContext) -> HttpResponse {
    let result = match current_user_id(&state, &auth).await {
        Ok(id) => state.users.get(id).await,
        Err(error) => Err(error),
    };
    respond_user(&req, result)
}

/// Handler for PUT /api/v1/users/me
///
/// Absent fields are left untouched.
pub async fn update_profile(
    req: HttpRequest,
    state: web::Data<AppState>,
    auth: AuthContext,
    body: web::Json<ProfileUpdateRequest>,
) -> HttpResponse {
    if let Err(response) = validate(&*body, extract_language(&req)) {
        return response;
    }

    let result = match current_user_id(&state, &auth).await {
        Ok(id) => state.users.update_profile(id, body.into_inner().into()).await,
        Err(error) => Err(error),
    };
    respond_user(&req, result)
}

/// Handler for PUT /api/v1/users/me/address
pub async fn set_address(
    req: HttpRequest,
    state: web::Data<AppState>,
    auth: AuthContext,
    body: web::Json<AddressPayload>,
) -> HttpResponse {
    if let Err(response) = validate(&*body, extract_language(&req)) {
        return response;
    }

    let result = match current_user_id(&state, &auth).await {
        Ok(id) => state.users.set_address(id, body.into_inner().into()).await,
        Err(error) => Err(error),
    };
    respond_user(&req, result)
}

/// Handler for DELETE /api/v1/users/me/address
pub async fn remove_address(req: HttpRequest, state: web::Data<AppState>, auth: AuthContext) -> HttpResponse {
    let result = match current_user_id(&state, &auth).await {
        Ok(id) => state.users.remove_address(id).await,
        Err(error) => Err(error),
    };
    respond_user(&req, result)
}

async fn own_rentals(
    req: &HttpRequest,
    state: &AppState,
    auth: &AuthContext,
    status: Option<RentalStatus>,
) -> HttpResponse {
    let result = match (current_user_id(state, auth).await, status) {
        (Ok(id), Some(status)) => state.rentals.list_for_user_with_status(id, status).await,
        (Ok(id), None) => state.rentals.list_for_user(id).await,
        (Err(error), _) => Err(error),
    };
    match result {
        Ok(rentals) => ok(rental_list(rentals)),
        Err(error) => handle_domain_error_with_lang(&error, extract_language(req)),
    }
}

/// Handler for GET /api/v1/users/me/rentals
pub async fn my_rentals(req: HttpRequest, state: web::Data<AppState>, auth: AuthContext) -> HttpResponse {
    own_rentals(&req, &state, &auth, None).await
}

/// Handler for GET /api/v1/users/me/rentals/active
pub async fn my_active_rentals(req: HttpRequest, state: web::Data<AppState>, auth: AuthContext) -> HttpResponse {
    own_rentals(&req, &state, &auth, Some(RentalStatus::Active)).await
}

/// Handler for GET /api/v1/users/me/statistics
///
/// Unlike the rental summary, the spend includes active rentals.
pub async fn my_statistics(req: HttpRequest, state: web::Data<AppState>, auth: AuthContext) -> HttpResponse {
    let result = match current_user_id(&state, &auth).await {
        Ok(id) => state.rentals.statistics(id).await,
        Err(error) => Err(error),
    };
    match result {
        Ok(statistics) => ok(statistics),
        Err(error) => handle_domain_error_with_lang(&error, extract_language(&req)),
    }
}

/// Handler for PATCH /api/v1/users/me/deactivate
///
/// ## Errors
/// - 409 Conflict: the caller still has active rentals
pub async fn deactivate_me(req: HttpRequest, state: web::Data<AppState>, auth: AuthContext) -> HttpResponse {
    let result = match current_user_id(&state, &auth).await {
        Ok(id) => state.users.deactivate_self(id).await,
        Err(error) => Err(error),
    };
    respond_user(&req, result)
}

// Administration

/// Handler for GET /api/v1/users?role=CLIENT|STAFF
pub async fn list_users(req: HttpRequest, state: web::Data<AppState>, query: web::Query<RoleQuery>) -> HttpResponse {
    match state.users.list(query.role).await {
        Ok(users) => ok(user_list(users)),
        Err(error) => handle_domain_error_with_lang(&error, extract_language(&req)),
    }
}

/// Handler for GET /api/v1/users/{id}
pub async fn get_user(req: HttpRequest, state: web::Data<AppState>, id: web::Path<Uuid>) -> HttpResponse {
    respond_user(&req, state.users.get(id.into_inner()).await)
}

/// Handler for PUT /api/v1/users/{id}
pub async fn update_user(
    req: HttpRequest,
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    body: web::Json<ProfileUpdateRequest>,
) -> HttpResponse {
    if let Err(response) = validate(&*body, extract_language(&req)) {
        return response;
    }
    respond_user(&req, state.users.update_profile(id.into_inner(), body.into_inner().into()).await)
}

/// Handler for PUT /api/v1/users/{id}/promote
pub async fn promote_user(req: HttpRequest, state: web::Data<AppState>, id: web::Path<Uuid>) -> HttpResponse {
    respond_user(&req, state.users.promote(id.into_inner()).await)
}

/// Handler for PUT /api/v1/users/{id}/demote
pub async fn demote_user(req: HttpRequest, state: web::Data<AppState>, id: web::Path<Uuid>) -> HttpResponse {
    respond_user(&req, state.users.demote(id.into_inner()).await)
}

/// Handler for PATCH /api/v1/users/{id}/activate
pub async fn activate_user(req: HttpRequest, state: web::Data<AppState>, id: web::Path<Uuid>) -> HttpResponse {
    respond_user(&req, state.users.activate(id.into_inner()).await)
}

/// Handler for PATCH /api/v1/users/{id}/deactivate
pub async fn deactivate_user(req: HttpRequest, state: web::Data<AppState>, id: web::Path<Uuid>) -> HttpResponse {
    respond_user(&req, state.users.deactivate(id.into_inner()).await)
}

/// Handler for DELETE /api/v1/users/{id}
///
/// Soft delete: the account is deactivated and kept for its rental history.
pub async fn delete_user(req: HttpRequest, state: web::Data<AppState>, id: web::Path<Uuid>) -> HttpResponse {
    match state.users.delete(id.into_inner()).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(error) => handle_domain_error_with_lang(&error, extract_language(&req)),
    }
}

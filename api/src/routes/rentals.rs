//! Rental routes
//!
//! Every route requires an authenticated caller. Clients only see and act on
//! their own rentals; staff may act on any rental.

use actix_web::{web, HttpRequest, HttpResponse};
use uuid::Uuid;

use rent_core::domain::entities::{Rental, RentalStatus, Role};
use rent_core::errors::{AuthError, DomainResult};

use crate::app::AppState;
use crate::dto::rental::{rental_list, RentalRequest, RentalResponse, VehicleAvailabilityResponse};
use crate::handlers::error::{extract_language, handle_domain_error_with_lang};
use crate::middleware::AuthContext;

use super::{created, current_user_id, ok, validate};

/// Static paths come before `/{id}` so they are not parsed as ids
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(list_rentals))
        .route("", web::post().to(create_rental))
        .route("/mine", web::get().to(list_mine))
        .route("/mine/active", web::get().to(list_mine_active))
        .route("/mine/completed", web::get().to(list_mine_completed))
        .route("/summary", web::get().to(summary))
        .route("/availability/{vehicle_id}", web::get().to(check_availability))
        .route("/user/{user_id}", web::get().to(list_for_user))
        .route("/{id}", web::get().to(get_rental))
        .route("/{id}/complete", web::patch().to(complete_rental))
        .route("/{id}/cancel", web::patch().to(cancel_rental));
}

/// Clients may only touch their own rentals
pub fn ensure_can_access(role: Role, caller_id: Uuid, owner_id: Uuid) -> DomainResult<()> {
    if role == Role::Staff || caller_id == owner_id {
        Ok(())
    } else {
        Err(AuthError::InsufficientPermissions.into())
    }
}

/// Loads a rental and checks the caller may act on it
async fn load_accessible(state: &AppState, auth: &AuthContext, rental_id: Uuid) -> DomainResult<Rental> {
    let rental = state.rentals.get(rental_id).await?;
    if !auth.is_staff() {
        let caller_id = current_user_id(state, auth).await?;
        if let Err(error) = ensure_can_access(auth.role(), caller_id, rental.user_id) {
            tracing::warn!(rental_id = %rental_id, caller_id = %caller_id, "Rental access refused");
            return Err(error);
        }
    }
    Ok(rental)
}

async fn mine(state: &AppState, auth: &AuthContext, status: Option<RentalStatus>) -> DomainResult<Vec<Rental>> {
    let user_id = current_user_id(state, auth).await?;
    match status {
        Some(status) => state.rentals.list_for_user_with_status(user_id, status).await,
        None => state.rentals.list_for_user(user_id).await,
    }
}

fn respond_list(req: &HttpRequest, result: DomainResult<Vec<Rental>>) -> HttpResponse {
    match result {
        Ok(rentals) => ok(rental_list(rentals)),
        Err(error) => handle_domain_error_with_lang(&error, extract_language(req)),
    }
}

/// Handler for GET /api/v1/rentals
///
/// Staff receive every rental, clients only their own.
pub async fn list_rentals(req: HttpRequest, state: web::Data<AppState>, auth: AuthContext) -> HttpResponse {
    let result = if auth.is_staff() {
        state.rentals.list_all().await
    } else {
        mine(&state, &auth, None).await
    };
    respond_list(&req, result)
}

/// Handler for GET /api/v1/rentals/mine
pub async fn list_mine(req: HttpRequest, state: web::Data<AppState>, auth: AuthContext) -> HttpResponse {
    respond_list(&req, mine(&state, &auth, None).await)
}

/// Handler for GET /api/v1/rentals/mine/active
pub async fn list_mine_active(req: HttpRequest, state: web::Data<AppState>, auth: AuthContext) -> HttpResponse {
    respond_list(&req, mine(&state, &auth, Some(RentalStatus::Active)).await)
}

/// Handler for GET /api/v1/rentals/mine/completed
pub async fn list_mine_completed(req: HttpRequest, state: web::Data<AppState>, auth: AuthContext) -> HttpResponse {
    respond_list(&req, mine(&state, &auth, Some(RentalStatus::Completed)).await)
}

/// Handler for GET /api/v1/rentals/user/{user_id}
pub async fn list_for_user(req: HttpRequest, state: web::Data<AppState>, user_id: web::Path<Uuid>) -> HttpResponse {
    respond_list(&req, state.rentals.list_for_user(user_id.into_inner()).await)
}

/// Handler for GET /api/v1/rentals/summary
pub async fn summary(req: HttpRequest, state: web::Data<AppState>, auth: AuthContext) -> HttpResponse {
    let result = match current_user_id(&state, &auth).await {
        Ok(user_id) => state.rentals.summary(user_id).await,
        Err(error) => Err(error),
    };
    match result {
        Ok(summary) => ok(summary),
        Err(error) => handle_domain_error_with_lang(&error, extract_language(&req)),
    }
}

/// Handler for GET /api/v1/rentals/availability/{vehicle_id}
pub async fn check_availability(
    req: HttpRequest,
    state: web::Data<AppState>,
    vehicle_id: web::Path<Uuid>,
) -> HttpResponse {
    let vehicle_id = vehicle_id.into_inner();
    match state.rentals.check_availability(vehicle_id).await {
        Ok(available) => ok(VehicleAvailabilityResponse { vehicle_id, available }),
        Err(error) => handle_domain_error_with_lang(&error, extract_language(&req)),
    }
}

/// Handler for GET /api/v1/rentals/{id}
pub async fn get_rental(
    req: HttpRequest,
    state: web::Data<AppState>,
    auth: AuthContext,
    id: web::Path<Uuid>,
) -> HttpResponse {
    match load_accessible(&state, &auth, id.into_inner()).await {
        Ok(rental) => ok(RentalResponse::from(rental)),
        Err(error) => handle_domain_error_with_lang(&error, extract_language(&req)),
    }
}

/// Handler for POST /api/v1/rentals
///
/// The rental is opened for the caller.
///
/// ## Errors
/// - 400 Bad Request: validation failure or return date before pickup date
/// - 404 Not Found: unknown vehicle
/// - 409 Conflict: vehicle not available
pub async fn create_rental(
    req: HttpRequest,
    state: web::Data<AppState>,
    auth: AuthContext,
    body: web::Json<RentalRequest>,
) -> HttpResponse {
    let lang = extract_language(&req);
    if let Err(response) = validate(&*body, lang) {
        return response;
    }

    match state.rentals.create(auth.email(), body.into_inner().into()).await {
        Ok(rental) => created(RentalResponse::from(rental)),
        Err(error) => handle_domain_error_with_lang(&error, lang),
    }
}

/// Handler for PATCH /api/v1/rentals/{id}/complete
pub async fn complete_rental(
    req: HttpRequest,
    state: web::Data<AppState>,
    auth: AuthContext,
    id: web::Path<Uuid>,
) -> HttpResponse {
    let result = match load_accessible(&state, &auth, id.into_inner()).await {
        Ok(rental) => state.rentals.complete(rental.id).await,
        Err(error) => Err(error),
    };
    match result {
        Ok(rental) => ok(RentalResponse::from(rental)),
        Err(error) => handle_domain_error_with_lang(&error, extract_language(&req)),
    }
}

/// Handler for PATCH /api/v1/rentals/{id}/cancel
pub async fn cancel_rental(
    req: HttpRequest,
    state: web::Data<AppState>,
    auth: AuthContext,
    id: web::Path<Uuid>,
) -> HttpResponse {
    let result = match load_accessible(&state, &auth, id.into_inner()).await {
        Ok(rental) => state.rentals.cancel(rental.id).await,
        Err(error) => Err(error),
    };
    match result {
        Ok(rental) => ok(RentalResponse::from(rental)),
        Err(error) => handle_domain_error_with_lang(&error, extract_language(&req)),
    }
}

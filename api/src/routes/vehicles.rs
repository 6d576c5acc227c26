//! Vehicle catalogue routes
//!
//! Reads are public. Writes are restricted to staff by the policy table.

use actix_web::{web, HttpRequest, HttpResponse};
use uuid::Uuid;

use rent_core::domain::entities::Vehicle;

use crate::app::AppState;
use crate::dto::vehicle::{AvailabilityQuery, VehicleRequest, VehicleResponse, VehicleUpdateRequest};
use crate::handlers::error::{extract_language, handle_domain_error_with_lang};

use super::{created, ok, validate};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(list_vehicles))
        .route("", web::post().to(create_vehicle))
        .route("/available", web::get().to(list_available))
        .route("/category/{category}", web::get().to(list_by_category))
        .route("/{id}", web::get().to(get_vehicle))
        .route("/{id}", web::put().to(update_vehicle))
        .route("/{id}", web::delete().to(delete_vehicle))
        .route("/{id}/availability", web::patch().to(set_availability));
}

fn vehicle_list(vehicles: Vec<Vehicle>) -> Vec<VehicleResponse> {
    vehicles.into_iter().map(VehicleResponse::from).collect()
}

/// Handler for GET /api/v1/vehicles
pub async fn list_vehicles(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    match state.vehicles.list_all().await {
        Ok(vehicles) => ok(vehicle_list(vehicles)),
        Err(error) => handle_domain_error_with_lang(&error, extract_language(&req)),
    }
}

/// Handler for GET /api/v1/vehicles/available
pub async fn list_available(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    match state.vehicles.list_available().await {
        Ok(vehicles) => ok(vehicle_list(vehicles)),
        Err(error) => handle_domain_error_with_lang(&error, extract_language(&req)),
    }
}

/// Handler for GET /api/v1/vehicles/category/{category}
pub async fn list_by_category(
    req: HttpRequest,
    state: web::Data<AppState>,
    category: web::Path<String>,
) -> HttpResponse {
    match state.vehicles.list_by_category(&category).await {
        Ok(vehicles) => ok(vehicle_list(vehicles)),
        Err(error) => handle_domain_error_with_lang(&error, extract_language(&req)),
    }
}

/// Handler for GET /api/v1/vehicles/{id}
pub async fn get_vehicle(req: HttpRequest, state: web::Data<AppState>, id: web::Path<Uuid>) -> HttpResponse {
    match state.vehicles.get(id.into_inner()).await {
        Ok(vehicle) => ok(VehicleResponse::from(vehicle)),
        Err(error) => handle_domain_error_with_lang(&error, extract_language(&req)),
    }
}

/// Handler for POST /api/v1/vehicles
///
/// ## Errors
/// - 400 Bad Request: validation failure
/// - 409 Conflict: plate already registered
pub async fn create_vehicle(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<VehicleRequest>,
) -> HttpResponse {
    let lang = extract_language(&req);
    if let Err(response) = validate(&*body, lang) {
        return response;
    }

    match state.vehicles.create(body.into_inner().into()).await {
        Ok(vehicle) => created(VehicleResponse::from(vehicle)),
        Err(error) => handle_domain_error_with_lang(&error, lang),
    }
}

/// Handler for PUT /api/v1/vehicles/{id}
///
/// Plate and availability are not part of the update.
pub async fn update_vehicle(
    req: HttpRequest,
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    body: web::Json<VehicleUpdateRequest>,
) -> HttpResponse {
    let lang = extract_language(&req);
    if let Err(response) = validate(&*body, lang) {
        return response;
    }

    match state.vehicles.update(id.into_inner(), body.into_inner().into()).await {
        Ok(vehicle) => ok(VehicleResponse::from(vehicle)),
        Err(error) => handle_domain_error_with_lang(&error, lang),
    }
}

/// Handler for DELETE /api/v1/vehicles/{id}
///
/// ## Errors
/// - 404 Not Found: unknown vehicle
/// - 409 Conflict: rentals reference the vehicle
pub async fn delete_vehicle(req: HttpRequest, state: web::Data<AppState>, id: web::Path<Uuid>) -> HttpResponse {
    match state.vehicles.delete(id.into_inner()).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(error) => handle_domain_error_with_lang(&error, extract_language(&req)),
    }
}

/// Handler for PATCH /api/v1/vehicles/{id}/availability?available=bool
///
/// Maintenance hold or release. Refused with 409 while an active rental holds
/// the vehicle.
pub async fn set_availability(
    req: HttpRequest,
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    query: web::Query<AvailabilityQuery>,
) -> HttpResponse {
    match state
        .rentals
        .set_vehicle_availability(id.into_inner(), query.available)
        .await
    {
        Ok(vehicle) => ok(VehicleResponse::from(vehicle)),
        Err(error) => handle_domain_error_with_lang(&error, extract_language(&req)),
    }
}

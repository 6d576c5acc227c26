//! Liveness and API index

use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde_json::json;
use std::collections::HashMap;

use rent_shared::{HealthResponse, HealthStatus, ServiceHealth};

use crate::app::AppState;
use crate::middleware::OptionalAuth;

/// Handler for GET /health
///
/// Reports 503 when the database backing the store cannot be reached. The
/// in-memory store is always healthy.
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let storage = match &state.database {
        None => ServiceHealth::healthy(),
        Some(pool) => match pool.health_check().await {
            Ok(true) => ServiceHealth::healthy(),
            Ok(false) => ServiceHealth::unhealthy("database did not answer"),
            Err(error) => {
                tracing::warn!(error = %error, "Database health check failed");
                ServiceHealth::unhealthy("database unreachable")
            }
        },
    };

    let status = storage.status;
    let mut services = HashMap::new();
    services.insert("storage".to_string(), storage);

    let body = HealthResponse {
        status,
        services,
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    match status {
        HealthStatus::Unhealthy => HttpResponse::ServiceUnavailable().json(body),
        _ => HttpResponse::Ok().json(body),
    }
}

/// Handler for GET /api/v1
///
/// Public; echoes the caller's role when a valid token was presented.
pub async fn api_index(auth: OptionalAuth) -> HttpResponse {
    let caller = auth.0.map(|ctx| ctx.role());
    HttpResponse::Ok().json(json!({
        "service": "rent-api",
        "version": env!("CARGO_PKG_VERSION"),
        "resources": {
            "auth": "/api/v1/auth",
            "vehicles": "/api/v1/vehicles",
            "rentals": "/api/v1/rentals",
            "users": "/api/v1/users",
        },
        "health": "/health",
        "caller_role": caller,
    }))
}

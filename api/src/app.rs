//! Application state and factory
//!
//! This module handles the initialization of the application state
//! and provides the factory for creating the Actix-web application.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    error::{JsonPayloadError, PathError, QueryPayloadError},
    web, App, Error, HttpRequest, HttpResponse,
};
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

use rent_core::repositories::{InMemoryStore, RentalRepository, UserRepository, VehicleRepository};
use rent_core::services::{
    AuthService, AuthServiceConfig, AuthorizationPolicy, RentalService, TokenService, UserService,
    VehicleService,
};
use rent_infra::database::{DatabasePool, MySqlRepositories};
use rent_shared::config::AppConfig;
use rent_shared::error_codes;
use rent_shared::ErrorResponse;

use crate::handlers::error::{extract_language, handle_malformed_request};
use crate::middleware::{create_cors, AccessGuard, PolicyEnforcer};
use crate::routes;

pub type AppAuthService = AuthService<dyn UserRepository>;
pub type AppVehicleService = VehicleService<dyn VehicleRepository>;
pub type AppRentalService = RentalService<dyn UserRepository, dyn VehicleRepository, dyn RentalRepository>;
pub type AppUserService = UserService<dyn UserRepository, dyn RentalRepository>;

/// Services shared by every worker
pub struct AppState {
    pub auth: Arc<AppAuthService>,
    pub vehicles: Arc<AppVehicleService>,
    pub rentals: Arc<AppRentalService>,
    pub users: Arc<AppUserService>,
    pub token_service: Arc<TokenService>,
    pub policy: Arc<AuthorizationPolicy>,
    /// Present when running against MySQL; probed by the health endpoint
    pub database: Option<DatabasePool>,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserRepository>,
        vehicles: Arc<dyn VehicleRepository>,
        rentals: Arc<dyn RentalRepository>,
        token_service: Arc<TokenService>,
        auth_config: AuthServiceConfig,
    ) -> Self {
        Self {
            auth: Arc::new(AuthService::new(users.clone(), token_service.clone(), auth_config)),
            vehicles: Arc::new(VehicleService::new(vehicles.clone())),
            rentals: Arc::new(RentalService::new(users.clone(), vehicles, rentals.clone())),
            users: Arc::new(UserService::new(users, rentals)),
            token_service,
            policy: Arc::new(AuthorizationPolicy::rental_api()),
            database: None,
        }
    }

    /// State backed by one process-local store
    pub fn in_memory(
        store: Arc<InMemoryStore>,
        token_service: Arc<TokenService>,
        auth_config: AuthServiceConfig,
    ) -> Self {
        Self::new(store.clone(), store.clone(), store, token_service, auth_config)
    }

    /// State backed by the MySQL repositories over `pool`
    pub fn mysql(pool: DatabasePool, token_service: Arc<TokenService>, auth_config: AuthServiceConfig) -> Self {
        let repositories = MySqlRepositories::new(&pool);
        let mut state = Self::new(
            repositories.users,
            repositories.vehicles,
            repositories.rentals,
            token_service,
            auth_config,
        );
        state.database = Some(pool);
        state
    }
}

fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> Error {
    let response = handle_malformed_request(&err.to_string(), extract_language(req));
    actix_web::error::InternalError::from_response(err, response).into()
}

fn path_error_handler(err: PathError, req: &HttpRequest) -> Error {
    let response = handle_malformed_request(&err.to_string(), extract_language(req));
    actix_web::error::InternalError::from_response(err, response).into()
}

fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> Error {
    let response = handle_malformed_request(&err.to_string(), extract_language(req));
    actix_web::error::InternalError::from_response(err, response).into()
}

/// Create and configure the application with all dependencies
///
/// Middleware order, outermost first: request tracing, CORS, access guard,
/// authorization policy.
pub fn create_app(
    state: web::Data<AppState>,
    config: &AppConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let guard = AccessGuard::new(state.token_service.clone());
    let enforcer = PolicyEnforcer::new(state.policy.clone());

    App::new()
        .app_data(state)
        .app_data(
            web::JsonConfig::default()
                .limit(config.server.max_payload_size)
                .error_handler(json_error_handler),
        )
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .wrap(enforcer)
        .wrap(guard)
        .wrap(create_cors(&config.cors, config.environment))
        .wrap(TracingLogger::default())
        .configure(routes::configure)
        .default_service(web::route().to(not_found))
}

/// Default 404 handler
async fn not_found(req: HttpRequest) -> HttpResponse {
    let message = match extract_language(&req) {
        rent_shared::Language::English => "The requested resource was not found",
        rent_shared::Language::Portuguese => "O recurso solicitado não foi encontrado",
    };
    HttpResponse::NotFound().json(ErrorResponse::new(error_codes::NOT_FOUND, message))
}

use actix_web::{web, HttpServer};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use rent_api::{create_app, AppState};
use rent_core::repositories::InMemoryStore;
use rent_core::services::{AuthServiceConfig, TokenService, TokenServiceConfig};
use rent_infra::database::DatabasePool;
use rent_shared::config::{AppConfig, StorageBackend};

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.environment.default_log_filter()));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();
}

async fn build_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let token_service = Arc::new(TokenService::new(TokenServiceConfig::from(&config.auth.jwt)));
    let auth_config = AuthServiceConfig::from(&config.auth.password);

    match config.storage {
        StorageBackend::Memory => {
            tracing::warn!("Using the in-memory store; data is lost on restart");
            Ok(AppState::in_memory(
                Arc::new(InMemoryStore::new()),
                token_service,
                auth_config,
            ))
        }
        StorageBackend::Mysql => {
            let pool = DatabasePool::new(&config.database).await?;
            if config.database.run_migrations {
                pool.run_migrations().await?;
            }
            tracing::info!("{}", pool.get_statistics());
            Ok(AppState::mysql(pool, token_service, auth_config))
        }
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = rent_api::config::load()?;
    init_tracing(&config);

    tracing::info!(
        environment = %config.environment,
        storage = ?config.storage,
        "Starting rental API server"
    );

    let state = web::Data::new(build_state(&config).await?);
    let bind_address = config.server.bind_address();
    tracing::info!(address = %bind_address, "Binding HTTP server");

    let app_config = config.clone();
    let mut server = HttpServer::new(move || create_app(state.clone(), &app_config))
        .keep_alive(Duration::from_secs(config.server.keep_alive));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_address)?.run().await?;

    tracing::info!("Server stopped");
    Ok(())
}

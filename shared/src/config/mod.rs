//! Configuration module with business-specific sub-modules
//!
//! - `auth` - Token signing and password hashing
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection
//! - `server` - HTTP server and CORS configuration
//! - `storage` - Resource store selection

pub mod auth;
pub mod database;
pub mod environment;
pub mod server;
pub mod storage;

use serde::{Deserialize, Serialize};

pub use auth::{AuthConfig, JwtConfig, PasswordConfig};
pub use database::DatabaseConfig;
pub use environment::Environment;
pub use server::{CorsConfig, ServerConfig};
pub use storage::StorageBackend;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Resource store selection
    #[serde(default)]
    pub storage: StorageBackend,

    /// Database configuration, used by the MySQL backend
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            ..Default::default()
        }
    }

    /// Create configuration for production environment
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig::new("0.0.0.0", 8080),
            storage: StorageBackend::Mysql,
            database: DatabaseConfig::new("mysql://prod-db:3306/locadora").with_max_connections(50),
            auth: AuthConfig {
                jwt: JwtConfig::new("use-env-variable"),
                password: PasswordConfig { bcrypt_cost: 12 },
            },
            cors: CorsConfig::default(),
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            environment: Environment::from_env(),
            server: ServerConfig::from_env(),
            storage: StorageBackend::from_env(),
            database: DatabaseConfig::from_env(),
            auth: AuthConfig::from_env(),
            cors: CorsConfig::from_env(),
        }
    }

    /// Problems that must stop the server from starting
    pub fn startup_problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.environment.is_production() && self.auth.jwt.is_using_default_secret() {
            problems.push("JWT secret must be set in production".to_string());
        }
        if self.auth.jwt.access_token_expiry <= 0 {
            problems.push("JWT expiry must be positive".to_string());
        }
        if !(4..=31).contains(&self.auth.password.bcrypt_cost) {
            problems.push("bcrypt cost must be between 4 and 31".to_string());
        }
        problems
    }
}

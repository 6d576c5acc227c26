//! Shared utilities and common types for the rental server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error response structures
//! - Validation helpers
//! - Response wrappers

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

pub use config::{
    AppConfig, AuthConfig, CorsConfig, DatabaseConfig, Environment, JwtConfig, PasswordConfig,
    ServerConfig, StorageBackend,
};
pub use errors::{error_codes, ErrorResponse};
pub use types::{ApiResponse, HealthResponse, HealthStatus, Language, ServiceHealth};
pub use utils::validation;

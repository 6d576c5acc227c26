//! Type definitions module
//!
//! - `language` - Localization of error messages
//! - `response` - API response wrappers and health checks

pub mod language;
pub mod response;

pub use language::Language;
pub use response::{ApiResponse, HealthResponse, HealthStatus, ServiceHealth};

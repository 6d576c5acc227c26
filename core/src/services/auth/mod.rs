//! Authentication service module
//!
//! - Client self-registration and staff registration
//! - Email and password login issuing an access token
//! - bcrypt password hashing

mod config;
mod password;
mod service;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use service::{AuthService, RegisterUser};

//! Token service module for JWT management
//!
//! - HS256 access token issuing and verification
//! - Injectable clock for expiry decisions

mod clock;
mod config;
mod service;

#[cfg(test)]
mod tests;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::TokenServiceConfig;
pub use service::{Claims, IssuedToken, TokenService, USER_ID_CLAIM};

//! Value objects representing immutable domain concepts.

pub mod auth_response;
pub mod identity;
pub mod rental_report;

pub use auth_response::AuthResponse;
pub use identity::Identity;
pub use rental_report::{RentalStatistics, RentalSummary};

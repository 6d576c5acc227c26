//! Business services containing domain logic and use cases.

pub mod auth;
pub mod authorization;
pub mod rental;
pub mod token;
pub mod user;
pub mod vehicle;

#[cfg(test)]
pub(crate) mod test_support;

pub use auth::{AuthService, AuthServiceConfig, RegisterUser};
pub use authorization::{AuthorizationPolicy, Decision, DenyReason, Requirement, Rule};
pub use rental::{NewRental, RentalService};
pub use token::{Clock, IssuedToken, ManualClock, SystemClock, TokenService, TokenServiceConfig};
pub use user::{ProfileUpdate, UserService};
pub use vehicle::{NewVehicle, VehicleService, VehicleUpdate};

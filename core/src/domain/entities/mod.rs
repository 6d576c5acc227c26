//! Domain entities representing core business objects.

pub mod rental;
pub mod user;
pub mod vehicle;

pub use rental::{billable_days, total_price, Rental, RentalStatus, MAX_NOTES_LENGTH};
pub use user::{Address, Role, User};
pub use vehicle::Vehicle;

pub mod memory;
pub mod rental;
pub mod user;
pub mod vehicle;

pub use memory::InMemoryStore;
pub use rental::{CloseOutcome, RentalRepository};
pub use user::{UserChange, UserRepository};
pub use vehicle::VehicleRepository;

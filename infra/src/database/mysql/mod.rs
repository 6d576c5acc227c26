//! MySQL-specific database implementations
//!
//! This module contains MySQL implementations of repository traits
//! using SQLx for database operations.

mod rows;

pub mod rental_repository_impl;
pub mod user_repository_impl;
pub mod vehicle_repository_impl;

use std::sync::Arc;

// Re-export the MySQL implementations
pub use rental_repository_impl::MySqlRentalRepository;
pub use user_repository_impl::MySqlUserRepository;
pub use vehicle_repository_impl::MySqlVehicleRepository;

use super::DatabasePool;

/// The three repositories over one shared pool
#[derive(Clone)]
pub struct MySqlRepositories {
    pub users: Arc<MySqlUserRepository>,
    pub vehicles: Arc<MySqlVehicleRepository>,
    pub rentals: Arc<MySqlRentalRepository>,
}

impl MySqlRepositories {
    pub fn new(pool: &DatabasePool) -> Self {
        let pool = pool.get_pool();
        Self {
            users: Arc::new(MySqlUserRepository::new(pool.clone())),
            vehicles: Arc::new(MySqlVehicleRepository::new(pool.clone())),
            rentals: Arc::new(MySqlRentalRepository::new(pool.clone())),
        }
    }
}

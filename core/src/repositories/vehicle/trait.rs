//! Vehicle repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::vehicle::Vehicle;
use crate::errors::DomainError;

/// Repository trait for the vehicle catalogue
///
/// Availability is owned by the rental lifecycle. Only the atomic operations on
/// [`RentalRepository`](crate::repositories::RentalRepository) change
/// `is_available` of a stored vehicle.
#[async_trait]
pub trait VehicleRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, DomainError>;

    /// Whole fleet, ordered by make then model
    async fn find_all(&self) -> Result<Vec<Vehicle>, DomainError>;

    /// Vehicles whose availability flag is set
    async fn find_by_available_true(&self) -> Result<Vec<Vehicle>, DomainError>;

    /// Exact category match
    async fn find_by_category(&self, category: &str) -> Result<Vec<Vehicle>, DomainError>;

    async fn exists_by_plate(&self, plate: &str) -> Result<bool, DomainError>;

    /// Insert or update by id
    ///
    /// Updating an existing vehicle keeps its stored `is_available` flag and
    /// returns the vehicle as persisted.
    ///
    /// # Returns
    /// * `Err(DomainError::ValidationErr(DuplicateValue))` - Plate already used by
    ///   another vehicle
    async fn save(&self, vehicle: Vehicle) -> Result<Vehicle, DomainError>;

    /// Remove a vehicle
    ///
    /// # Returns
    /// * `Ok(true)` - Vehicle was deleted
    /// * `Ok(false)` - Vehicle not found
    /// * `Err(RentalError::VehicleInUse)` - Some rental references it
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}

//! Rental repository trait, including the atomic lifecycle units.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::rental::{Rental, RentalStatus};
use crate::domain::entities::vehicle::Vehicle;
use crate::errors::DomainError;

/// Result of trying to move an ACTIVE rental to a terminal status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseOutcome {
    /// Transition applied; carries the updated rental
    Closed(Rental),
    /// No rental with that id
    NotFound,
    /// The rental was no longer ACTIVE; carries its current status
    NotActive(RentalStatus),
}

/// Repository trait for rentals
///
/// `open`, `close` and `set_vehicle_availability` each run as one atomic unit
/// against both the vehicle and rental tables. Concurrent callers on the same
/// vehicle or rental observe a single winner.
#[async_trait]
pub trait RentalRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Rental>, DomainError>;

    /// Every rental, most recent pickup first
    async fn find_all(&self) -> Result<Vec<Rental>, DomainError>;

    /// Rentals of one user, most recent pickup first
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<Rental>, DomainError>;

    /// Rentals of one user in `status`, most recent pickup first
    async fn find_by_user_id_and_status(
        &self,
        user_id: Uuid,
        status: RentalStatus,
    ) -> Result<Vec<Rental>, DomainError>;

    /// Plain upsert by id, without touching vehicle availability
    ///
    /// Meant for imports and fixtures; lifecycle changes go through `open` and
    /// `close`.
    async fn save(&self, rental: Rental) -> Result<Rental, DomainError>;

    /// Claim the vehicle and persist the new ACTIVE rental together
    ///
    /// # Returns
    /// * `Ok(Some(Rental))` - Vehicle flipped from available to unavailable and
    ///   the rental stored
    /// * `Ok(None)` - Vehicle was unavailable (or missing) at commit time;
    ///   nothing written
    async fn open(&self, rental: Rental) -> Result<Option<Rental>, DomainError>;

    /// Move an ACTIVE rental to `status` and release its vehicle together
    async fn close(&self, id: Uuid, status: RentalStatus) -> Result<CloseOutcome, DomainError>;

    /// Staff override of the availability flag
    ///
    /// # Returns
    /// * `Ok(Some(Vehicle))` - Flag updated
    /// * `Ok(None)` - Vehicle not found
    /// * `Err(RentalError::VehicleHasActiveRental)` - An ACTIVE rental holds it
    async fn set_vehicle_availability(
        &self,
        vehicle_id: Uuid,
        available: bool,
    ) -> Result<Option<Vehicle>, DomainError>;
}

//! Rental lifecycle engine
//!
//! ACTIVE is the only initial state, COMPLETED and CANCELLED are terminal. The
//! engine is the only writer of `Rental::status` and `Vehicle::is_available`;
//! both change together through the atomic units of [`RentalRepository`].

use chrono::NaiveDate;
use std::sync::Arc;
use uuid::Uuid;

use rent_shared::utils::validation::validators::{mask_email, normalize_email};

use crate::domain::entities::rental::{Rental, RentalStatus, MAX_NOTES_LENGTH};
use crate::domain::entities::vehicle::Vehicle;
use crate::domain::value_objects::{RentalStatistics, RentalSummary};
use crate::errors::{DomainError, DomainResult, RentalError, ValidationError};
use crate::repositories::{CloseOutcome, RentalRepository, UserRepository, VehicleRepository};

/// Input for opening a rental
#[derive(Debug, Clone)]
pub struct NewRental {
    pub vehicle_id: Uuid,
    pub pickup_date: NaiveDate,
    pub return_date: NaiveDate,
    pub notes: Option<String>,
}

pub struct RentalService<U, V, R>
where
    U: UserRepository + ?Sized,
    V: VehicleRepository + ?Sized,
    R: RentalRepository + ?Sized,
{
    user_repository: Arc<U>,
    vehicle_repository: Arc<V>,
    rental_repository: Arc<R>,
}

impl<U, V, R> RentalService<U, V, R>
where
    U: UserRepository + ?Sized,
    V: VehicleRepository + ?Sized,
    R: RentalRepository + ?Sized,
{
    pub fn new(user_repository: Arc<U>, vehicle_repository: Arc<V>, rental_repository: Arc<R>) -> Self {
        Self {
            user_repository,
            vehicle_repository,
            rental_repository,
        }
    }

    /// Open a rental for the user identified by `user_email`
    ///
    /// The date range is checked before anything is looked up, so an inverted
    /// range is reported even for an unavailable vehicle.
    ///
    /// # Errors
    /// * `RentalError::InvalidDateRange` - return date before pickup date
    /// * `ValidationError::InvalidLength` - notes too long
    /// * `DomainError::NotFound` - unknown user or vehicle
    /// * `RentalError::VehicleUnavailable` - vehicle held, including when a
    ///   concurrent request claimed it first
    pub async fn create(&self, user_email: &str, request: NewRental) -> DomainResult<Rental> {
        if request.return_date < request.pickup_date {
            return Err(RentalError::InvalidDateRange.into());
        }
        if let Some(notes) = &request.notes {
            let len = notes.chars().count();
            if len > MAX_NOTES_LENGTH {
                return Err(ValidationError::InvalidLength {
                    field: "notes".to_string(),
                    max: MAX_NOTES_LENGTH,
                    actual: len,
                }
                .into());
            }
        }

        let email = normalize_email(user_email);
        let user = self
            .user_repository
            .find_by_email(&email)
            .await?
            .ok_or_else(|| DomainError::not_found("user"))?;
        let vehicle = self
            .vehicle_repository
            .find_by_id(request.vehicle_id)
            .await?
            .ok_or_else(|| DomainError::not_found("vehicle"))?;

        if !vehicle.is_available {
            tracing::debug!(vehicle_id = %vehicle.id, "Rental refused, vehicle unavailable");
            return Err(RentalError::VehicleUnavailable { vehicle_id: vehicle.id }.into());
        }

        let rental = Rental::new(
            user.id,
            vehicle.id,
            request.pickup_date,
            request.return_date,
            request.notes,
            vehicle.daily_rate,
        );

        match self.rental_repository.open(rental).await? {
            Some(rental) => {
                tracing::info!(
                    rental_id = %rental.id,
                    vehicle_id = %rental.vehicle_id,
                    user = %mask_email(&email),
                    total = %rental.total_price,
                    event = "rental_opened",
                    "Rental opened"
                );
                Ok(rental)
            }
            None => {
                tracing::warn!(
                    vehicle_id = %vehicle.id,
                    event = "rental_race_lost",
                    "Vehicle claimed by a concurrent rental"
                );
                Err(RentalError::VehicleUnavailable { vehicle_id: vehicle.id }.into())
            }
        }
    }

    /// ACTIVE -> COMPLETED, releasing the vehicle
    pub async fn complete(&self, rental_id: Uuid) -> DomainResult<Rental> {
        self.close(rental_id, RentalStatus::Completed).await
    }

    /// ACTIVE -> CANCELLED, releasing the vehicle
    pub async fn cancel(&self, rental_id: Uuid) -> DomainResult<Rental> {
        self.close(rental_id, RentalStatus::Cancelled).await
    }

    async fn close(&self, rental_id: Uuid, to: RentalStatus) -> DomainResult<Rental> {
        match self.rental_repository.close(rental_id, to).await? {
            CloseOutcome::Closed(rental) => {
                tracing::info!(
                    rental_id = %rental.id,
                    vehicle_id = %rental.vehicle_id,
                    status = %rental.status,
                    event = "rental_closed",
                    "Rental closed"
                );
                Ok(rental)
            }
            CloseOutcome::NotFound => Err(DomainError::not_found("rental")),
            CloseOutcome::NotActive(from) => {
                tracing::debug!(rental_id = %rental_id, from = %from, to = %to, "Illegal rental transition");
                Err(RentalError::IllegalTransition {
                    from: from.to_string(),
                    to: to.to_string(),
                }
                .into())
            }
        }
    }

    pub async fn get(&self, rental_id: Uuid) -> DomainResult<Rental> {
        self.rental_repository
            .find_by_id(rental_id)
            .await?
            .ok_or_else(|| DomainError::not_found("rental"))
    }

    /// A user's rentals, most recent pickup first
    pub async fn list_for_user(&self, user_id: Uuid) -> DomainResult<Vec<Rental>> {
        self.rental_repository.find_by_user_id(user_id).await
    }

    pub async fn list_for_user_with_status(
        &self,
        user_id: Uuid,
        status: RentalStatus,
    ) -> DomainResult<Vec<Rental>> {
        self.rental_repository
            .find_by_user_id_and_status(user_id, status)
            .await
    }

    pub async fn list_all(&self) -> DomainResult<Vec<Rental>> {
        self.rental_repository.find_all().await
    }

    /// Counts per status and the value of completed rentals
    pub async fn summary(&self, user_id: Uuid) -> DomainResult<RentalSummary> {
        let rentals = self.rental_repository.find_by_user_id(user_id).await?;
        Ok(RentalSummary::from_rentals(&rentals))
    }

    /// Counts and the value of every rental that was not cancelled
    pub async fn statistics(&self, user_id: Uuid) -> DomainResult<RentalStatistics> {
        let rentals = self.rental_repository.find_by_user_id(user_id).await?;
        Ok(RentalStatistics::from_rentals(&rentals))
    }

    pub async fn check_availability(&self, vehicle_id: Uuid) -> DomainResult<bool> {
        self.vehicle_repository
            .find_by_id(vehicle_id)
            .await?
            .map(|v| v.is_available)
            .ok_or_else(|| DomainError::not_found("vehicle"))
    }

    /// Staff hold or release of a vehicle outside any rental
    ///
    /// # Errors
    /// * `RentalError::VehicleHasActiveRental` - an ACTIVE rental owns the flag
    pub async fn set_vehicle_availability(
        &self,
        vehicle_id: Uuid,
        available: bool,
    ) -> DomainResult<Vehicle> {
        let vehicle = self
            .rental_repository
            .set_vehicle_availability(vehicle_id, available)
            .await?
            .ok_or_else(|| DomainError::not_found("vehicle"))?;
        tracing::info!(vehicle_id = %vehicle_id, available, "Vehicle availability set by staff");
        Ok(vehicle)
    }
}

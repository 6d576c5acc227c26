//! In-memory resource store backing all three repositories.
//!
//! Every table sits behind a single `RwLock`, so the check-then-write
//! sequences of `open`, `close` and `set_vehicle_availability` run under one
//! write guard and cannot interleave.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::{Rental, RentalStatus, Role, User, Vehicle};
use crate::errors::{DomainError, RentalError, ValidationError};

use super::rental::{CloseOutcome, RentalRepository};
use super::user::{UserChange, UserRepository};
use super::vehicle::VehicleRepository;

#[cfg(test)]
mod tests;

#[derive(Debug, Default)]
struct StoreState {
    users: HashMap<Uuid, User>,
    vehicles: HashMap<Uuid, Vehicle>,
    rentals: HashMap<Uuid, Rental>,
}

impl StoreState {
    fn check_unique_user(&self, user: &User) -> Result<(), DomainError> {
        let others = || self.users.values().filter(|u| u.id != user.id);
        if others().any(|u| u.email == user.email) {
            return Err(duplicate("email"));
        }
        if others().any(|u| u.national_id == user.national_id) {
            return Err(duplicate("national_id"));
        }
        Ok(())
    }

    fn has_active_rental_for_vehicle(&self, vehicle_id: Uuid) -> bool {
        self.rentals
            .values()
            .any(|r| r.vehicle_id == vehicle_id && r.status == RentalStatus::Active)
    }
}

/// Process-local store; clones share the same tables
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn duplicate(field: &str) -> DomainError {
    ValidationError::DuplicateValue {
        field: field.to_string(),
    }
    .into()
}

fn by_pickup_desc(mut rentals: Vec<Rental>) -> Vec<Rental> {
    rentals.sort_by(|a, b| {
        b.pickup_date
            .cmp(&a.pickup_date)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
    rentals
}

fn by_creation(mut users: Vec<User>) -> Vec<User> {
    users.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.email.cmp(&b.email)));
    users
}

fn by_make_model(mut vehicles: Vec<Vehicle>) -> Vec<Vehicle> {
    vehicles.sort_by(|a, b| {
        a.make
            .cmp(&b.make)
            .then_with(|| a.model.cmp(&b.model))
            .then_with(|| a.plate.cmp(&b.plate))
    });
    vehicles
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let state = self.state.read().await;
        Ok(state.users.get(&id).cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let state = self.state.read().await;
        Ok(state.users.values().any(|u| u.email == email))
    }

    async fn exists_by_national_id(&self, national_id: &str) -> Result<bool, DomainError> {
        let state = self.state.read().await;
        Ok(state.users.values().any(|u| u.national_id == national_id))
    }

    async fn save(&self, user: User) -> Result<User, DomainError> {
        let mut state = self.state.write().await;
        state.check_unique_user(&user)?;
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn modify(&self, id: Uuid, change: UserChange) -> Result<Option<User>, DomainError> {
        let mut state = self.state.write().await;

        let mut user = match state.users.get(&id) {
            Some(stored) => stored.clone(),
            None => return Ok(None),
        };
        change(&mut user)?;
        state.check_unique_user(&user)?;

        state.users.insert(id, user.clone());
        Ok(Some(user))
    }

    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        let state = self.state.read().await;
        Ok(by_creation(state.users.values().cloned().collect()))
    }

    async fn find_by_role(&self, role: Role) -> Result<Vec<User>, DomainError> {
        let state = self.state.read().await;
        Ok(by_creation(
            state.users.values().filter(|u| u.role == role).cloned().collect(),
        ))
    }
}

#[async_trait]
impl VehicleRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, DomainError> {
        let state = self.state.read().await;
        Ok(state.vehicles.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Vehicle>, DomainError> {
        let state = self.state.read().await;
        Ok(by_make_model(state.vehicles.values().cloned().collect()))
    }

    async fn find_by_available_true(&self) -> Result<Vec<Vehicle>, DomainError> {
        let state = self.state.read().await;
        Ok(by_make_model(
            state.vehicles.values().filter(|v| v.is_available).cloned().collect(),
        ))
    }

    async fn find_by_category(&self, category: &str) -> Result<Vec<Vehicle>, DomainError> {
        let state = self.state.read().await;
        Ok(by_make_model(
            state
                .vehicles
                .values()
                .filter(|v| v.category == category)
                .cloned()
                .collect(),
        ))
    }

    async fn exists_by_plate(&self, plate: &str) -> Result<bool, DomainError> {
        let state = self.state.read().await;
        Ok(state.vehicles.values().any(|v| v.plate == plate))
    }

    async fn save(&self, vehicle: Vehicle) -> Result<Vehicle, DomainError> {
        let mut state = self.state.write().await;

        if state
            .vehicles
            .values()
            .any(|v| v.id != vehicle.id && v.plate == vehicle.plate)
        {
            return Err(duplicate("plate"));
        }

        let vehicle = match state.vehicles.get(&vehicle.id) {
            Some(stored) => Vehicle {
                is_available: stored.is_available,
                ..vehicle
            },
            None => vehicle,
        };
        state.vehicles.insert(vehicle.id, vehicle.clone());
        Ok(vehicle)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;

        if !state.vehicles.contains_key(&id) {
            return Ok(false);
        }
        if state.rentals.values().any(|r| r.vehicle_id == id) {
            return Err(RentalError::VehicleInUse { vehicle_id: id }.into());
        }

        state.vehicles.remove(&id);
        Ok(true)
    }
}

#[async_trait]
impl RentalRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Rental>, DomainError> {
        let state = self.state.read().await;
        Ok(state.rentals.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Rental>, DomainError> {
        let state = self.state.read().await;
        Ok(by_pickup_desc(state.rentals.values().cloned().collect()))
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<Rental>, DomainError> {
        let state = self.state.read().await;
        Ok(by_pickup_desc(
            state
                .rentals
                .values()
                .filter(|r| r.user_id == user_id)
                .cloned()
                .collect(),
        ))
    }

    async fn find_by_user_id_and_status(
        &self,
        user_id: Uuid,
        status: RentalStatus,
    ) -> Result<Vec<Rental>, DomainError> {
        let state = self.state.read().await;
        Ok(by_pickup_desc(
            state
                .rentals
                .values()
                .filter(|r| r.user_id == user_id && r.status == status)
                .cloned()
                .collect(),
        ))
    }

    async fn save(&self, rental: Rental) -> Result<Rental, DomainError> {
        let mut state = self.state.write().await;
        state.rentals.insert(rental.id, rental.clone());
        Ok(rental)
    }

    async fn open(&self, rental: Rental) -> Result<Option<Rental>, DomainError> {
        let mut state = self.state.write().await;

        if state.has_active_rental_for_vehicle(rental.vehicle_id) {
            return Ok(None);
        }
        match state.vehicles.get_mut(&rental.vehicle_id) {
            Some(vehicle) if vehicle.is_available => vehicle.set_availability(false),
            _ => return Ok(None),
        }

        state.rentals.insert(rental.id, rental.clone());
        Ok(Some(rental))
    }

    async fn close(&self, id: Uuid, status: RentalStatus) -> Result<CloseOutcome, DomainError> {
        let mut state = self.state.write().await;

        let rental = match state.rentals.get_mut(&id) {
            Some(rental) => rental,
            None => return Ok(CloseOutcome::NotFound),
        };
        if rental.status != RentalStatus::Active {
            return Ok(CloseOutcome::NotActive(rental.status));
        }

        rental.status = status;
        rental.updated_at = Utc::now();
        let closed = rental.clone();

        if let Some(vehicle) = state.vehicles.get_mut(&closed.vehicle_id) {
            vehicle.set_availability(true);
        }
        Ok(CloseOutcome::Closed(closed))
    }

    async fn set_vehicle_availability(
        &self,
        vehicle_id: Uuid,
        available: bool,
    ) -> Result<Option<Vehicle>, DomainError> {
        let mut state = self.state.write().await;

        if !state.vehicles.contains_key(&vehicle_id) {
            return Ok(None);
        }
        if state.has_active_rental_for_vehicle(vehicle_id) {
            return Err(RentalError::VehicleHasActiveRental { vehicle_id }.into());
        }

        let vehicle = state.vehicles.get_mut(&vehicle_id).map(|v| {
            v.set_availability(available);
            v.clone()
        });
        Ok(vehicle)
    }
}

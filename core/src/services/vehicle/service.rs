//! Vehicle catalogue management

use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use rent_shared::utils::validation::validators::{is_plate, normalize_plate};

use crate::domain::entities::vehicle::Vehicle;
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::repositories::VehicleRepository;

const MIN_YEAR: i32 = 1900;

/// Fields for a new vehicle
#[derive(Debug, Clone)]
pub struct NewVehicle {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub category: String,
    pub plate: String,
    pub daily_rate: Decimal,
    pub description: Option<String>,
}

/// Replacement of the descriptive fields; plate and availability are kept
#[derive(Debug, Clone)]
pub struct VehicleUpdate {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub category: String,
    pub daily_rate: Decimal,
    pub description: Option<String>,
}

pub struct VehicleService<V>
where
    V: VehicleRepository + ?Sized,
{
    vehicle_repository: Arc<V>,
}

fn check_rate_and_year(daily_rate: Decimal, year: i32) -> DomainResult<()> {
    if daily_rate.is_sign_negative() {
        return Err(ValidationError::OutOfRange {
            field: "daily_rate".to_string(),
        }
        .into());
    }
    if year < MIN_YEAR {
        return Err(ValidationError::OutOfRange {
            field: "year".to_string(),
        }
        .into());
    }
    Ok(())
}

impl<V> VehicleService<V>
where
    V: VehicleRepository + ?Sized,
{
    pub fn new(vehicle_repository: Arc<V>) -> Self {
        Self { vehicle_repository }
    }

    pub async fn list_all(&self) -> DomainResult<Vec<Vehicle>> {
        self.vehicle_repository.find_all().await
    }

    pub async fn list_available(&self) -> DomainResult<Vec<Vehicle>> {
        self.vehicle_repository.find_by_available_true().await
    }

    pub async fn list_by_category(&self, category: &str) -> DomainResult<Vec<Vehicle>> {
        self.vehicle_repository.find_by_category(category).await
    }

    pub async fn get(&self, id: Uuid) -> DomainResult<Vehicle> {
        self.vehicle_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("vehicle"))
    }

    /// Add a vehicle to the fleet; new vehicles start available
    pub async fn create(&self, request: NewVehicle) -> DomainResult<Vehicle> {
        check_rate_and_year(request.daily_rate, request.year)?;

        let plate = normalize_plate(&request.plate);
        if !is_plate(&plate) {
            return Err(ValidationError::InvalidFormat {
                field: "plate".to_string(),
            }
            .into());
        }
        if self.vehicle_repository.exists_by_plate(&plate).await? {
            return Err(ValidationError::DuplicateValue {
                field: "plate".to_string(),
            }
            .into());
        }

        let mut vehicle = Vehicle::new(
            request.make,
            request.model,
            request.year,
            request.category,
            plate,
            request.daily_rate,
        );
        vehicle.description = request.description;

        let vehicle = self.vehicle_repository.save(vehicle).await?;
        tracing::info!(vehicle_id = %vehicle.id, plate = %vehicle.plate, "Vehicle added to fleet");
        Ok(vehicle)
    }

    pub async fn update(&self, id: Uuid, request: VehicleUpdate) -> DomainResult<Vehicle> {
        check_rate_and_year(request.daily_rate, request.year)?;

        let mut vehicle = self.get(id).await?;
        vehicle.make = request.make;
        vehicle.model = request.model;
        vehicle.year = request.year;
        vehicle.category = request.category;
        vehicle.daily_rate = request.daily_rate;
        vehicle.description = request.description;
        vehicle.updated_at = chrono::Utc::now();

        let vehicle = self.vehicle_repository.save(vehicle).await?;
        tracing::info!(vehicle_id = %vehicle.id, "Vehicle updated");
        Ok(vehicle)
    }

    /// Remove a vehicle that no rental has ever referenced
    pub async fn delete(&self, id: Uuid) -> DomainResult<()> {
        if !self.vehicle_repository.delete(id).await? {
            return Err(DomainError::not_found("vehicle"));
        }
        tracing::info!(vehicle_id = %id, "Vehicle removed from fleet");
        Ok(())
    }
}

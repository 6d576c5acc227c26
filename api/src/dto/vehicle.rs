use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use rent_core::domain::entities::Vehicle;
use rent_core::services::vehicle::{NewVehicle, VehicleUpdate};

fn non_negative(value: &Decimal) -> Result<(), validator::ValidationError> {
    if value.is_sign_negative() {
        return Err(validator::ValidationError::new("non_negative"));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VehicleRequest {
    #[validate(length(min = 1, max = 50))]
    pub make: String,

    #[validate(length(min = 1, max = 50))]
    pub model: String,

    #[validate(range(min = 1900, max = 2100))]
    pub year: i32,

    #[validate(length(min = 1, max = 30))]
    pub category: String,

    /// Old (`ABC-1234`) or Mercosul (`ABC1D23`) format
    #[validate(length(min = 7, max = 8))]
    pub plate: String,

    #[validate(custom = "non_negative")]
    pub daily_rate: Decimal,

    #[validate(length(max = 1000))]
    pub description: Option<String>,
}

impl From<VehicleRequest> for NewVehicle {
    fn from(request: VehicleRequest) -> Self {
        NewVehicle {
            make: request.make,
            model: request.model,
            year: request.year,
            category: request.category,
            plate: request.plate,
            daily_rate: request.daily_rate,
            description: request.description,
        }
    }
}

/// Descriptive fields only; plate and availability are not editable here
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VehicleUpdateRequest {
    #[validate(length(min = 1, max = 50))]
    pub make: String,

    #[validate(length(min = 1, max = 50))]
    pub model: String,

    #[validate(range(min = 1900, max = 2100))]
    pub year: i32,

    #[validate(length(min = 1, max = 30))]
    pub category: String,

    #[validate(custom = "non_negative")]
    pub daily_rate: Decimal,

    #[validate(length(max = 1000))]
    pub description: Option<String>,
}

impl From<VehicleUpdateRequest> for VehicleUpdate {
    fn from(request: VehicleUpdateRequest) -> Self {
        VehicleUpdate {
            make: request.make,
            model: request.model,
            year: request.year,
            category: request.category,
            daily_rate: request.daily_rate,
            description: request.description,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityQuery {
    pub available: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleResponse {
    pub id: Uuid,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub category: String,
    pub plate: String,
    pub description: Option<String>,
    pub daily_rate: Decimal,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            make: vehicle.make,
            model: vehicle.model,
            year: vehicle.year,
            category: vehicle.category,
            plate: vehicle.plate,
            description: vehicle.description,
            daily_rate: vehicle.daily_rate,
            is_available: vehicle.is_available,
            created_at: vehicle.created_at,
            updated_at: vehicle.updated_at,
        }
    }
}

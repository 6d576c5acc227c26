use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use rent_core::domain::entities::{Rental, RentalStatus};
use rent_core::services::rental::NewRental;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RentalRequest {
    pub vehicle_id: Uuid,
    pub pickup_date: NaiveDate,
    pub return_date: NaiveDate,

    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

impl From<RentalRequest> for NewRental {
    fn from(request: RentalRequest) -> Self {
        NewRental {
            vehicle_id: request.vehicle_id,
            pickup_date: request.pickup_date,
            return_date: request.return_date,
            notes: request.notes,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentalResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub vehicle_id: Uuid,
    pub pickup_date: NaiveDate,
    pub return_date: NaiveDate,
    pub notes: Option<String>,
    pub total_price: Decimal,
    pub status: RentalStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Rental> for RentalResponse {
    fn from(rental: Rental) -> Self {
        Self {
            id: rental.id,
            user_id: rental.user_id,
            vehicle_id: rental.vehicle_id,
            pickup_date: rental.pickup_date,
            return_date: rental.return_date,
            notes: rental.notes,
            total_price: rental.total_price,
            status: rental.status,
            created_at: rental.created_at,
            updated_at: rental.updated_at,
        }
    }
}

pub fn rental_list(rentals: Vec<Rental>) -> Vec<RentalResponse> {
    rentals.into_iter().map(RentalResponse::from).collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleAvailabilityResponse {
    pub vehicle_id: Uuid,
    pub available: bool,
}

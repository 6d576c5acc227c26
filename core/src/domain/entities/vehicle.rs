//! Vehicle entity representing a rentable car in the fleet.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: Uuid,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub category: String,
    /// Unique, normalized to uppercase without hyphen
    pub plate: String,
    pub description: Option<String>,
    pub daily_rate: Decimal,
    /// False exactly while one ACTIVE rental holds the vehicle, or while staff
    /// hold it out of service
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vehicle {
    pub fn new(
        make: String,
        model: String,
        year: i32,
        category: String,
        plate: String,
        daily_rate: Decimal,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            make,
            model,
            year,
            category,
            plate,
            description: None,
            daily_rate,
            is_available: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn set_availability(&mut self, available: bool) {
        self.is_available = available;
        self.updated_at = Utc::now();
    }
}

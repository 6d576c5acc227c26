//! Rental entity and its lifecycle states.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum length of the free-text notes field
pub const MAX_NOTES_LENGTH: usize = 500;

/// Rental status
///
/// `Active` is the only initial state; `Completed` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RentalStatus {
    Active,
    Completed,
    Cancelled,
}

impl RentalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RentalStatus::Active => "ACTIVE",
            RentalStatus::Completed => "COMPLETED",
            RentalStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, RentalStatus::Active)
    }
}

impl std::fmt::Display for RentalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RentalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ACTIVE" => Ok(RentalStatus::Active),
            "COMPLETED" => Ok(RentalStatus::Completed),
            "CANCELLED" => Ok(RentalStatus::Cancelled),
            other => Err(format!("Unknown rental status: {}", other)),
        }
    }
}

/// A reservation of one vehicle by one user over an inclusive date range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rental {
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

impl Rental {
    /// Creates an ACTIVE rental priced at `daily_rate` per billable day
    pub fn new(
        user_id: Uuid,
        vehicle_id: Uuid,
        pickup_date: NaiveDate,
        return_date: NaiveDate,
        notes: Option<String>,
        daily_rate: Decimal,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            vehicle_id,
            pickup_date,
            return_date,
            notes,
            total_price: total_price(daily_rate, pickup_date, return_date),
            status: RentalStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == RentalStatus::Active
    }
}

/// Number of days charged; a same-day rental bills one day
pub fn billable_days(pickup_date: NaiveDate, return_date: NaiveDate) -> i64 {
    (return_date - pickup_date).num_days().max(1)
}

pub fn total_price(daily_rate: Decimal, pickup_date: NaiveDate, return_date: NaiveDate) -> Decimal {
    daily_rate * Decimal::from(billable_days(pickup_date, return_date))
}

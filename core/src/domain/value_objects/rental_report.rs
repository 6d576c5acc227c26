//! Per-user rental aggregates.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Rental, RentalStatus};

/// Counts per status plus revenue from completed rentals only
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalSummary {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
    pub cancelled: usize,
    pub completed_value: Decimal,
}

/// Profile statistics; the spend includes active rentals, unlike
/// [`RentalSummary::completed_value`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalStatistics {
    pub total_rentals: usize,
    pub active_rentals: usize,
    pub completed_rentals: usize,
    pub total_spent: Decimal,
}

impl RentalSummary {
    pub fn from_rentals(rentals: &[Rental]) -> Self {
        rentals.iter().fold(Self::default(), |mut acc, rental| {
            acc.total += 1;
            match rental.status {
                RentalStatus::Active => acc.active += 1,
                RentalStatus::Completed => {
                    acc.completed += 1;
                    acc.completed_value += rental.total_price;
                }
                RentalStatus::Cancelled => acc.cancelled += 1,
            }
            acc
        })
    }
}

impl RentalStatistics {
    pub fn from_rentals(rentals: &[Rental]) -> Self {
        rentals.iter().fold(Self::default(), |mut acc, rental| {
            acc.total_rentals += 1;
            match rental.status {
                RentalStatus::Active => acc.active_rentals += 1,
                RentalStatus::Completed => acc.completed_rentals += 1,
                RentalStatus::Cancelled => return acc,
            }
            acc.total_spent += rental.total_price;
            acc
        })
    }
}

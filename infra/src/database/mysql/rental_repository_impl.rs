//! MySQL implementation of the RentalRepository trait.
//!
//! `open`, `close` and `set_vehicle_availability` run inside one transaction
//! each, locking the affected rows with `SELECT ... FOR UPDATE`. The
//! `uk_rentals_active_vehicle` unique key on the generated
//! `active_vehicle_id` column backs the one-active-rental-per-vehicle rule at
//! the schema level.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{MySql, MySqlPool, Row, Transaction};
use uuid::Uuid;

use rent_core::domain::entities::rental::{Rental, RentalStatus};
use rent_core::domain::entities::vehicle::Vehicle;
use rent_core::errors::{DomainError, RentalError};
use rent_core::repositories::{CloseOutcome, RentalRepository};

use super::rows::{
    collect, is_unique_violation, parse_status, query_failed, row_to_rental, row_to_vehicle, RENTAL_COLUMNS,
    VEHICLE_COLUMNS,
};

pub struct MySqlRentalRepository {
    pool: MySqlPool,
}

impl MySqlRentalRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn begin(&self) -> Result<Transaction<'static, MySql>, DomainError> {
        self.pool
            .begin()
            .await
            .map_err(|e| query_failed("Failed to begin transaction", e))
    }

    async fn commit(tx: Transaction<'static, MySql>) -> Result<(), DomainError> {
        tx.commit()
            .await
            .map_err(|e| query_failed("Failed to commit transaction", e))
    }

    async fn rollback(tx: Transaction<'static, MySql>) -> Result<(), DomainError> {
        tx.rollback()
            .await
            .map_err(|e| query_failed("Failed to roll back transaction", e))
    }

    async fn active_rental_exists(
        tx: &mut Transaction<'static, MySql>,
        vehicle_id: Uuid,
    ) -> Result<bool, DomainError> {
        let row = sqlx::query(
            "SELECT EXISTS(SELECT 1 FROM rentals WHERE vehicle_id = ? AND status = 'ACTIVE') AS found",
        )
        .bind(vehicle_id.to_string())
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| query_failed("Failed to check active rentals", e))?;

        let found: i64 = row
            .try_get("found")
            .map_err(|e| query_failed("Failed to read existence result", e))?;
        Ok(found == 1)
    }

    async fn fetch_many(&self, filter: &str, binds: &[String]) -> Result<Vec<Rental>, DomainError> {
        let query = format!(
            "SELECT {} FROM rentals {} ORDER BY pickup_date DESC, created_at DESC",
            RENTAL_COLUMNS, filter
        );
        let mut q = sqlx::query(&query);
        for value in binds {
            q = q.bind(value);
        }
        let rows = q
            .fetch_all(&self.pool)
            .await
            .map_err(|e| query_failed("Failed to list rentals", e))?;

        collect(rows, row_to_rental)
    }
}

#[async_trait]
impl RentalRepository for MySqlRentalRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Rental>, DomainError> {
        let query = format!("SELECT {} FROM rentals WHERE id = ? LIMIT 1", RENTAL_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_failed("Failed to find rental", e))?;

        row.as_ref().map(row_to_rental).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Rental>, DomainError> {
        self.fetch_many("", &[]).await
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<Rental>, DomainError> {
        self.fetch_many("WHERE user_id = ?", &[user_id.to_string()]).await
    }

    async fn find_by_user_id_and_status(
        &self,
        user_id: Uuid,
        status: RentalStatus,
    ) -> Result<Vec<Rental>, DomainError> {
        self.fetch_many(
            "WHERE user_id = ? AND status = ?",
            &[user_id.to_string(), status.as_str().to_string()],
        )
        .await
    }

    async fn save(&self, rental: Rental) -> Result<Rental, DomainError> {
        let query = r#"
            INSERT INTO rentals (
                id, user_id, vehicle_id, pickup_date, return_date, notes,
                total_price, status, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                user_id = VALUES(user_id),
                vehicle_id = VALUES(vehicle_id),
                pickup_date = VALUES(pickup_date),
                return_date = VALUES(return_date),
                notes = VALUES(notes),
                total_price = VALUES(total_price),
                status = VALUES(status),
                updated_at = VALUES(updated_at)
        "#;

        sqlx::query(query)
            .bind(rental.id.to_string())
            .bind(rental.user_id.to_string())
            .bind(rental.vehicle_id.to_string())
            .bind(rental.pickup_date)
            .bind(rental.return_date)
            .bind(&rental.notes)
            .bind(rental.total_price)
            .bind(rental.status.as_str())
            .bind(rental.created_at)
            .bind(rental.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| query_failed("Failed to save rental", e))?;

        Ok(rental)
    }

    async fn open(&self, rental: Rental) -> Result<Option<Rental>, DomainError> {
        let mut tx = self.begin().await?;

        let claimed = sqlx::query(
            "UPDATE vehicles SET is_available = FALSE, updated_at = ? WHERE id = ? AND is_available = TRUE",
        )
        .bind(Utc::now())
        .bind(rental.vehicle_id.to_string())
        .execute(&mut *tx)
        .await
        .map_err(|e| query_failed("Failed to claim vehicle", e))?;

        if claimed.rows_affected() == 0 {
            Self::rollback(tx).await?;
            return Ok(None);
        }

        let inserted = sqlx::query(
            r#"
            INSERT INTO rentals (
                id, user_id, vehicle_id, pickup_date, return_date, notes,
                total_price, status, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(rental.id.to_string())
        .bind(rental.user_id.to_string())
        .bind(rental.vehicle_id.to_string())
        .bind(rental.pickup_date)
        .bind(rental.return_date)
        .bind(&rental.notes)
        .bind(rental.total_price)
        .bind(rental.status.as_str())
        .bind(rental.created_at)
        .bind(rental.updated_at)
        .execute(&mut *tx)
        .await;

        match inserted {
            Ok(_) => {}
            Err(e) if is_unique_violation(&e) => {
                Self::rollback(tx).await?;
                return Ok(None);
            }
            Err(e) => return Err(query_failed("Failed to insert rental", e)),
        }

        Self::commit(tx).await?;
        tracing::debug!(rental_id = %rental.id, vehicle_id = %rental.vehicle_id, "Rental opened");
        Ok(Some(rental))
    }

    async fn close(&self, id: Uuid, status: RentalStatus) -> Result<CloseOutcome, DomainError> {
        let mut tx = self.begin().await?;

        let query = format!("SELECT {} FROM rentals WHERE id = ? FOR UPDATE", RENTAL_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| query_failed("Failed to lock rental", e))?;

        let mut rental = match row.as_ref().map(row_to_rental).transpose()? {
            Some(rental) => rental,
            None => {
                Self::rollback(tx).await?;
                return Ok(CloseOutcome::NotFound);
            }
        };
        if rental.status != RentalStatus::Active {
            Self::rollback(tx).await?;
            return Ok(CloseOutcome::NotActive(rental.status));
        }

        let now = Utc::now();
        let updated = sqlx::query("UPDATE rentals SET status = ?, updated_at = ? WHERE id = ? AND status = 'ACTIVE'")
            .bind(status.as_str())
            .bind(now)
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| query_failed("Failed to update rental status", e))?;

        if updated.rows_affected() == 0 {
            // Lost the row lock race; report what the winner left behind
            let current = sqlx::query("SELECT status FROM rentals WHERE id = ?")
                .bind(id.to_string())
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| query_failed("Failed to read rental status", e))?;
            let raw: String = current
                .try_get("status")
                .map_err(|e| query_failed("Failed to read rental status", e))?;
            Self::rollback(tx).await?;
            return Ok(CloseOutcome::NotActive(parse_status(&raw)?));
        }

        sqlx::query("UPDATE vehicles SET is_available = TRUE, updated_at = ? WHERE id = ?")
            .bind(now)
            .bind(rental.vehicle_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| query_failed("Failed to release vehicle", e))?;

        Self::commit(tx).await?;

        rental.status = status;
        rental.updated_at = now;
        Ok(CloseOutcome::Closed(rental))
    }

    async fn set_vehicle_availability(
        &self,
        vehicle_id: Uuid,
        available: bool,
    ) -> Result<Option<Vehicle>, DomainError> {
        let mut tx = self.begin().await?;

        let query = format!("SELECT {} FROM vehicles WHERE id = ? FOR UPDATE", VEHICLE_COLUMNS);
        let row = sqlx::query(&query)
            .bind(vehicle_id.to_string())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| query_failed("Failed to lock vehicle", e))?;

        let mut vehicle = match row.as_ref().map(row_to_vehicle).transpose()? {
            Some(vehicle) => vehicle,
            None => {
                Self::rollback(tx).await?;
                return Ok(None);
            }
        };

        if Self::active_rental_exists(&mut tx, vehicle_id).await? {
            Self::rollback(tx).await?;
            return Err(RentalError::VehicleHasActiveRental { vehicle_id }.into());
        }

        vehicle.set_availability(available);
        sqlx::query("UPDATE vehicles SET is_available = ?, updated_at = ? WHERE id = ?")
            .bind(vehicle.is_available)
            .bind(vehicle.updated_at)
            .bind(vehicle_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| query_failed("Failed to update vehicle availability", e))?;

        Self::commit(tx).await?;
        Ok(Some(vehicle))
    }
}

//! MySQL implementation of the VehicleRepository trait.

use async_trait::async_trait;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use rent_core::domain::entities::vehicle::Vehicle;
use rent_core::errors::{DomainError, RentalError};
use rent_core::repositories::VehicleRepository;

use super::rows::{
    collect, is_foreign_key_violation, query_failed, row_to_vehicle, write_failed, VEHICLE_COLUMNS,
};

pub struct MySqlVehicleRepository {
    pool: MySqlPool,
}

impl MySqlVehicleRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn fetch_many(&self, filter: &str, bind: Option<&str>) -> Result<Vec<Vehicle>, DomainError> {
        let query = format!(
            "SELECT {} FROM vehicles {} ORDER BY make, model, plate",
            VEHICLE_COLUMNS, filter
        );
        let mut q = sqlx::query(&query);
        if let Some(value) = bind {
            q = q.bind(value);
        }
        let rows = q
            .fetch_all(&self.pool)
            .await
            .map_err(|e| query_failed("Failed to list vehicles", e))?;

        collect(rows, row_to_vehicle)
    }
}

#[async_trait]
impl VehicleRepository for MySqlVehicleRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, DomainError> {
        let query = format!("SELECT {} FROM vehicles WHERE id = ? LIMIT 1", VEHICLE_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_failed("Failed to find vehicle", e))?;

        row.as_ref().map(row_to_vehicle).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Vehicle>, DomainError> {
        self.fetch_many("", None).await
    }

    async fn find_by_available_true(&self) -> Result<Vec<Vehicle>, DomainError> {
        self.fetch_many("WHERE is_available = TRUE", None).await
    }

    async fn find_by_category(&self, category: &str) -> Result<Vec<Vehicle>, DomainError> {
        self.fetch_many("WHERE category = ?", Some(category)).await
    }

    async fn exists_by_plate(&self, plate: &str) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM vehicles WHERE plate = ?) AS found")
            .bind(plate)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| query_failed("Failed to check plate", e))?;

        let found: i64 = row
            .try_get("found")
            .map_err(|e| query_failed("Failed to read existence result", e))?;
        Ok(found == 1)
    }

    async fn save(&self, vehicle: Vehicle) -> Result<Vehicle, DomainError> {
        if self.find_by_id(vehicle.id).await?.is_none() {
            sqlx::query(
                r#"
                INSERT INTO vehicles (
                    id, make, model, year, category, plate, description,
                    daily_rate, is_available, created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(vehicle.id.to_string())
            .bind(&vehicle.make)
            .bind(&vehicle.model)
            .bind(vehicle.year)
            .bind(&vehicle.category)
            .bind(&vehicle.plate)
            .bind(&vehicle.description)
            .bind(vehicle.daily_rate)
            .bind(vehicle.is_available)
            .bind(vehicle.created_at)
            .bind(vehicle.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| write_failed("Failed to save vehicle", e))?;

            return Ok(vehicle);
        }

        // is_available belongs to the rental units and is never written here
        sqlx::query(
            r#"
            UPDATE vehicles SET
                make = ?, model = ?, year = ?, category = ?, plate = ?, description = ?,
                daily_rate = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&vehicle.make)
        .bind(&vehicle.model)
        .bind(vehicle.year)
        .bind(&vehicle.category)
        .bind(&vehicle.plate)
        .bind(&vehicle.description)
        .bind(vehicle.daily_rate)
        .bind(vehicle.updated_at)
        .bind(vehicle.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| write_failed("Failed to save vehicle", e))?;

        self.find_by_id(vehicle.id)
            .await?
            .ok_or_else(|| DomainError::not_found("vehicle"))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await;

        match result {
            Ok(done) => Ok(done.rows_affected() > 0),
            Err(e) if is_foreign_key_violation(&e) => Err(RentalError::VehicleInUse { vehicle_id: id }.into()),
            Err(e) => Err(query_failed("Failed to delete vehicle", e)),
        }
    }
}

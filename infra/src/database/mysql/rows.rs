//! Row mapping and error translation shared by the MySQL repositories.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, Row};
use uuid::Uuid;

use rent_core::domain::entities::{Address, Rental, RentalStatus, Role, User, Vehicle};
use rent_core::errors::{DomainError, ValidationError};

pub(crate) const USER_COLUMNS: &str = "id, name, email, national_id, password_hash, phone, birth_date, \
     address_postal_code, address_street, address_number, address_complement, \
     address_district, address_city, address_state, role, is_active, created_at, updated_at";

pub(crate) const VEHICLE_COLUMNS: &str =
    "id, make, model, year, category, plate, description, daily_rate, is_available, created_at, updated_at";

pub(crate) const RENTAL_COLUMNS: &str =
    "id, user_id, vehicle_id, pickup_date, return_date, notes, total_price, status, created_at, updated_at";

/// Log and wrap a driver failure
pub(crate) fn query_failed(context: &str, err: sqlx::Error) -> DomainError {
    tracing::error!(error = %err, "{}", context);
    DomainError::internal(format!("{}: {}", context, err))
}

/// Which unique column a MySQL duplicate-key message refers to
///
/// MySQL reports `Duplicate entry '...' for key 'table.index_name'`.
pub(crate) fn duplicate_field(message: &str) -> Option<&'static str> {
    if message.contains("uk_users_email") {
        Some("email")
    } else if message.contains("uk_users_national_id") {
        Some("national_id")
    } else if message.contains("uk_vehicles_plate") {
        Some("plate")
    } else if message.contains("uk_rentals_active_vehicle") {
        Some("vehicle_id")
    } else {
        None
    }
}

/// Map a write failure, turning unique violations into `DuplicateValue`
pub(crate) fn write_failed(context: &str, err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            if let Some(field) = duplicate_field(db_err.message()) {
                return ValidationError::DuplicateValue {
                    field: field.to_string(),
                }
                .into();
            }
        }
    }
    query_failed(context, err)
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation())
}

fn get<'r, T>(row: &'r MySqlRow, column: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, MySql> + sqlx::Type<MySql>,
{
    row.try_get::<T, _>(column)
        .map_err(|e| DomainError::internal(format!("Failed to get {}: {}", column, e)))
}

fn get_uuid(row: &MySqlRow, column: &str) -> Result<Uuid, DomainError> {
    let raw: String = get(row, column)?;
    Uuid::parse_str(&raw).map_err(|e| DomainError::internal(format!("Invalid UUID in {}: {}", column, e)))
}

pub(crate) fn row_to_user(row: &MySqlRow) -> Result<User, DomainError> {
    let role: String = get(row, "role")?;
    let role = role.parse::<Role>().map_err(DomainError::internal)?;

    let postal_code: Option<String> = get(row, "address_postal_code")?;
    let address = match postal_code {
        Some(postal_code) => Some(Address {
            postal_code,
            street: get::<Option<String>>(row, "address_street")?.unwrap_or_default(),
            number: get::<Option<String>>(row, "address_number")?.unwrap_or_default(),
            complement: get(row, "address_complement")?,
            district: get::<Option<String>>(row, "address_district")?.unwrap_or_default(),
            city: get::<Option<String>>(row, "address_city")?.unwrap_or_default(),
            state: get::<Option<String>>(row, "address_state")?.unwrap_or_default(),
        }),
        None => None,
    };

    Ok(User {
        id: get_uuid(row, "id")?,
        name: get(row, "name")?,
        email: get(row, "email")?,
        national_id: get(row, "national_id")?,
        password_hash: get(row, "password_hash")?,
        phone: get(row, "phone")?,
        birth_date: get::<Option<NaiveDate>>(row, "birth_date")?,
        address,
        role,
        is_active: get(row, "is_active")?,
        created_at: get::<DateTime<Utc>>(row, "created_at")?,
        updated_at: get::<DateTime<Utc>>(row, "updated_at")?,
    })
}

pub(crate) fn row_to_vehicle(row: &MySqlRow) -> Result<Vehicle, DomainError> {
    Ok(Vehicle {
        id: get_uuid(row, "id")?,
        make: get(row, "make")?,
        model: get(row, "model")?,
        year: get(row, "year")?,
        category: get(row, "category")?,
        plate: get(row, "plate")?,
        description: get(row, "description")?,
        daily_rate: get::<Decimal>(row, "daily_rate")?,
        is_available: get(row, "is_available")?,
        created_at: get::<DateTime<Utc>>(row, "created_at")?,
        updated_at: get::<DateTime<Utc>>(row, "updated_at")?,
    })
}

pub(crate) fn parse_status(raw: &str) -> Result<RentalStatus, DomainError> {
    raw.parse::<RentalStatus>().map_err(DomainError::internal)
}

pub(crate) fn row_to_rental(row: &MySqlRow) -> Result<Rental, DomainError> {
    let status: String = get(row, "status")?;

    Ok(Rental {
        id: get_uuid(row, "id")?,
        user_id: get_uuid(row, "user_id")?,
        vehicle_id: get_uuid(row, "vehicle_id")?,
        pickup_date: get::<NaiveDate>(row, "pickup_date")?,
        return_date: get::<NaiveDate>(row, "return_date")?,
        notes: get(row, "notes")?,
        total_price: get::<Decimal>(row, "total_price")?,
        status: parse_status(&status)?,
        created_at: get::<DateTime<Utc>>(row, "created_at")?,
        updated_at: get::<DateTime<Utc>>(row, "updated_at")?,
    })
}

pub(crate) fn collect<T>(
    rows: Vec<MySqlRow>,
    map: fn(&MySqlRow) -> Result<T, DomainError>,
) -> Result<Vec<T>, DomainError> {
    rows.iter().map(map).collect()
}

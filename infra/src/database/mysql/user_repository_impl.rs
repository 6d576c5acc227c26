//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use sqlx::mysql::MySqlArguments;
use sqlx::query::Query;
use sqlx::{MySql, MySqlPool, Row};
use uuid::Uuid;

use rent_core::domain::entities::user::{Role, User};
use rent_core::errors::DomainError;
use rent_core::repositories::{UserChange, UserRepository};

use super::rows::{collect, query_failed, row_to_user, write_failed, USER_COLUMNS};

const UPDATE_USER: &str = r#"
    UPDATE users SET
        name = ?, email = ?, national_id = ?, password_hash = ?, phone = ?, birth_date = ?,
        address_postal_code = ?, address_street = ?, address_number = ?, address_complement = ?,
        address_district = ?, address_city = ?, address_state = ?,
        role = ?, is_active = ?, created_at = ?, updated_at = ?
    WHERE id = ?
"#;

const INSERT_USER: &str = r#"
    INSERT INTO users (
        name, email, national_id, password_hash, phone, birth_date,
        address_postal_code, address_street, address_number, address_complement,
        address_district, address_city, address_state,
        role, is_active, created_at, updated_at, id
    ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
"#;

/// Binds every column in the order shared by [`UPDATE_USER`] and [`INSERT_USER`]
fn bind_user<'q>(query: Query<'q, MySql, MySqlArguments>, user: &'q User) -> Query<'q, MySql, MySqlArguments> {
    let address = user.address.as_ref();
    query
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.national_id)
        .bind(&user.password_hash)
        .bind(&user.phone)
        .bind(user.birth_date)
        .bind(address.map(|a| a.postal_code.as_str()))
        .bind(address.map(|a| a.street.as_str()))
        .bind(address.map(|a| a.number.as_str()))
        .bind(address.and_then(|a| a.complement.as_deref()))
        .bind(address.map(|a| a.district.as_str()))
        .bind(address.map(|a| a.city.as_str()))
        .bind(address.map(|a| a.state.as_str()))
        .bind(user.role.as_str())
        .bind(user.is_active)
        .bind(user.created_at)
        .bind(user.updated_at)
        .bind(user.id.to_string())
}

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn exists(&self, column: &str, value: &str) -> Result<bool, DomainError> {
        let query = format!("SELECT EXISTS(SELECT 1 FROM users WHERE {} = ?) AS found", column);
        let row = sqlx::query(&query)
            .bind(value)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| query_failed("Failed to check user existence", e))?;

        let found: i64 = row
            .try_get("found")
            .map_err(|e| query_failed("Failed to read existence result", e))?;
        Ok(found == 1)
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE email = ? LIMIT 1", USER_COLUMNS);
        let row = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_failed("Failed to find user by email", e))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE id = ? LIMIT 1", USER_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_failed("Failed to find user by id", e))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        self.exists("email", email).await
    }

    async fn exists_by_national_id(&self, national_id: &str) -> Result<bool, DomainError> {
        self.exists("national_id", national_id).await
    }

    async fn save(&self, user: User) -> Result<User, DomainError> {
        // ON DUPLICATE KEY would also match the email and national id keys
        let stored = self.find_by_id(user.id).await?.is_some();
        let query = if stored { UPDATE_USER } else { INSERT_USER };

        bind_user(sqlx::query(query), &user)
            .execute(&self.pool)
            .await
            .map_err(|e| write_failed("Failed to save user", e))?;

        Ok(user)
    }

    async fn modify(&self, id: Uuid, change: UserChange) -> Result<Option<User>, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| query_failed("Failed to begin transaction", e))?;

        let query = format!("SELECT {} FROM users WHERE id = ? FOR UPDATE", USER_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| query_failed("Failed to lock user", e))?;

        let mut user = match row.as_ref().map(row_to_user).transpose()? {
            Some(user) => user,
            None => return Ok(None),
        };
        change(&mut user)?;

        bind_user(sqlx::query(UPDATE_USER), &user)
            .execute(&mut *tx)
            .await
            .map_err(|e| write_failed("Failed to update user", e))?;

        tx.commit()
            .await
            .map_err(|e| query_failed("Failed to commit transaction", e))?;
        Ok(Some(user))
    }

    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        let query = format!("SELECT {} FROM users ORDER BY created_at", USER_COLUMNS);
        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| query_failed("Failed to list users", e))?;

        collect(rows, row_to_user)
    }

    async fn find_by_role(&self, role: Role) -> Result<Vec<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE role = ? ORDER BY created_at", USER_COLUMNS);
        let rows = sqlx::query(&query)
            .bind(role.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| query_failed("Failed to list users by role", e))?;

        collect(rows, row_to_user)
    }
}

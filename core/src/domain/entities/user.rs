//! User entity representing a registered customer or staff member.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role carried by every user and embedded in issued tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// A customer renting vehicles
    Client,
    /// An employee managing the fleet and other users
    Staff,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Client => "CLIENT",
            Role::Staff => "STAFF",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    /// Exact match only; tokens carrying anything else are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CLIENT" => Ok(Role::Client),
            "STAFF" => Ok(Role::Staff),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// Postal address, replaced or removed as a unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub postal_code: String,
    pub street: String,
    pub number: String,
    pub complement: Option<String>,
    pub district: String,
    pub city: String,
    pub state: String,
}

/// User entity
///
/// Users are never removed from storage; deleting one clears `is_active`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    pub name: String,

    /// Login key, stored lowercased
    pub email: String,

    /// CPF, eleven digits
    pub national_id: String,

    /// bcrypt hash; never leaves the core through a projection
    pub password_hash: String,

    pub phone: Option<String>,

    pub birth_date: Option<NaiveDate>,

    pub address: Option<Address>,

    pub role: Role,

    pub is_active: bool,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new active user
    pub fn new(
        name: String,
        email: String,
        national_id: String,
        password_hash: String,
        role: Role,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            national_id,
            password_hash,
            phone: None,
            birth_date: None,
            address: None,
            role,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies a partial profile update; `None` leaves the field untouched
    pub fn update_profile(
        &mut self,
        name: Option<String>,
        phone: Option<String>,
        birth_date: Option<NaiveDate>,
    ) {
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(phone) = phone {
            self.phone = Some(phone);
        }
        if let Some(birth_date) = birth_date {
            self.birth_date = Some(birth_date);
        }
        self.updated_at = Utc::now();
    }

    pub fn set_address(&mut self, address: Option<Address>) {
        self.address = address;
        self.updated_at = Utc::now();
    }

    pub fn set_role(&mut self, role: Role) {
        self.role = role;
        self.updated_at = Utc::now();
    }

    pub fn activate(&mut self) {
        self.is_active = true;
        self.updated_at = Utc::now();
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }

    pub fn is_staff(&self) -> bool {
        matches!(self.role, Role::Staff)
    }
}

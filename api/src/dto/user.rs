use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use rent_core::domain::entities::{Address, Role, User};
use rent_core::services::user::ProfileUpdate;

/// User projection returned by every user-facing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub national_id: String,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub address: Option<AddressPayload>,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            national_id: user.national_id,
            phone: user.phone,
            birth_date: user.birth_date,
            address: user.address.map(AddressPayload::from),
            role: user.role,
            is_active: user.is_active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

pub fn user_list(users: Vec<User>) -> Vec<UserResponse> {
    users.into_iter().map(UserResponse::from).collect()
}

/// Partial profile change; absent fields stay untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ProfileUpdateRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,

    #[validate(length(min = 8, max = 20))]
    pub phone: Option<String>,

    pub birth_date: Option<NaiveDate>,
}

impl From<ProfileUpdateRequest> for ProfileUpdate {
    fn from(request: ProfileUpdateRequest) -> Self {
        ProfileUpdate {
            name: request.name,
            phone: request.phone,
            birth_date: request.birth_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct AddressPayload {
    #[validate(regex = "rent_shared::utils::validation::POSTAL_CODE_REGEX")]
    pub postal_code: String,

    #[validate(length(min = 1, max = 255))]
    pub street: String,

    #[validate(length(min = 1, max = 20))]
    pub number: String,

    #[validate(length(max = 100))]
    pub complement: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub district: String,

    #[validate(length(min = 1, max = 100))]
    pub city: String,

    /// Two-letter state code
    #[validate(regex = "rent_shared::utils::validation::STATE_REGEX")]
    pub state: String,
}

impl From<Address> for AddressPayload {
    fn from(address: Address) -> Self {
        Self {
            postal_code: address.postal_code,
            street: address.street,
            number: address.number,
            complement: address.complement,
            district: address.district,
            city: address.city,
            state: address.state,
        }
    }
}

impl From<AddressPayload> for Address {
    fn from(payload: AddressPayload) -> Self {
        Address {
            postal_code: payload.postal_code,
            street: payload.street,
            number: payload.number,
            complement: payload.complement,
            district: payload.district,
            city: payload.city,
            state: payload.state,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoleQuery {
    pub role: Option<Role>,
}

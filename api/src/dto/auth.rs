use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use rent_core::services::auth::RegisterUser;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    /// CPF, eleven digits without punctuation
    #[validate(regex = "rent_shared::utils::validation::NATIONAL_ID_REGEX")]
    pub national_id: String,

    #[validate(length(min = 6, max = 72))]
    pub password: String,

    #[validate(length(min = 8, max = 20))]
    pub phone: Option<String>,

    pub birth_date: Option<NaiveDate>,
}

impl From<RegisterRequest> for RegisterUser {
    fn from(request: RegisterRequest) -> Self {
        RegisterUser {
            name: request.name,
            email: request.email,
            national_id: request.national_id,
            password: request.password,
            phone: request.phone,
            birth_date: request.birth_date,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

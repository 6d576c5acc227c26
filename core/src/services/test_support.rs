//! Fixtures shared by service tests

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::domain::entities::{Role, User, Vehicle};
use crate::repositories::{InMemoryStore, UserRepository, VehicleRepository};
use crate::services::auth::{AuthService, AuthServiceConfig, RegisterUser};
use crate::services::token::{TokenService, TokenServiceConfig};

pub fn store() -> Arc<InMemoryStore> {
    Arc::new(InMemoryStore::new())
}

pub fn token_service() -> Arc<TokenService> {
    Arc::new(TokenService::new(TokenServiceConfig {
        jwt_secret: "test-secret".to_string(),
        issuer: "locadora".to_string(),
        access_token_expiry_seconds: 3600,
    }))
}

pub fn auth_service(store: &Arc<InMemoryStore>) -> AuthService<InMemoryStore> {
    AuthService::new(
        store.clone(),
        token_service(),
        AuthServiceConfig { bcrypt_cost: 4 },
    )
}

pub fn registration(email: &str, national_id: &str) -> RegisterUser {
    RegisterUser {
        name: "Test User".to_string(),
        email: email.to_string(),
        national_id: national_id.to_string(),
        password: "s3cret-pass".to_string(),
        phone: None,
        birth_date: None,
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Stores a user directly, skipping password hashing
pub async fn seed_user(store: &InMemoryStore, email: &str, national_id: &str, role: Role) -> User {
    let user = User::new(
        "Seeded".to_string(),
        email.to_string(),
        national_id.to_string(),
        "not-a-bcrypt-hash".to_string(),
        role,
    );
    UserRepository::save(store, user).await.unwrap()
}

pub async fn seed_vehicle(store: &InMemoryStore, plate: &str, daily_rate: Decimal) -> Vehicle {
    let vehicle = Vehicle::new(
        "Volkswagen".to_string(),
        "Polo".to_string(),
        2023,
        "HATCH".to_string(),
        plate.to_string(),
        daily_rate,
    );
    VehicleRepository::save(store, vehicle).await.unwrap()
}

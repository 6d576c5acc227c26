//! Shared fixtures for the HTTP integration tests

#![allow(dead_code)]

use actix_web::{body::MessageBody, dev::ServiceResponse, test, web};
use rust_decimal::Decimal;
use serde_json::Value;
use std::sync::Arc;

use rent_api::AppState;
use rent_core::domain::entities::{Role, User, Vehicle};
use rent_core::repositories::{InMemoryStore, UserRepository, VehicleRepository};
use rent_core::services::{AuthServiceConfig, TokenService, TokenServiceConfig};
use rent_shared::AppConfig;

pub struct TestContext {
    pub store: Arc<InMemoryStore>,
    pub state: web::Data<AppState>,
    pub config: AppConfig,
}

impl TestContext {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let token_service = Arc::new(TokenService::new(TokenServiceConfig {
            jwt_secret: "integration-test-secret".to_string(),
            issuer: "locadora".to_string(),
            access_token_expiry_seconds: 3600,
        }));
        let state = AppState::in_memory(store.clone(), token_service, AuthServiceConfig { bcrypt_cost: 4 });

        Self {
            store,
            state: web::Data::new(state),
            config: AppConfig::development(),
        }
    }

    /// Stores a user directly; it cannot log in with a password
    pub async fn seed_user(&self, email: &str, national_id: &str, role: Role) -> User {
        let user = User::new(
            "Seeded User".to_string(),
            email.to_string(),
            national_id.to_string(),
            "unusable-hash".to_string(),
            role,
        );
        UserRepository::save(self.store.as_ref(), user).await.unwrap()
    }

    pub async fn seed_vehicle(&self, plate: &str, daily_rate: Decimal) -> Vehicle {
        let vehicle = Vehicle::new(
            "Fiat".to_string(),
            "Argo".to_string(),
            2022,
            "HATCH".to_string(),
            plate.to_string(),
            daily_rate,
        );
        VehicleRepository::save(self.store.as_ref(), vehicle).await.unwrap()
    }

    /// `Authorization` header value for `user`
    pub fn bearer(&self, user: &User) -> (&'static str, String) {
        let issued = self.state.token_service.issue_for(user).unwrap();
        ("Authorization", format!("Bearer {}", issued.token))
    }

    pub async fn staff(&self) -> User {
        self.seed_user("staff@locadora.com", "11111111111", Role::Staff).await
    }

    pub async fn client(&self, email: &str, national_id: &str) -> User {
        self.seed_user(email, national_id, Role::Client).await
    }
}

pub async fn json_body<B: MessageBody>(resp: ServiceResponse<B>) -> Value {
    test::read_body_json(resp).await
}

pub fn registration(email: &str, national_id: &str) -> Value {
    serde_json::json!({
        "name": "Maria Souza",
        "email": email,
        "national_id": national_id,
        "password": "senha-forte-1",
        "phone": "11987654321",
    })
}

pub fn vehicle_payload(plate: &str) -> Value {
    serde_json::json!({
        "make": "Chevrolet",
        "model": "Onix",
        "year": 2023,
        "category": "HATCH",
        "plate": plate,
        "daily_rate": "120.50",
        "description": "Air conditioning",
    })
}

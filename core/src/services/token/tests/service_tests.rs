//! Unit tests for token service

use chrono::{Duration, TimeZone, Utc};
use serde_json::Map;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::user::{Role, User};
use crate::errors::TokenError;
use crate::services::token::{ManualClock, TokenService, TokenServiceConfig};

fn config(secret: &str) -> TokenServiceConfig {
    TokenServiceConfig {
        jwt_secret: secret.to_string(),
        issuer: "locadora".to_string(),
        access_token_expiry_seconds: 3600,
    }
}

fn service_at_noon(secret: &str) -> (TokenService, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()));
    (TokenService::with_clock(config(secret), clock.clone()), clock)
}

#[test]
fn test_verify_within_lifetime_returns_subject_and_role() {
    let (service, clock) = service_at_noon("secret");
    let issued = service.issue("ana@example.com", Role::Staff, Map::new()).unwrap();
    assert_eq!(issued.expires_at, Utc.with_ymd_and_hms(2024, 1, 1, 13, 0, 0).unwrap());

    clock.advance(Duration::minutes(30));
    let identity = service.verify(&issued.token).unwrap();
    assert_eq!(identity.email, "ana@example.com");
    assert_eq!(identity.role, Role::Staff);
    assert!(identity.user_id.is_none());
}

#[test]
fn test_verify_after_expiry_fails() {
    let (service, clock) = service_at_noon("secret");
    let issued = service.issue("ana@example.com", Role::Client, Map::new()).unwrap();

    clock.advance(Duration::hours(2));
    assert_eq!(service.verify(&issued.token), Err(TokenError::TokenExpired));
}

#[test]
fn test_expiry_instant_itself_is_rejected() {
    let (service, clock) = service_at_noon("secret");
    let issued = service.issue("ana@example.com", Role::Client, Map::new()).unwrap();

    clock.advance(Duration::seconds(3599));
    assert!(service.verify(&issued.token).is_ok());
    clock.advance(Duration::seconds(1));
    assert_eq!(service.verify(&issued.token), Err(TokenError::TokenExpired));
}

#[test]
fn test_wrong_secret_is_rejected() {
    let (issuer, _) = service_at_noon("secret-a");
    let (verifier, _) = service_at_noon("secret-b");
    let issued = issuer.issue("ana@example.com", Role::Client, Map::new()).unwrap();

    assert_eq!(verifier.verify(&issued.token), Err(TokenError::InvalidSignature));
}

#[test]
fn test_tampered_payload_is_rejected() {
    let (service, _) = service_at_noon("secret");
    let issued = service.issue("ana@example.com", Role::Client, Map::new()).unwrap();

    let mut parts: Vec<String> = issued.token.split('.').map(String::from).collect();
    let other = service.issue("mallory@example.com", Role::Staff, Map::new()).unwrap();
    parts[1] = other.token.split('.').nth(1).unwrap().to_string();
    let forged = parts.join(".");

    assert!(service.verify(&forged).is_err());
}

#[test]
fn test_malformed_token_is_rejected() {
    let (service, _) = service_at_noon("secret");
    assert_eq!(service.verify("not-a-jwt"), Err(TokenError::InvalidTokenFormat));
    assert_eq!(service.verify(""), Err(TokenError::InvalidTokenFormat));
}

#[test]
fn test_issue_for_user_embeds_user_id() {
    let (service, _) = service_at_noon("secret");
    let user = User::new(
        "Ana".to_string(),
        "ana@example.com".to_string(),
        "12345678901".to_string(),
        "hash".to_string(),
        Role::Client,
    );
    let issued = service.issue_for(&user).unwrap();

    let identity = service.verify(&issued.token).unwrap();
    assert_eq!(identity.user_id, Some(user.id));
    assert_eq!(identity.role, Role::Client);
}

#[test]
fn test_unknown_role_claim_is_rejected() {
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    let (service, _) = service_at_noon("secret");
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap().timestamp();
    let claims = json!({
        "sub": "ana@example.com",
        "role": "ADMIN",
        "iat": now,
        "exp": now + 3600,
        "iss": "locadora",
        "uid": Uuid::new_v4().to_string(),
    });
    let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(b"secret")).unwrap();

    assert_eq!(
        service.verify(&token),
        Err(TokenError::UnknownRole { role: "ADMIN".to_string() })
    );
}

#[test]
fn test_foreign_issuer_is_rejected() {
    let (service, _) = service_at_noon("secret");
    let mut other_config = config("secret");
    other_config.issuer = "someone-else".to_string();
    let clock = Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()));
    let other = TokenService::with_clock(other_config, clock);

    let issued = other.issue("ana@example.com", Role::Client, Map::new()).unwrap();
    assert_eq!(service.verify(&issued.token), Err(TokenError::InvalidIssuer));
}

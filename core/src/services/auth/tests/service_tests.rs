//! Unit tests for the authentication service

use crate::domain::entities::user::Role;
use crate::errors::{AuthError, DomainError, ValidationError};
use crate::repositories::UserRepository;
use crate::services::test_support::{auth_service, registration, store, token_service};

#[tokio::test]
async fn test_register_creates_active_client_and_token() {
    let store = store();
    let service = auth_service(&store);

    let response = service
        .register(registration("  Ana@Example.com ", "12345678901"))
        .await
        .unwrap();

    assert_eq!(response.email, "ana@example.com");
    assert_eq!(response.role, Role::Client);
    assert_eq!(response.token_type, "Bearer");
    assert_eq!(response.expires_in, 3600);

    let stored = store.find_by_email("ana@example.com").await.unwrap().unwrap();
    assert!(stored.is_active);
    assert_ne!(stored.password_hash, "s3cret-pass");

    let identity = token_service().verify(&response.access_token).unwrap();
    assert_eq!(identity.email, "ana@example.com");
    assert_eq!(identity.user_id, Some(stored.id));
}

#[tokio::test]
async fn test_register_rejects_duplicate_email_and_national_id() {
    let store = store();
    let service = auth_service(&store);
    service.register(registration("ana@example.com", "12345678901")).await.unwrap();

    let err = service
        .register(registration("ANA@example.com", "99999999999"))
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::Auth(AuthError::EmailAlreadyRegistered));

    let err = service
        .register(registration("bia@example.com", "12345678901"))
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::Auth(AuthError::NationalIdAlreadyRegistered));
}

#[tokio::test]
async fn test_register_rejects_malformed_national_id() {
    let store = store();
    let service = auth_service(&store);

    let err = service
        .register(registration("ana@example.com", "123.456.789-01"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::ValidationErr(ValidationError::InvalidFormat { .. })
    ));
}

#[tokio::test]
async fn test_register_staff_creates_staff_without_token() {
    let store = store();
    let service = auth_service(&store);

    let staff = service
        .register_staff(registration("staff@example.com", "11122233344"))
        .await
        .unwrap();
    assert_eq!(staff.role, Role::Staff);

    let login = service.login("staff@example.com", "s3cret-pass").await.unwrap();
    assert_eq!(login.role, Role::Staff);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let store = store();
    let service = auth_service(&store);
    service.register(registration("ana@example.com", "12345678901")).await.unwrap();

    let wrong_password = service.login("ana@example.com", "nope").await.unwrap_err();
    let unknown_email = service.login("ghost@example.com", "s3cret-pass").await.unwrap_err();

    assert_eq!(wrong_password, DomainError::Auth(AuthError::InvalidCredentials));
    assert_eq!(wrong_password, unknown_email);
}

#[tokio::test]
async fn test_login_refuses_inactive_account() {
    let store = store();
    let service = auth_service(&store);
    service.register(registration("ana@example.com", "12345678901")).await.unwrap();

    let mut user = store.find_by_email("ana@example.com").await.unwrap().unwrap();
    user.deactivate();
    UserRepository::save(store.as_ref(), user).await.unwrap();

    let err = service.login("ana@example.com", "s3cret-pass").await.unwrap_err();
    assert_eq!(err, DomainError::Auth(AuthError::AccountInactive));

    // Wrong password still reports bad credentials
    let err = service.login("ana@example.com", "wrong").await.unwrap_err();
    assert_eq!(err, DomainError::Auth(AuthError::InvalidCredentials));
}

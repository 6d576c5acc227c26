//! Registration and credential login

use chrono::NaiveDate;
use std::sync::Arc;

use rent_shared::utils::validation::validators::{is_national_id, mask_email, normalize_email};

use crate::domain::entities::user::{Role, User};
use crate::domain::value_objects::AuthResponse;
use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};
use crate::repositories::UserRepository;
use crate::services::token::TokenService;

use super::config::AuthServiceConfig;
use super::password::{hash_password, verify_password};

/// Input for self-registration and staff registration
#[derive(Debug, Clone)]
pub struct RegisterUser {
    pub name: String,
    pub email: String,
    pub national_id: String,
    pub password: String,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

/// Authentication service
pub struct AuthService<U>
where
    U: UserRepository + ?Sized,
{
    user_repository: Arc<U>,
    token_service: Arc<TokenService>,
    config: AuthServiceConfig,
}

impl<U> AuthService<U>
where
    U: UserRepository + ?Sized,
{
    pub fn new(
        user_repository: Arc<U>,
        token_service: Arc<TokenService>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            token_service,
            config,
        }
    }

    /// Register a new client and log them in
    ///
    /// # Errors
    /// * `AuthError::EmailAlreadyRegistered` / `NationalIdAlreadyRegistered`
    /// * `ValidationError::InvalidFormat` - national id is not eleven digits
    pub async fn register(&self, request: RegisterUser) -> DomainResult<AuthResponse> {
        let user = self.create_user(request, Role::Client).await?;
        self.respond_with_token(&user)
    }

    /// Register a new staff member; no token is issued for the new account
    pub async fn register_staff(&self, request: RegisterUser) -> DomainResult<User> {
        self.create_user(request, Role::Staff).await
    }

    /// Log in with email and password
    ///
    /// Unknown email and wrong password fail identically. The active flag is
    /// checked only after the password matches.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResponse> {
        let email = normalize_email(email);

        let user = match self.user_repository.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                tracing::info!(email = %mask_email(&email), event = "login_failed", "Unknown email");
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        if !verify_password(password.to_string(), user.password_hash.clone()).await? {
            tracing::info!(user_id = %user.id, event = "login_failed", "Wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        if !user.is_active {
            tracing::warn!(user_id = %user.id, event = "login_inactive", "Login attempt on inactive account");
            return Err(AuthError::AccountInactive.into());
        }

        tracing::info!(user_id = %user.id, role = %user.role, event = "login", "User logged in");
        self.respond_with_token(&user)
    }

    async fn create_user(&self, request: RegisterUser, role: Role) -> DomainResult<User> {
        let email = normalize_email(&request.email);

        if !is_national_id(&request.national_id) {
            return Err(ValidationError::InvalidFormat {
                field: "national_id".to_string(),
            }
            .into());
        }
        if self.user_repository.exists_by_email(&email).await? {
            return Err(AuthError::EmailAlreadyRegistered.into());
        }
        if self
            .user_repository
            .exists_by_national_id(&request.national_id)
            .await?
        {
            return Err(AuthError::NationalIdAlreadyRegistered.into());
        }

        let password_hash = hash_password(request.password, self.config.bcrypt_cost).await?;

        let mut user = User::new(request.name, email, request.national_id, password_hash, role);
        user.phone = request.phone;
        user.birth_date = request.birth_date;

        // A concurrent registration can still win the unique index
        let user = self
            .user_repository
            .save(user)
            .await
            .map_err(|e| match e {
                DomainError::ValidationErr(ValidationError::DuplicateValue { field })
                    if field == "email" =>
                {
                    DomainError::Auth(AuthError::EmailAlreadyRegistered)
                }
                DomainError::ValidationErr(ValidationError::DuplicateValue { field })
                    if field == "national_id" =>
                {
                    DomainError::Auth(AuthError::NationalIdAlreadyRegistered)
                }
                other => other,
            })?;

        tracing::info!(
            user_id = %user.id,
            role = %user.role,
            event = "user_registered",
            "Registered new user"
        );
        Ok(user)
    }

    fn respond_with_token(&self, user: &User) -> DomainResult<AuthResponse> {
        let issued = self.token_service.issue_for(user)?;
        Ok(AuthResponse::for_user(
            user,
            issued.token,
            self.token_service.expiry_seconds(),
        ))
    }
}

//! Domain-specific error types and error handling.

mod types;

pub use types::{AuthError, RentalError, TokenError, ValidationError};

use thiserror::Error;

/// Transport-independent classification of every domain failure.
///
/// The presentation layer owns the mapping of kinds to status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Unauthenticated,
    Forbidden,
    NotFound,
    Conflict,
    InvalidInput,
    Internal,
}

/// Core domain errors (general purpose)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Business rule violation: {message}")]
    BusinessRule { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Rental(#[from] RentalError),

    #[error(transparent)]
    ValidationErr(#[from] ValidationError),
}

impl DomainError {
    pub fn not_found(resource: impl Into<String>) -> Self {
        DomainError::NotFound {
            resource: resource.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::ValidationErr(ValidationError::DuplicateValue { .. }) => ErrorKind::Conflict,
            DomainError::Validation { .. } | DomainError::ValidationErr(_) => ErrorKind::InvalidInput,
            DomainError::BusinessRule { .. } => ErrorKind::Conflict,
            DomainError::NotFound { .. } => ErrorKind::NotFound,
            DomainError::Unauthorized => ErrorKind::Unauthenticated,
            DomainError::Internal { .. } => ErrorKind::Internal,
            DomainError::Auth(err) => match err {
                AuthError::InvalidCredentials | AuthError::AuthenticationRequired => {
                    ErrorKind::Unauthenticated
                }
                AuthError::AccountInactive | AuthError::InsufficientPermissions => ErrorKind::Forbidden,
                AuthError::EmailAlreadyRegistered | AuthError::NationalIdAlreadyRegistered => {
                    ErrorKind::Conflict
                }
                AuthError::PasswordHashing => ErrorKind::Internal,
            },
            DomainError::Token(TokenError::TokenGenerationFailed) => ErrorKind::Internal,
            DomainError::Token(_) => ErrorKind::Unauthenticated,
            DomainError::Rental(err) => match err {
                RentalError::InvalidDateRange => ErrorKind::InvalidInput,
                RentalError::VehicleUnavailable { .. }
                | RentalError::IllegalTransition { .. }
                | RentalError::HasActiveRentals
                | RentalError::VehicleInUse { .. }
                | RentalError::VehicleHasActiveRental { .. } => ErrorKind::Conflict,
            },
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

//! Domain-specific error types for authentication, tokens, rentals and validation
//!
//! Display strings here are for logs. Client-facing messages are localized in
//! the presentation layer.

use thiserror::Error;
use uuid::Uuid;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown email or wrong password; the two are deliberately indistinguishable
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account inactive")]
    AccountInactive,

    #[error("Email already registered")]
    EmailAlreadyRegistered,

    #[error("National id already registered")]
    NationalIdAlreadyRegistered,

    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("Insufficient permissions")]
    InsufficientPermissions,

    #[error("Password hashing failed")]
    PasswordHashing,
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Invalid issuer")]
    InvalidIssuer,

    #[error("Unknown role: {role}")]
    UnknownRole { role: String },

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Rental lifecycle errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RentalError {
    #[error("Vehicle {vehicle_id} is not available")]
    VehicleUnavailable { vehicle_id: Uuid },

    #[error("Cannot move rental from {from} to {to}")]
    IllegalTransition { from: String, to: String },

    #[error("Return date is before pickup date")]
    InvalidDateRange,

    #[error("User still has active rentals")]
    HasActiveRentals,

    #[error("Vehicle {vehicle_id} is referenced by rentals")]
    VehicleInUse { vehicle_id: Uuid },

    #[error("Vehicle {vehicle_id} has an active rental")]
    VehicleHasActiveRental { vehicle_id: Uuid },
}

/// Validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },

    #[error("Invalid length: {field} (max: {max}, actual: {actual})")]
    InvalidLength {
        field: String,
        max: usize,
        actual: usize,
    },

    #[error("Out of range: {field}")]
    OutOfRange { field: String },

    #[error("Duplicate value: {field}")]
    DuplicateValue { field: String },
}

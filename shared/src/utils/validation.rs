//! Common validation utilities

use once_cell::sync::Lazy;
use regex::Regex;

/// Brazilian CPF, digits only
pub static NATIONAL_ID_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{11}$").expect("valid national id regex"));

/// Old (ABC1234) and Mercosul (ABC1D23) plate formats
pub static PLATE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{3}-?\d[A-Z0-9]\d{2}$").expect("valid plate regex"));

/// CEP with optional hyphen
pub static POSTAL_CODE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{5}-?\d{3}$").expect("valid postal code regex"));

/// Two-letter state abbreviation
pub static STATE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{2}$").expect("valid state regex"));

/// Common validation functions
pub mod validators {
    use super::*;

    /// Check if a string is not empty
    pub fn not_empty(value: &str) -> bool {
        !value.trim().is_empty()
    }

    pub fn is_national_id(value: &str) -> bool {
        NATIONAL_ID_REGEX.is_match(value)
    }

    pub fn is_plate(value: &str) -> bool {
        PLATE_REGEX.is_match(value)
    }

    /// Uppercase and strip the optional hyphen so `abc-1234` and `ABC1234`
    /// compare equal
    pub fn normalize_plate(value: &str) -> String {
        value
            .trim()
            .chars()
            .filter(|c| *c != '-')
            .flat_map(|c| c.to_uppercase())
            .collect()
    }

    pub fn normalize_email(value: &str) -> String {
        value.trim().to_lowercase()
    }

    /// Mask an email for logging, keeping the first character and the domain
    pub fn mask_email(email: &str) -> String {
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() => {
                let first: String = local.chars().take(1).collect();
                format!("{}***@{}", first, domain)
            }
            _ => "***".to_string(),
        }
    }
}

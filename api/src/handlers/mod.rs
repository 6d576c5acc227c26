//! Shared response handling for route handlers

pub mod error;

pub use error::{
    extract_language, handle_denied, handle_domain_error_with_lang, handle_malformed_request,
    handle_validation_errors,
};

//! Request and response payloads of the HTTP boundary.
//!
//! Responses are explicit projections of domain entities; the password hash
//! never appears in any of them.

pub mod auth;
pub mod rental;
pub mod user;
pub mod vehicle;

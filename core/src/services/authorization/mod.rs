//! Route-level authorization policy

mod pattern;
mod policy;


pub use pattern::PathPattern;
pub use policy::{AuthorizationPolicy, Decision, DenyReason, Requirement, Rule};

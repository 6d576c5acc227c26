//! User profile and administration service

mod service;


pub use service::{ProfileUpdate, UserService};

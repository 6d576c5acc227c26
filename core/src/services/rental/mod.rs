//! Rental lifecycle service

mod service;

#[cfg(test)]
mod tests;

pub use service::{NewRental, RentalService};

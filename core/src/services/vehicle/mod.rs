//! Vehicle catalogue service

mod service;


pub use service::{NewVehicle, VehicleService, VehicleUpdate};

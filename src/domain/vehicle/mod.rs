//! Vehicle aggregate
//!
//! Read-only view of the fleet's cars.

pub mod model;
pub mod repository;

pub use model::Vehicle;
pub use repository::VehicleRepository;

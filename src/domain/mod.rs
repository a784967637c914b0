//! Domain layer: fleet entities, repository traits and errors

pub mod auth;
pub mod error;
pub mod repositories;
pub mod tariff;
pub mod vehicle;

pub use auth::{Capability, Principal};
pub use error::{DomainError, DomainResult};
pub use repositories::RepositoryProvider;
pub use tariff::{DailyRate, PriceEntry, TariffRepository, TariffUpdate, TariffUpdateOutcome};
pub use vehicle::{Vehicle, VehicleRepository};

//! Tariff aggregate
//!
//! Daily-rate rows keyed by `(vehicle_id, day_count)` and the batch
//! update request that rewrites their `cost`.

pub mod model;
pub mod repository;

pub use model::{DailyRate, PriceEntry, TariffUpdate, TariffUpdateOutcome};
pub use repository::TariffRepository;

//! Tariff use cases

pub mod service;

pub use service::TariffService;

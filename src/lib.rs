//! # Rental Tariffs
//!
//! Authenticated REST API over a rental fleet's relational store: list the
//! vehicles, read a vehicle's daily-rate tariffs and batch-update them.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Vehicles, tariffs, the capability model and repository traits
//! - **application**: `TariffService`, identity and the capability port
//! - **infrastructure**: SeaORM repositories, database bootstrap, crypto
//! - **interfaces**: axum router, handlers, extractors and middleware
//! - **server**: Runtime lifecycle shared by the CLI and tests

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig, ConfigError};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider, StoreSchema};

// Re-export API router
pub use interfaces::{create_api_router, ApiContext};

pub use server::{init_tracing, ServerHandle, ServerOptions};

//! Tariff module: read and batch-update daily rates

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;

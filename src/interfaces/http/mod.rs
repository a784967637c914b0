//! HTTP REST API interfaces
//!
//! - `middleware`: Authentication middleware (Bearer JWT + Basic)
//! - `modules`: Handlers and DTOs per resource
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod error;
pub mod middleware;
pub mod modules;
pub mod router;

pub use error::ApiError;
pub use router::{create_api_router, ApiContext, ApiDoc};

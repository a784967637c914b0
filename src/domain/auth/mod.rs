//! Callers and the capabilities they may hold

pub mod model;

pub use model::{Capability, Principal, ADMIN_ROLE};

//! Application ports

pub mod capability;

pub use capability::{CapabilityCheck, RoleCapabilityPolicy};

//! Application layer: use cases over the fleet store

pub mod identity;
pub mod ports;
pub mod tariffs;

pub use identity::{AuthResult, IdentityService};
pub use ports::{CapabilityCheck, RoleCapabilityPolicy};
pub use tariffs::TariffService;

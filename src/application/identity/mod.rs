//! Identity module: authentication of configured accounts
//!
//! [`IdentityService`] turns Basic credentials or a bearer token into a
//! [`Principal`](crate::domain::Principal) and issues tokens on login.

pub mod service;

pub use service::{AuthResult, IdentityService};

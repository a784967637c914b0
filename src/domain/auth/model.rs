//! Principal and capability types

use std::fmt;

/// Role that holds every capability
pub const ADMIN_ROLE: &str = "admin";

/// Authorization levels an operation can require
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Administrative access to fleet pricing
    ManageOptions,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ManageOptions => write!(f, "manage_options"),
        }
    }
}

/// An authenticated caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Stable identifier (JWT `sub`, or the username for Basic auth)
    pub subject: String,
    pub username: String,
    pub role: String,
}

impl Principal {
    pub fn new(subject: impl Into<String>, username: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            username: username.into(),
            role: role.into(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

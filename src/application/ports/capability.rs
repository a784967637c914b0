//! Capability check port
//!
//! [`TariffService`](crate::application::TariffService) asks this port
//! before running any operation. The concrete policy is pluggable.

use crate::domain::{Capability, DomainError, DomainResult, Principal};

pub trait CapabilityCheck: Send + Sync {
    /// `Ok(())` when `caller` holds `capability`, `Forbidden` otherwise.
    fn require(&self, caller: &Principal, capability: Capability) -> DomainResult<()>;
}

/// Role-based policy: the `admin` role holds every capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoleCapabilityPolicy;

impl CapabilityCheck for RoleCapabilityPolicy {
    fn require(&self, caller: &Principal, capability: Capability) -> DomainResult<()> {
        if caller.is_admin() {
            Ok(())
        } else {
            Err(DomainError::Forbidden(format!(
                "user '{}' lacks the {} capability",
                caller.username, capability
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_holds_manage_options() {
        let admin = Principal::new("1", "root", "admin");
        assert!(RoleCapabilityPolicy
            .require(&admin, Capability::ManageOptions)
            .is_ok());
    }

    #[test]
    fn other_roles_are_forbidden() {
        let editor = Principal::new("2", "ed", "editor");
        let err = RoleCapabilityPolicy
            .require(&editor, Capability::ManageOptions)
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
        assert!(err.to_string().contains("manage_options"));
    }
}

//! Multi-role capability checks
//!
//! A user holding several roles is granted an action when any one of
//! them grants it. Roles never restrict each other.

use crate::permission::models::{Module, Permission, Role};
use crate::permission::resolver::PermissionResolver;

/// OR-aggregation of a resolver across a role set
#[derive(Debug, Clone, Copy)]
pub struct CapabilityGate<'a> {
    resolver: PermissionResolver<'a>,
}

impl<'a> CapabilityGate<'a> {
    /// Create a gate over a resolver
    pub fn new(resolver: PermissionResolver<'a>) -> Self {
        Self { resolver }
    }

    /// Whether any of `roles` grants `permission` on `module`
    ///
    /// An empty role set is never granted anything.
    pub fn can_access(&self, roles: &[Role], module: Module, permission: Permission) -> bool {
        roles
            .iter()
            .any(|role| self.resolver.resolve(*role, module, permission))
    }

    /// Whether any of `roles` may view `module`
    pub fn can_view_module(&self, roles: &[Role], module: Module) -> bool {
        self.can_access(roles, module, Permission::View)
    }

    /// [`can_access`](Self::can_access) over raw identifiers
    ///
    /// Unrecognised role labels are ignored; an unrecognised module or
    /// permission is denied.
    pub fn can_access_str<S: AsRef<str>>(
        &self,
        roles: &[S],
        module: &str,
        permission: &str,
    ) -> bool {
        match (module.parse(), permission.parse()) {
            (Ok(module), Ok(permission)) => {
                self.can_access(&parse_roles(roles), module, permission)
            }
            _ => false,
        }
    }

    /// [`can_view_module`](Self::can_view_module) over raw identifiers
    pub fn can_view_module_str<S: AsRef<str>>(&self, roles: &[S], module: &str) -> bool {
        self.can_access_str(roles, module, Permission::View.as_str())
    }
}

/// Parse role labels, dropping anything outside the role catalog
pub fn parse_roles<S: AsRef<str>>(labels: &[S]) -> Vec<Role> {
    labels
        .iter()
        .filter_map(|label| match label.as_ref().parse::<Role>() {
            Ok(role) => Some(role),
            Err(_) => {
                tracing::debug!(role = label.as_ref(), "Ignoring unknown role label");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permission::models::PermissionKey;
    use crate::permission::overrides::OverrideStore;

    #[test]
    fn test_empty_role_set_denied() {
        let store = OverrideStore::new();
        let gate = CapabilityGate::new(PermissionResolver::new(&store));

        for module in Module::ALL {
            assert!(!gate.can_view_module(&[], *module));
        }
    }

    #[test]
    fn test_or_across_roles() {
        let store = OverrideStore::new();
        let gate = CapabilityGate::new(PermissionResolver::new(&store));

        assert!(!gate.can_view_module(&[Role::Viewer], Module::Finance));
        assert!(gate.can_view_module(&[Role::Viewer, Role::FinanceManager], Module::Finance));
        assert!(gate.can_access(
            &[Role::FinanceManager, Role::Viewer],
            Module::Finance,
            Permission::Delete
        ));
    }

    #[test]
    fn test_override_reaches_gate() {
        let mut store = OverrideStore::new();
        store
            .toggle(PermissionKey::new(Role::Member, Module::Donations, Permission::View))
            .unwrap();
        let gate = CapabilityGate::new(PermissionResolver::new(&store));

        assert!(gate.can_view_module(&[Role::Member], Module::Donations));
    }

    #[test]
    fn test_string_boundary() {
        let store = OverrideStore::new();
        let gate = CapabilityGate::new(PermissionResolver::new(&store));

        assert!(gate.can_view_module_str(&["ghost", "finance_manager"], "finance"));
        assert!(!gate.can_view_module_str(&["ghost"], "finance"));
        assert!(!gate.can_access_str(&["admin"], "payroll", "view"));
        assert!(!gate.can_access_str(&["admin"], "finance", "approve"));
        assert!(!gate.can_view_module_str::<&str>(&[], "dashboard"));
    }

    #[test]
    fn test_parse_roles() {
        let roles = parse_roles(&["admin".to_string(), "nope".to_string(), "editor".to_string()]);
        assert_eq!(roles, vec![Role::Admin, Role::Editor]);
    }
}

//! Compiled default policy
//!
//! Baseline grants that apply when no override exists. The table below
//! is the single place where out-of-the-box access is decided; anything
//! not listed is denied. `super_admin` is granted everything and is not
//! listed.

use once_cell::sync::Lazy;
use std::collections::HashSet;

use crate::permission::models::{Module, Permission, PermissionKey, Role};

use Module::*;
use Permission::*;

const VIEW: &[Permission] = &[View];
const AUTHOR: &[Permission] = &[View, Create, Edit];
const FULL: &[Permission] = &[View, Create, Edit, Delete];

type Grants = &'static [(Module, &'static [Permission])];

#[rustfmt::skip]
static DEFAULT_POLICY: &[(Role, Grants)] = &[
    (Role::Admin, &[
        (Dashboard, FULL), (Projects, FULL), (Donations, FULL), (Campaigns, FULL),
        (Finance, FULL), (Volunteers, FULL), (Tasks, FULL), (Events, FULL),
        (Blood, FULL), (Blog, FULL), (Gallery, FULL), (Team, FULL),
        (Reports, FULL), (Messages, FULL), (Roles, FULL), (Settings, FULL),
        (Homepage, FULL), (Audit, FULL), (Seed, VIEW),
    ]),
    (Role::FinanceManager, &[
        (Dashboard, VIEW), (Finance, FULL), (Donations, FULL),
        (Campaigns, VIEW), (Reports, VIEW),
    ]),
    (Role::Fundraiser, &[
        (Dashboard, VIEW), (Campaigns, AUTHOR), (Donations, AUTHOR),
        (Projects, VIEW), (Reports, VIEW),
    ]),
    (Role::ContentManager, &[
        (Dashboard, VIEW), (Blog, FULL), (Gallery, FULL), (Homepage, FULL),
        (Events, AUTHOR), (Team, VIEW),
    ]),
    (Role::Editor, &[
        (Dashboard, VIEW), (Blog, AUTHOR), (Gallery, AUTHOR),
    ]),
    (Role::VolunteerManager, &[
        (Dashboard, VIEW), (Volunteers, FULL), (Tasks, FULL),
        (Events, AUTHOR), (Messages, &[View, Create]),
    ]),
    (Role::BloodManager, &[
        (Dashboard, VIEW), (Blood, FULL), (Volunteers, VIEW),
    ]),
    (Role::Member, &[
        (Dashboard, VIEW), (Projects, VIEW), (Events, VIEW), (Blog, VIEW),
    ]),
    (Role::Volunteer, &[
        (Dashboard, VIEW), (Tasks, &[View, Edit]), (Events, VIEW), (Blood, VIEW),
    ]),
    (Role::Viewer, &[
        (Dashboard, VIEW), (Projects, VIEW), (Campaigns, VIEW), (Events, VIEW),
        (Blog, VIEW), (Gallery, VIEW), (Reports, VIEW),
    ]),
    (Role::User, &[
        (Dashboard, VIEW),
    ]),
];

static GRANTED: Lazy<HashSet<PermissionKey>> = Lazy::new(|| {
    DEFAULT_POLICY
        .iter()
        .flat_map(|(role, grants)| {
            grants.iter().flat_map(move |(module, permissions)| {
                permissions
                    .iter()
                    .map(move |permission| PermissionKey::new(*role, *module, *permission))
            })
        })
        .collect()
});

/// Default grant for a triple
pub fn default_permission(role: Role, module: Module, permission: Permission) -> bool {
    default_for(&PermissionKey::new(role, module, permission))
}

/// Default grant for a key
pub fn default_for(key: &PermissionKey) -> bool {
    key.role == Role::SuperAdmin || GRANTED.contains(key)
}

/// Default grant for raw identifiers; anything unrecognised is denied
pub fn default_permission_str(role: &str, module: &str, permission: &str) -> bool {
    match (role.parse(), module.parse(), permission.parse()) {
        (Ok(role), Ok(module), Ok(permission)) => default_permission(role, module, permission),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_super_admin_granted_everything() {
        for module in Module::ALL {
            for permission in Permission::ALL {
                assert!(default_permission(Role::SuperAdmin, *module, *permission));
            }
        }
    }

    #[test]
    fn test_known_defaults() {
        assert!(!default_permission(Role::Viewer, Finance, View));
        assert!(!default_permission(Role::Member, Donations, View));
        assert!(default_permission(Role::Admin, Settings, Delete));
        assert!(default_permission(Role::FinanceManager, Finance, View));
        assert!(!default_permission(Role::Admin, Seed, Delete));
        assert!(default_permission(Role::Volunteer, Tasks, Edit));
        assert!(!default_permission(Role::Volunteer, Tasks, Delete));
    }

    #[test]
    fn test_unlisted_is_denied() {
        assert!(!default_permission(Role::User, Blog, View));
        assert!(!default_permission(Role::Editor, Blog, Delete));
    }

    #[test]
    fn test_raw_lookup_miss_is_denied() {
        assert!(!default_permission_str("root", "finance", "view"));
        assert!(!default_permission_str("admin", "payroll", "view"));
        assert!(!default_permission_str("admin", "finance", "approve"));
        assert!(default_permission_str("admin", "finance", "view"));
    }

    #[test]
    fn test_table_lists_each_role_once() {
        let mut seen = HashSet::new();
        for (role, _) in DEFAULT_POLICY {
            assert!(seen.insert(*role), "{} listed twice", role);
            assert_ne!(*role, Role::SuperAdmin);
        }
    }

    #[test]
    fn test_every_role_can_see_dashboard() {
        for role in Role::ALL {
            assert!(default_permission(*role, Dashboard, View), "{}", role);
        }
    }
}

//! Permission data models
//!
//! Roles, modules and permissions are closed enumerations. Their
//! snake_case identifiers are the only string form, used when talking to
//! the persisted override blob and to callers that hold raw role labels.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

macro_rules! closed_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $err:ident {
            $($(#[$vmeta:meta])* $variant:ident => $ident:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Every value, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire identifier
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $ident),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($ident => Ok($name::$variant),)+
                    other => Err(Error::$err(other.to_string())),
                }
            }
        }
    };
}

closed_enum! {
    /// Named capability bundle assignable to users
    Role, UnknownRole {
        /// Unrestricted; every check resolves to true
        SuperAdmin => "super_admin",
        Admin => "admin",
        Member => "member",
        Viewer => "viewer",
        Fundraiser => "fundraiser",
        FinanceManager => "finance_manager",
        ContentManager => "content_manager",
        VolunteerManager => "volunteer_manager",
        BloodManager => "blood_manager",
        Editor => "editor",
        Volunteer => "volunteer",
        User => "user",
    }
}

closed_enum! {
    /// Functional area of the administrative application
    Module, UnknownModule {
        Dashboard => "dashboard",
        Projects => "projects",
        Donations => "donations",
        Campaigns => "campaigns",
        Finance => "finance",
        Volunteers => "volunteers",
        Tasks => "tasks",
        Events => "events",
        /// Blood donation requests and donors
        Blood => "blood",
        Blog => "blog",
        Gallery => "gallery",
        Team => "team",
        Reports => "reports",
        Messages => "messages",
        /// The permission matrix itself
        Roles => "roles",
        Settings => "settings",
        Homepage => "homepage",
        Audit => "audit",
        /// Demo data seeding
        Seed => "seed",
    }
}

closed_enum! {
    /// Action scoped to a module
    Permission, UnknownPermission {
        View => "view",
        Create => "create",
        Edit => "edit",
        Delete => "delete",
    }
}

impl Role {
    /// Whether overrides may target this role
    pub fn is_overridable(&self) -> bool {
        !matches!(self, Role::SuperAdmin)
    }
}

/// Structured (role, module, permission) triple
///
/// The `"{role}:{module}:{permission}"` string form exists only at the
/// serialization boundary, see [`PermissionKey::encode`] and [`FromStr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PermissionKey {
    pub role: Role,
    pub module: Module,
    pub permission: Permission,
}

impl PermissionKey {
    /// Create a new key
    pub fn new(role: Role, module: Module, permission: Permission) -> Self {
        Self {
            role,
            module,
            permission,
        }
    }

    /// Encode as the persisted string key
    pub fn encode(&self) -> String {
        self.to_string()
    }

    /// Every key in the product of the three enumerations
    pub fn all() -> impl Iterator<Item = PermissionKey> {
        Role::ALL.iter().flat_map(|&role| {
            Module::ALL.iter().flat_map(move |&module| {
                Permission::ALL
                    .iter()
                    .map(move |&permission| PermissionKey::new(role, module, permission))
            })
        })
    }
}

impl fmt::Display for PermissionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.role, self.module, self.permission)
    }
}

impl FromStr for PermissionKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(role), Some(module), Some(permission), None) => Ok(PermissionKey::new(
                role.parse()?,
                module.parse()?,
                permission.parse()?,
            )),
            _ => Err(Error::MalformedKey(s.to_string())),
        }
    }
}

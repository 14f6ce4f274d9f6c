//! Administrative permission matrix
//!
//! Rows are modules; each row has one cell per (role, permission) column.

use serde::Serialize;

use crate::permission::{Module, OverrideStore, Permission, PermissionResolver, Role};

/// One checkbox in the matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatrixCell {
    pub role: Role,
    pub permission: Permission,
    /// Effective value
    pub enabled: bool,
    /// Differs from the compiled default
    pub overridden: bool,
    /// Cannot be toggled
    pub locked: bool,
}

/// One module's row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatrixRow {
    pub module: Module,
    pub cells: Vec<MatrixCell>,
}

impl MatrixRow {
    /// Cell for a column, if the role is part of the matrix
    pub fn cell(&self, role: Role, permission: Permission) -> Option<&MatrixCell> {
        self.cells
            .iter()
            .find(|c| c.role == role && c.permission == permission)
    }
}

/// Snapshot of the matrix for a set of role columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionMatrix {
    pub roles: Vec<Role>,
    pub rows: Vec<MatrixRow>,
}

impl PermissionMatrix {
    /// Build the matrix from an override store; an empty `roles` means every role
    pub fn from_store(overrides: &OverrideStore, roles: &[Role]) -> Self {
        let roles: Vec<Role> = if roles.is_empty() {
            Role::ALL.to_vec()
        } else {
            roles.to_vec()
        };
        let resolver = PermissionResolver::new(overrides);

        let rows = Module::ALL
            .iter()
            .map(|&module| MatrixRow {
                module,
                cells: roles
                    .iter()
                    .flat_map(|&role| {
                        Permission::ALL.iter().map(move |&permission| MatrixCell {
                            role,
                            permission,
                            enabled: resolver.resolve(role, module, permission),
                            overridden: resolver.is_overridden(role, module, permission),
                            locked: !role.is_overridable(),
                        })
                    })
                    .collect(),
            })
            .collect();

        Self { roles, rows }
    }

    /// Row for a module
    pub fn row(&self, module: Module) -> Option<&MatrixRow> {
        self.rows.iter().find(|r| r.module == module)
    }

    /// Number of highlighted (overridden) cells
    pub fn overridden_count(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|r| r.cells.iter())
            .filter(|c| c.overridden)
            .count()
    }
}

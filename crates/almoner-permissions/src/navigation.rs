//! Navigation filtering and route guarding
//!
//! Sidebar entries and whole routes are gated on the view permission of
//! the module that owns them.

use serde::{Deserialize, Serialize};

use crate::config::PermissionsConfig;
use crate::permission::{CapabilityGate, Module, Role};
use crate::service::PermissionService;

/// Anything that can answer "may these roles see this module?"
pub trait ModuleAccess {
    fn can_view_module(&self, roles: &[Role], module: Module) -> bool;
}

impl ModuleAccess for CapabilityGate<'_> {
    fn can_view_module(&self, roles: &[Role], module: Module) -> bool {
        CapabilityGate::can_view_module(self, roles, module)
    }
}

impl ModuleAccess for PermissionService {
    fn can_view_module(&self, roles: &[Role], module: Module) -> bool {
        PermissionService::can_view_module(self, roles, module)
    }
}

/// Sidebar entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    pub module: Module,
    pub label: String,
    pub path: String,
    pub icon: String,
}

impl NavItem {
    /// Create a new navigation entry
    pub fn new(module: Module, label: &str, path: &str, icon: &str) -> Self {
        Self {
            module,
            label: label.to_string(),
            path: path.to_string(),
            icon: icon.to_string(),
        }
    }

    /// Whether `path` is this entry's path or nested below it
    pub fn owns(&self, path: &str) -> bool {
        match path.strip_prefix(self.path.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'),
            None => false,
        }
    }
}

/// The administrative sidebar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationMenu {
    items: Vec<NavItem>,
}

impl NavigationMenu {
    /// Create a menu from explicit entries
    pub fn new(items: Vec<NavItem>) -> Self {
        Self { items }
    }

    /// All entries, unfiltered
    pub fn items(&self) -> &[NavItem] {
        &self.items
    }

    /// Entries the role set may see, in menu order
    pub fn visible_items(&self, access: &impl ModuleAccess, roles: &[Role]) -> Vec<NavItem> {
        self.items
            .iter()
            .filter(|item| access.can_view_module(roles, item.module))
            .cloned()
            .collect()
    }

    /// Entry owning `path`, preferring the longest matching prefix
    pub fn owner_of(&self, path: &str) -> Option<&NavItem> {
        self.items
            .iter()
            .filter(|item| item.owns(path))
            .max_by_key(|item| item.path.len())
    }
}

impl Default for NavigationMenu {
    fn default() -> Self {
        use Module::*;
        Self::new(vec![
            NavItem::new(Dashboard, "Dashboard", "/dashboard", "layout-dashboard"),
            NavItem::new(Projects, "Projects", "/projects", "folder-kanban"),
            NavItem::new(Donations, "Donations", "/donations", "hand-heart"),
            NavItem::new(Campaigns, "Campaigns", "/campaigns", "megaphone"),
            NavItem::new(Finance, "Finance", "/finance", "wallet"),
            NavItem::new(Volunteers, "Volunteers", "/volunteers", "users"),
            NavItem::new(Tasks, "Tasks", "/tasks", "list-checks"),
            NavItem::new(Events, "Events", "/events", "calendar"),
            NavItem::new(Blood, "Blood Requests", "/blood", "droplet"),
            NavItem::new(Blog, "Blog", "/blog", "newspaper"),
            NavItem::new(Gallery, "Gallery", "/gallery", "image"),
            NavItem::new(Team, "Team", "/team", "id-card"),
            NavItem::new(Reports, "Reports", "/reports", "bar-chart"),
            NavItem::new(Messages, "Messages", "/messages", "mail"),
            NavItem::new(Roles, "Roles & Permissions", "/roles", "shield"),
            NavItem::new(Settings, "Settings", "/settings", "settings"),
            NavItem::new(Homepage, "Homepage Builder", "/homepage", "layout-template"),
            NavItem::new(Audit, "Audit Log", "/audit", "scroll-text"),
            NavItem::new(Seed, "Seed Data", "/seed", "database"),
        ])
    }
}

/// Outcome of guarding a route
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    Redirect(String),
}

/// Route guard backed by a navigation menu
#[derive(Debug, Clone)]
pub struct RouteGuard {
    menu: NavigationMenu,
    fallback_path: String,
}

impl RouteGuard {
    /// Create a guard redirecting denied routes to `fallback_path`
    pub fn new(menu: NavigationMenu, fallback_path: impl Into<String>) -> Self {
        Self {
            menu,
            fallback_path: fallback_path.into(),
        }
    }

    /// Create a guard using the configured fallback path
    pub fn from_config(menu: NavigationMenu, config: &PermissionsConfig) -> Self {
        Self::new(menu, config.fallback_path.clone())
    }

    /// Where denied routes are sent
    pub fn fallback_path(&self) -> &str {
        &self.fallback_path
    }

    /// Decide whether `roles` may enter `path`
    ///
    /// Paths no module owns are allowed. A denied route redirects to the
    /// fallback path, or to `/` when the fallback is itself denied.
    pub fn check(&self, access: &impl ModuleAccess, roles: &[Role], path: &str) -> RouteDecision {
        let Some(owner) = self.menu.owner_of(path) else {
            return RouteDecision::Allow;
        };
        if access.can_view_module(roles, owner.module) {
            return RouteDecision::Allow;
        }

        tracing::debug!(path, module = %owner.module, "Route denied");
        let fallback_allowed = match self.menu.owner_of(&self.fallback_path) {
            Some(item) => access.can_view_module(roles, item.module),
            None => true,
        };
        if fallback_allowed && !owner.owns(&self.fallback_path) {
            RouteDecision::Redirect(self.fallback_path.clone())
        } else {
            RouteDecision::Redirect("/".to_string())
        }
    }
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self::from_config(NavigationMenu::default(), &PermissionsConfig::default())
    }
}

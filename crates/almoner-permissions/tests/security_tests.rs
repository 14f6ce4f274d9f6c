//! Security tests for almoner-permissions
//!
//! These tests validate that:
//! - Unrecognised input never grants access
//! - super_admin cannot be overridden from any direction
//! - Holding no role grants nothing

use almoner_permissions::{
    Error, Module, Permission, PermissionService, PermissionsConfig, Role, OVERRIDES_SETTINGS_KEY,
};
use almoner_settings::{InMemorySettingsStore, SettingsStore};
use serde_json::json;
use std::sync::Arc;

fn service_with(store: Arc<InMemorySettingsStore>, config: PermissionsConfig) -> PermissionService {
    PermissionService::with_settings_store(store, config)
}

#[test]
fn test_unknown_labels_are_denied() {
    let service =
        service_with(Arc::new(InMemorySettingsStore::new()), PermissionsConfig::default());

    assert!(!service.can_access_str(&["root"], "finance", "view"));
    assert!(!service.can_access_str(&["ADMIN"], "finance", "view"));
    assert!(!service.can_access_str(&["admin"], "finance ", "view"));
    assert!(!service.can_access_str(&["admin"], "finance", "*"));
    assert!(!service.can_access_str(&["admin:finance:view"], "finance", "view"));
}

#[test]
fn test_empty_role_set_grants_nothing() {
    let service =
        service_with(Arc::new(InMemorySettingsStore::new()), PermissionsConfig::default());
    for module in Module::ALL {
        for permission in Permission::ALL {
            assert!(!service.can_access(&[], *module, *permission));
        }
    }
}

#[test]
fn test_super_admin_cannot_be_toggled() {
    let service =
        service_with(Arc::new(InMemorySettingsStore::new()), PermissionsConfig::default());
    let err = service
        .toggle(Role::SuperAdmin, Module::Roles, Permission::Edit)
        .unwrap_err();
    assert!(matches!(err, Error::ImmutableRole(_)));
    assert!(service.resolve(Role::SuperAdmin, Module::Roles, Permission::Edit));
}

#[tokio::test]
async fn test_persisted_super_admin_override_is_rejected() {
    let store = Arc::new(InMemorySettingsStore::new());
    store
        .put(OVERRIDES_SETTINGS_KEY, json!({"super_admin:roles:edit": false}), None)
        .await
        .unwrap();

    let strict = service_with(store.clone(), PermissionsConfig::default());
    assert!(strict.load().await.is_err());
    assert!(strict.resolve(Role::SuperAdmin, Module::Roles, Permission::Edit));

    let lenient = service_with(store, PermissionsConfig::lenient());
    let report = lenient.load().await.unwrap();
    assert_eq!(report.skipped, vec!["super_admin:roles:edit".to_string()]);
    assert!(lenient.resolve(Role::SuperAdmin, Module::Roles, Permission::Edit));
}

#[tokio::test]
async fn test_non_boolean_values_are_rejected() {
    let store = Arc::new(InMemorySettingsStore::new());
    store
        .put(OVERRIDES_SETTINGS_KEY, json!({"viewer:finance:view": "true"}), None)
        .await
        .unwrap();

    let service = service_with(store, PermissionsConfig::default());
    assert!(service.load().await.is_err());
    assert!(!service.resolve(Role::Viewer, Module::Finance, Permission::View));
}

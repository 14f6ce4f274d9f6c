//! Property-based tests for almoner-permissions
//!
//! These tests verify correctness properties that should hold across all inputs.

use almoner_permissions::{
    default_permission, CapabilityGate, Module, OverrideStore, Permission, PermissionKey,
    PermissionResolver, Role,
};
use proptest::prelude::*;

fn role_strategy() -> impl Strategy<Value = Role> {
    prop::sample::select(Role::ALL.to_vec())
}

fn overridable_role_strategy() -> impl Strategy<Value = Role> {
    prop::sample::select(
        Role::ALL
            .iter()
            .copied()
            .filter(|r| r.is_overridable())
            .collect::<Vec<_>>(),
    )
}

fn module_strategy() -> impl Strategy<Value = Module> {
    prop::sample::select(Module::ALL.to_vec())
}

fn permission_strategy() -> impl Strategy<Value = Permission> {
    prop::sample::select(Permission::ALL.to_vec())
}

fn key_strategy() -> impl Strategy<Value = PermissionKey> {
    (role_strategy(), module_strategy(), permission_strategy())
        .prop_map(|(r, m, p)| PermissionKey::new(r, m, p))
}

fn overridable_key_strategy() -> impl Strategy<Value = PermissionKey> {
    (overridable_role_strategy(), module_strategy(), permission_strategy())
        .prop_map(|(r, m, p)| PermissionKey::new(r, m, p))
}

#[derive(Debug, Clone)]
enum Op {
    Toggle(PermissionKey),
    Set(PermissionKey, bool),
    Remove(PermissionKey),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        key_strategy().prop_map(Op::Toggle),
        (key_strategy(), any::<bool>()).prop_map(|(k, v)| Op::Set(k, v)),
        key_strategy().prop_map(Op::Remove),
    ]
}

fn apply(store: &mut OverrideStore, ops: &[Op]) {
    for op in ops {
        // Super-admin keys are rejected; the store must stay consistent anyway
        match op {
            Op::Toggle(k) => {
                let _ = store.toggle(*k);
            }
            Op::Set(k, v) => {
                let _ = store.set(*k, *v);
            }
            Op::Remove(k) => {
                store.remove(k);
            }
        }
    }
}

// ============================================================================
// Property 1: Merge Correctness
// ============================================================================

proptest! {
    #[test]
    fn prop_resolve_is_override_else_default(
        ops in prop::collection::vec(op_strategy(), 0..40),
        sample in key_strategy(),
    ) {
        let mut store = OverrideStore::new();
        apply(&mut store, &ops);
        let resolver = PermissionResolver::new(&store);

        let expected = match store.get(&sample) {
            Some(v) => v,
            None => default_permission(sample.role, sample.module, sample.permission),
        };
        prop_assert_eq!(resolver.resolve_key(&sample), expected);
    }
}

// ============================================================================
// Property 2: Minimal-Delta Invariant
// ============================================================================

proptest! {
    #[test]
    fn prop_store_never_holds_default_values(
        ops in prop::collection::vec(op_strategy(), 0..60),
    ) {
        let mut store = OverrideStore::new();
        apply(&mut store, &ops);

        for (key, value) in store.iter() {
            prop_assert_ne!(*value, default_permission(key.role, key.module, key.permission));
            prop_assert!(key.role.is_overridable());
        }
    }
}

// ============================================================================
// Property 3: Toggle Idempotence
// ============================================================================

proptest! {
    #[test]
    fn prop_double_toggle_restores(
        ops in prop::collection::vec(op_strategy(), 0..20),
        key in overridable_key_strategy(),
    ) {
        let mut store = OverrideStore::new();
        apply(&mut store, &ops);
        store.remove(&key);
        let before = PermissionResolver::new(&store).resolve_key(&key);

        store.toggle(key).unwrap();
        prop_assert_ne!(PermissionResolver::new(&store).resolve_key(&key), before);
        store.toggle(key).unwrap();

        prop_assert_eq!(PermissionResolver::new(&store).resolve_key(&key), before);
        prop_assert!(!store.contains(&key));
    }
}

// ============================================================================
// Property 4: Super-Admin Supremacy
// ============================================================================

proptest! {
    #[test]
    fn prop_super_admin_always_granted(
        ops in prop::collection::vec(op_strategy(), 0..40),
        module in module_strategy(),
        permission in permission_strategy(),
    ) {
        let mut store = OverrideStore::new();
        apply(&mut store, &ops);
        prop_assert!(PermissionResolver::new(&store).resolve(Role::SuperAdmin, module, permission));
    }
}

// ============================================================================
// Property 5: OR Aggregation
// ============================================================================

proptest! {
    #[test]
    fn prop_gate_is_or_of_roles(
        ops in prop::collection::vec(op_strategy(), 0..30),
        roles in prop::collection::vec(role_strategy(), 0..5),
        module in module_strategy(),
        permission in permission_strategy(),
    ) {
        let mut store = OverrideStore::new();
        apply(&mut store, &ops);
        let resolver = PermissionResolver::new(&store);
        let gate = CapabilityGate::new(resolver);

        let expected = roles.iter().any(|r| resolver.resolve(*r, module, permission));
        prop_assert_eq!(gate.can_access(&roles, module, permission), expected);
    }
}

// ============================================================================
// Property 6: Reset Completeness
// ============================================================================

proptest! {
    #[test]
    fn prop_clear_restores_defaults(
        ops in prop::collection::vec(op_strategy(), 0..40),
        sample in key_strategy(),
    ) {
        let mut store = OverrideStore::new();
        apply(&mut store, &ops);
        store.clear();

        prop_assert!(store.is_empty());
        prop_assert_eq!(
            PermissionResolver::new(&store).resolve_key(&sample),
            default_permission(sample.role, sample.module, sample.permission)
        );
    }
}

// ============================================================================
// Property 7: Serialization Round Trip
// ============================================================================

proptest! {
    #[test]
    fn prop_wire_round_trip(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let mut store = OverrideStore::new();
        apply(&mut store, &ops);

        let json = serde_json::to_value(store.to_wire()).unwrap();
        let decoded = OverrideStore::from_json(&json, true).unwrap();

        prop_assert_eq!(decoded.store, store);
        prop_assert!(decoded.skipped.is_empty());
        prop_assert_eq!(decoded.normalized, 0);
    }

    #[test]
    fn prop_key_string_round_trip(key in key_strategy()) {
        let parsed: PermissionKey = key.encode().parse().unwrap();
        prop_assert_eq!(parsed, key);
    }
}

use almoner_permissions::{
    CapabilityGate, Module, NavigationMenu, OverrideStore, Permission, PermissionKey,
    PermissionResolver, PermissionService, PermissionsConfig, Role,
};
use almoner_settings::InMemorySettingsStore;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;

fn populated_store(count: usize) -> OverrideStore {
    let mut store = OverrideStore::new();
    for key in PermissionKey::all().filter(|k| k.role.is_overridable()).take(count) {
        store.toggle(key).expect("overridable key");
    }
    store
}

// ============================================================================
// Benchmark 1: Single-role resolution
// ============================================================================

fn benchmark_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");

    for count in [0usize, 50, 500].iter() {
        let store = populated_store(*count);
        let resolver = PermissionResolver::new(&store);

        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, _| {
            b.iter(|| {
                resolver.resolve(
                    black_box(Role::Viewer),
                    black_box(Module::Finance),
                    black_box(Permission::View),
                )
            });
        });
    }

    group.finish();
}

// ============================================================================
// Benchmark 2: Multi-role gate and navigation filtering
// ============================================================================

fn benchmark_gate(c: &mut Criterion) {
    let store = populated_store(100);
    let gate = CapabilityGate::new(PermissionResolver::new(&store));
    let roles = [Role::Member, Role::Volunteer, Role::Editor, Role::Fundraiser];

    c.bench_function("can_access_four_roles", |b| {
        b.iter(|| gate.can_access(black_box(&roles), Module::Finance, Permission::Delete));
    });

    let menu = NavigationMenu::default();
    c.bench_function("visible_nav_items", |b| {
        b.iter(|| menu.visible_items(&gate, black_box(&roles)));
    });
}

// ============================================================================
// Benchmark 3: Service check path (includes lock acquisition)
// ============================================================================

fn benchmark_service(c: &mut Criterion) {
    let service = PermissionService::with_settings_store(
        Arc::new(InMemorySettingsStore::new()),
        PermissionsConfig::default(),
    );

    c.bench_function("service_can_view_module", |b| {
        b.iter(|| service.can_view_module(black_box(&[Role::Viewer]), black_box(Module::Reports)));
    });
}

criterion_group!(benches, benchmark_resolve, benchmark_gate, benchmark_service);
criterion_main!(benches);

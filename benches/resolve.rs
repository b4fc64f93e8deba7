//! Benchmarks for field resolution.
//!
//! Measures the two lookup modes against a deep class hierarchy with a wide
//! interface set:
//! - Hierarchy lookup hitting the most-derived level (best case)
//! - Hierarchy lookup walking to the root (worst case for the chain)
//! - Interface fallback over the transitive set
//! - Declaring-type-only lookup

extern crate fieldscope;

use std::hint::black_box;
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};
use fieldscope::prelude::*;

const DEPTH: usize = 16;
const INTERFACES: usize = 8;

/// Build a chain of `DEPTH` classes, the root declaring `root_field`, the
/// leaf declaring `leaf_field`, with `INTERFACES` marker interfaces on the
/// leaf, one of which declares `IFACE_CONST`.
fn build_hierarchy(registry: &Arc<TypeRegistry>) -> RuntimeTypeRc {
    let i4 = registry.primitive(TypeFlavor::I4).unwrap();

    let mut interfaces = Vec::with_capacity(INTERFACES);
    for index in 0..INTERFACES {
        let mut builder = TypeBuilder::new(registry.clone())
            .namespace("Bench")
            .name(&format!("IMarker{index}"))
            .interface();
        if index == INTERFACES - 1 {
            builder = builder.field("IFACE_CONST", &i4, FieldModifiers::empty());
        }
        interfaces.push(builder.build().unwrap());
    }

    let mut current = TypeBuilder::new(registry.clone())
        .namespace("Bench")
        .name("Level0")
        .class()
        .field("root_field", &i4, FieldModifiers::PUBLIC)
        .build()
        .unwrap();

    for level in 1..DEPTH {
        let mut builder = TypeBuilder::new(registry.clone())
            .namespace("Bench")
            .name(&format!("Level{level}"))
            .class()
            .extends(&current);
        if level == DEPTH - 1 {
            builder = builder.field("leaf_field", &i4, FieldModifiers::PUBLIC);
            for interface in &interfaces {
                builder = builder.implements(interface);
            }
        }
        current = builder.build().unwrap();
    }

    current
}

fn bench_resolve_leaf(c: &mut Criterion) {
    let registry = Arc::new(TypeRegistry::new());
    let leaf = build_hierarchy(&registry);

    c.bench_function("resolve_leaf_field", |b| {
        b.iter(|| {
            let field = find_field(black_box(&leaf), black_box("leaf_field"), false).unwrap();
            black_box(field)
        });
    });
}

fn bench_resolve_root(c: &mut Criterion) {
    let registry = Arc::new(TypeRegistry::new());
    let leaf = build_hierarchy(&registry);

    c.bench_function("resolve_root_field", |b| {
        b.iter(|| {
            let field = find_field(black_box(&leaf), black_box("root_field"), false).unwrap();
            black_box(field)
        });
    });
}

fn bench_resolve_interface_constant(c: &mut Criterion) {
    let registry = Arc::new(TypeRegistry::new());
    let leaf = build_hierarchy(&registry);

    c.bench_function("resolve_interface_constant", |b| {
        b.iter(|| {
            let field = find_field(black_box(&leaf), black_box("IFACE_CONST"), false).unwrap();
            black_box(field)
        });
    });
}

fn bench_resolve_declared(c: &mut Criterion) {
    let registry = Arc::new(TypeRegistry::new());
    let leaf = build_hierarchy(&registry);

    c.bench_function("resolve_declared_field", |b| {
        b.iter(|| {
            let field =
                find_declared_field(black_box(&leaf), black_box("leaf_field"), false).unwrap();
            black_box(field)
        });
    });
}

criterion_group!(
    benches,
    bench_resolve_leaf,
    bench_resolve_root,
    bench_resolve_interface_constant,
    bench_resolve_declared
);
criterion_main!(benches);

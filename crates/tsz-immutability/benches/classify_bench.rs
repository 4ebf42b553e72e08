//! Immutability classification benchmarks.
//!
//! Measures cold classification (fresh cache per iteration) of wide and deep
//! type graphs, and the cost of a warm cache hit.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use tsz_immutability::type_graph::{
    ObjectShape, PrimitiveKind, PropertyDef, TypeData, TypeGraph, TypeId,
};
use tsz_immutability::{ImmutabilityCache, ImmutabilityChecker, OverrideTable};

/// One object with `width` readonly properties, each a small readonly record.
fn wide_object(width: usize) -> (TypeGraph, TypeId) {
    let mut graph = TypeGraph::new();
    let number = graph.primitive(PrimitiveKind::Number);
    let string = graph.primitive(PrimitiveKind::String);
    let properties = (0..width)
        .map(|i| {
            let record = graph.object(vec![
                PropertyDef::readonly("id", number),
                PropertyDef::readonly("label", string),
            ]);
            PropertyDef::readonly(&format!("field{i}"), record)
        })
        .collect();
    let root = graph.object(properties);
    (graph, root)
}

/// `depth` nested readonly arrays of objects, closed by a self-reference.
fn deep_chain(depth: usize) -> (TypeGraph, TypeId) {
    let mut graph = TypeGraph::new();
    let null = graph.primitive(PrimitiveKind::Null);
    let root = graph.reserve();
    let mut current = graph.union(vec![root, null]);
    for _ in 0..depth {
        let node = graph.object(vec![PropertyDef::readonly("child", current)]);
        current = graph.readonly_array(node);
    }
    graph
        .define(
            root,
            TypeData::Object(ObjectShape::new(vec![PropertyDef::readonly(
                "children", current,
            )])),
        )
        .expect("root was reserved");
    (graph, root)
}

fn bench_cold(c: &mut Criterion) {
    let mut group = c.benchmark_group("immutability_cold");
    let overrides = OverrideTable::default();

    for width in [16, 256, 4096] {
        let (graph, root) = wide_object(width);
        group.bench_with_input(BenchmarkId::new("wide", width), &root, |b, &root| {
            b.iter(|| {
                let cache = ImmutabilityCache::new();
                let mut checker = ImmutabilityChecker::new(&graph)
                    .with_overrides(&overrides)
                    .with_cache(&cache);
                black_box(checker.type_immutability(root).ok())
            })
        });
    }

    for depth in [16, 256, 2048] {
        let (graph, root) = deep_chain(depth);
        group.bench_with_input(BenchmarkId::new("deep", depth), &root, |b, &root| {
            b.iter(|| {
                let cache = ImmutabilityCache::new();
                let mut checker = ImmutabilityChecker::new(&graph)
                    .with_overrides(&overrides)
                    .with_cache(&cache);
                black_box(checker.type_immutability(root).ok())
            })
        });
    }

    group.finish();
}

fn bench_warm(c: &mut Criterion) {
    let (graph, root) = wide_object(256);
    let overrides = OverrideTable::default();
    let cache = ImmutabilityCache::new();
    let mut checker = ImmutabilityChecker::new(&graph)
        .with_overrides(&overrides)
        .with_cache(&cache);
    let _ = checker.type_immutability(root);

    c.bench_function("immutability_cache_hit", |b| {
        b.iter(|| black_box(checker.type_immutability(black_box(root)).ok()))
    });
}

criterion_group!(immutability_benches, bench_cold, bench_warm);
criterion_main!(immutability_benches);

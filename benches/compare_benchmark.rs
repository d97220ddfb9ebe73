//! Benchmarks for the comparison engine.

use api_diff::api::{Element, Modifier, Parameter, PrimitiveKind, Snapshot, TypeMirror};
use api_diff::{Api, Comparator, EventRecorder, SnapshotApi, SummaryReporter};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

/// A synthetic snapshot with `packages` packages of `types` classes each.
///
/// Every `drift`th class gets an extra method so that snapshots built with
/// different drift values disagree in a predictable number of places.
fn synthetic(name: &str, packages: usize, types: usize, drift: usize) -> SnapshotApi {
    let int = || TypeMirror::primitive(PrimitiveKind::Int);
    let string = || TypeMirror::declared("java.lang", "String");

    let packages = (0..packages)
        .map(|p| {
            let classes = (0..types)
                .map(|t| {
                    let mut members = vec![
                        Element::field("count", int()).with_modifiers([Modifier::Public]),
                        Element::method("get", string(), vec![Parameter::new("index", int())])
                            .with_modifiers([Modifier::Public]),
                        Element::constructor(vec![]).with_modifiers([Modifier::Public]),
                    ];
                    if drift > 0 && t % drift == 0 {
                        members.push(Element::method("extra", int(), vec![]).with_modifiers([Modifier::Public]));
                    }
                    Element::class(format!("Type{t}"), members).with_modifiers([Modifier::Public])
                })
                .collect();
            Element::package(format!("org.example.p{p}"), classes)
        })
        .collect();

    SnapshotApi::new(
        name,
        Snapshot {
            name: None,
            modules: vec![Element::module("org.example", packages)],
            packages: vec![],
        },
    )
}

fn benchmark_identical(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare_identical");
    for size in [10, 50, 200] {
        let a = synthetic("a", size, 20, 0);
        let b = synthetic("b", size, 20, 0);
        group.bench_with_input(BenchmarkId::from_parameter(size * 20), &size, |bench, _| {
            bench.iter(|| {
                let mut recorder = EventRecorder::new();
                let equal = Comparator::new([&a as &dyn Api, &b]).compare(&mut recorder);
                black_box(equal)
            });
        });
    }
    group.finish();
}

fn benchmark_n_way(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare_n_way");
    for n in [2usize, 4, 8] {
        let apis: Vec<SnapshotApi> = (0..n).map(|i| synthetic(&format!("v{i}"), 50, 20, i)).collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |bench, _| {
            bench.iter(|| {
                let mut reporter = SummaryReporter::new().no_color();
                let equal = Comparator::new(apis.iter().map(|api| api as &dyn Api)).compare(&mut reporter);
                black_box(equal)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_identical, benchmark_n_way);
criterion_main!(benches);

//! # Electrician Resolver Benchmarks
//!
//! Start-order resolution is O(V + E):
//!
//! | Shape | Components | Edges |
//! |-------|------------|-------|
//! | chain | n | n - 1 |
//! | wide | n | n - 1 |
//! | layered | layers x width | (layers - 1) x width² |
//!
//! Plus one full start/stop cycle of a wide system to show executor overhead
//! per component.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use electrician::{resolve_start_order, Component, ComponentValue, System};
use electrician_tests::benchmarks::{chain_system, layered_system, wide_system};
use std::time::Duration;

fn bench_resolve_shapes(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve-start-order");
    group.measurement_time(Duration::from_secs(5));

    for size in [10usize, 100, 1_000, 5_000] {
        group.throughput(Throughput::Elements(size as u64));

        let chain = chain_system(size);
        group.bench_with_input(BenchmarkId::new("chain", size), &chain, |b, definition| {
            b.iter(|| black_box(resolve_start_order(definition).unwrap()))
        });

        let wide = wide_system(size);
        group.bench_with_input(BenchmarkId::new("wide", size), &wide, |b, definition| {
            b.iter(|| black_box(resolve_start_order(definition).unwrap()))
        });
    }

    for (layers, width) in [(5usize, 10usize), (10, 20), (20, 20)] {
        let layered = layered_system(layers, width);
        group.throughput(Throughput::Elements((layers * width) as u64));
        group.bench_with_input(
            BenchmarkId::new("layered", format!("{layers}x{width}")),
            &layered,
            |b, definition| b.iter(|| black_box(resolve_start_order(definition).unwrap())),
        );
    }

    group.finish();
}

fn bench_start_stop_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("start-stop-cycle");
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime");

    for size in [10usize, 100, 1_000] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(BenchmarkId::new("wide", size), |b| {
            b.iter(|| {
                let mut system = (1..size).fold(
                    System::new().with_component(
                        "root",
                        Component::new().with_start(|_| async { Ok(ComponentValue::unit()) }),
                    ),
                    |system, i| {
                        system.with_component(
                            format!("leaf{i}"),
                            Component::new()
                                .depends_on(["root"])
                                .with_start(|_| async { Ok(ComponentValue::unit()) })
                                .with_stop(|| async { Ok(()) }),
                        )
                    },
                );
                runtime.block_on(async {
                    let context = system.start().await.unwrap();
                    system.stop().await.unwrap();
                    black_box(context.len())
                })
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_resolve_shapes, bench_start_stop_cycle);
criterion_main!(benches);

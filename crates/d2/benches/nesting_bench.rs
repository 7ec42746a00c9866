//! Benchmarks for sheet nesting.
//!
//! Measures the engine across strategies and cutlist sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use panelnest_d2::{
    FitHeuristic, GrainDirection, NestingConfig, PackingStrategy, Panel, SheetNester,
};

fn cutlist(n: usize) -> Vec<Panel> {
    (0..n)
        .map(|i| {
            let length = 200.0 + (i as f64 * 137.0) % 900.0;
            let width = 150.0 + (i as f64 * 71.0) % 500.0;
            let material = if i % 3 == 0 { "MDF" } else { "BWP plywood" };
            let grain = if i % 4 == 0 {
                GrainDirection::Length
            } else {
                GrainDirection::None
            };
            Panel::new(format!("P{}", i), length, width, 18.0, material)
                .with_grain(grain)
                .with_quantity(1 + (i % 3) as i32)
        })
        .collect()
}

fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("nester_strategies");
    group.sample_size(20);

    let strategies = [
        PackingStrategy::MaxRects(FitHeuristic::BestAreaFit),
        PackingStrategy::Guillotine(FitHeuristic::BestAreaFit),
        PackingStrategy::Shelf,
    ];

    for &n in &[10, 40, 120] {
        let panels = cutlist(n);
        for strategy in strategies {
            let nester = SheetNester::new(NestingConfig::new().with_strategy(strategy));
            let id = BenchmarkId::new(strategy.name(), n);
            group.bench_with_input(id, &panels, |b, panels| {
                b.iter(|| {
                    let result = nester.nest(black_box(panels), None);
                    black_box(result)
                })
            });
        }
    }
    group.finish();
}

fn bench_parallel_groups(c: &mut Criterion) {
    let panels = cutlist(120);
    let parallel = SheetNester::new(NestingConfig::new().with_parallel(true));
    let sequential = SheetNester::new(NestingConfig::new().with_parallel(false));

    c.bench_function("nester_parallel_groups", |b| {
        b.iter(|| black_box(parallel.nest(black_box(&panels), None)))
    });
    c.bench_function("nester_sequential_groups", |b| {
        b.iter(|| black_box(sequential.nest(black_box(&panels), None)))
    });
}

criterion_group!(benches, bench_strategies, bench_parallel_groups);
criterion_main!(benches);

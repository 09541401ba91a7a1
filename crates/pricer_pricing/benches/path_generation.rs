//! Benchmarks for credit/FX path generation.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_core::types::TimeGrid;
use pricer_models::models::CreditFxParams;
use pricer_pricing::mc::{sample_importance, CreditFxPathGenerator};
use pricer_pricing::rng::PricerRng;

fn benchmark_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_paths");
    let grid = TimeGrid::linspace(0.0, 1.0, 13).unwrap();
    let generator = CreditFxPathGenerator::new(CreditFxParams::default(), grid).unwrap();

    for n_paths in [1_024, 8_192, 65_536] {
        group.bench_with_input(
            BenchmarkId::from_parameter(n_paths),
            &n_paths,
            |b, &n| {
                b.iter(|| {
                    let mut rng = PricerRng::from_seed(42);
                    generator.generate(black_box(n), &mut rng).unwrap()
                })
            },
        );
    }

    group.finish();
}

fn benchmark_grid_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_points");

    for n_points in [13, 53, 253] {
        let grid = TimeGrid::linspace(0.0, 1.0, n_points).unwrap();
        let generator = CreditFxPathGenerator::new(CreditFxParams::default(), grid).unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(n_points),
            &generator,
            |b, g| {
                b.iter(|| {
                    let mut rng = PricerRng::from_seed(7);
                    g.generate(black_box(4_096), &mut rng).unwrap()
                })
            },
        );
    }

    group.finish();
}

fn benchmark_importance_draw(c: &mut Criterion) {
    let survival: Vec<f64> = (0..253).map(|j| (-0.01 * j as f64 / 252.0).exp()).collect();

    c.bench_function("sample_importance_253", |b| {
        b.iter(|| sample_importance(black_box(&survival), black_box(0.3), black_box(0.6)))
    });
}

criterion_group!(
    benches,
    benchmark_generate,
    benchmark_grid_resolution,
    benchmark_importance_draw
);
criterion_main!(benches);

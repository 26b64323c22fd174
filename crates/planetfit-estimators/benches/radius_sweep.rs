//! Benchmarks for sequential and sharded radius sweeps.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use planetfit_core::types::surface_gravity;
use planetfit_estimators::{
    GravityMeasurements, MolarMassEstimator, PressureMeasurements, RadiusMassConfig,
    RadiusMassEstimator, SweepStrategy,
};
use rand::{rngs::StdRng, SeedableRng};
use rand_distr::{Distribution, Normal};

fn noisy_earth(n: usize) -> GravityMeasurements {
    let mut rng = StdRng::seed_from_u64(1);
    let noise = Normal::new(0.0, 1e-4).unwrap();
    let altitudes: Vec<f64> = (0..n).map(|i| i as f64 * 3.0).collect();
    let accelerations: Vec<f64> = altitudes
        .iter()
        .map(|&h| surface_gravity(6.3781e6, 5.97219e24, h) + noise.sample(&mut rng))
        .collect();
    GravityMeasurements::new(&altitudes, &accelerations).unwrap()
}

fn bench_radius_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("radius_sweep");
    group.sample_size(10);

    for &n in &[10, 100, 333] {
        let measurements = noisy_earth(n);

        for (name, strategy) in [
            ("sequential", SweepStrategy::Sequential),
            ("parallel", SweepStrategy::Parallel),
        ] {
            let estimator =
                RadiusMassEstimator::new(RadiusMassConfig::default().with_strategy(strategy));
            group.bench_with_input(BenchmarkId::new(name, n), &n, |b, _| {
                b.iter(|| {
                    let fit = estimator.estimate(&measurements).unwrap();
                    black_box(fit)
                });
            });
        }
    }

    group.finish();
}

fn bench_molar_mass(c: &mut Criterion) {
    let mut group = c.benchmark_group("molar_mass_pairs");

    for &n in &[10, 100, 1000] {
        let altitudes: Vec<f64> = (0..n).map(|i| i as f64 * 10.0).collect();
        let pressures: Vec<f64> = altitudes
            .iter()
            .map(|&h| 101_325.0 * (-1.18e-4 * h).exp())
            .collect();
        let measurements = PressureMeasurements::new(&altitudes, &pressures).unwrap();
        let estimator = MolarMassEstimator::new();

        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| black_box(estimator.estimate(288.15, 9.80665, &measurements).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_radius_sweep, bench_molar_mass);
criterion_main!(benches);

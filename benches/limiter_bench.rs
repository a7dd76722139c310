//! Benchmarks for flux limiters and interface fluxes.
//!
//! Run with: `cargo bench --bench limiter_bench`
//!
//! Benchmarks elementwise limiting and TVD flux evaluation for every
//! registered limiter.

use advect1d::flux::{tvd_flux, tvd_flux_burgers};
use advect1d::mesh::Grid1D;
use advect1d::solver::{FluxLimiter, SlopeLimiter};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

/// Slope pairs with a mix of smooth regions, extrema and fronts.
fn setup_slopes(n: usize) -> (Vec<f64>, Vec<f64>) {
    let u: Vec<f64> = (0..n + 2)
        .map(|i| {
            let x = i as f64 / n as f64;
            let jump = if x > 0.5 { 2.0 } else { 0.0 };
            (20.0 * x).sin() + jump
        })
        .collect();
    let sm = u.windows(2).take(n).map(|w| w[1] - w[0]).collect();
    let sp = u.windows(2).skip(1).take(n).map(|w| w[1] - w[0]).collect();
    (sm, sp)
}

/// Density-like profile with a jump, plus a solar-wind velocity field.
fn setup_fields(n: usize) -> (Grid1D, Vec<f64>, Vec<f64>) {
    let grid = Grid1D::uniform(0.0, 1.5e6, n).unwrap();
    let rho = grid
        .centers()
        .iter()
        .map(|&x| (if x < 7.5e5 { 5.0 } else { 12.0 }) + (x / 5e4).sin())
        .collect();
    let ux = grid
        .centers()
        .iter()
        .map(|&x| -400.0 - 50.0 * (x / 2e5).cos())
        .collect();
    (grid, rho, ux)
}

/// Benchmark elementwise limiting.
fn bench_limit_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("limit_all");
    let (sm, sp) = setup_slopes(10_000);
    let mut out = vec![0.0; sm.len()];

    for limiter in FluxLimiter::ALL {
        group.bench_with_input(BenchmarkId::new("limiter", limiter), &limiter, |b, l| {
            b.iter(|| l.limit_into(black_box(&sm), black_box(&sp), &mut out));
        });
    }

    group.finish();
}

/// Benchmark linear TVD flux evaluation.
fn bench_tvd_flux(c: &mut Criterion) {
    let mut group = c.benchmark_group("tvd_flux");

    for n in [1_000, 10_000] {
        let (grid, rho, ux) = setup_fields(n);
        let mut flux = vec![0.0; n - 3];
        let dt = 0.5 * grid.dx() / 450.0;

        for limiter in [FluxLimiter::Minmod, FluxLimiter::Superbee] {
            let f = limiter.function();
            group.bench_with_input(
                BenchmarkId::new(limiter.name(), format!("{n}_cells")),
                &n,
                |b, _| {
                    b.iter(|| {
                        tvd_flux(
                            black_box(&rho),
                            black_box(&ux),
                            grid.dx(),
                            dt,
                            f,
                            &mut flux,
                        )
                    });
                },
            );
        }
    }

    group.finish();
}

/// Benchmark Burgers flux evaluation.
fn bench_burgers_flux(c: &mut Criterion) {
    let mut group = c.benchmark_group("burgers_flux");

    for n in [1_000, 10_000] {
        let (grid, _, ux) = setup_fields(n);
        let mut flux = vec![0.0; n - 3];
        let dt = 0.5 * grid.dx() / 450.0;
        let f = FluxLimiter::Minmod.function();

        group.bench_with_input(BenchmarkId::new("minmod", format!("{n}_cells")), &n, |b, _| {
            b.iter(|| tvd_flux_burgers(black_box(&ux), grid.dx(), dt, f, &mut flux));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_limit_all, bench_tvd_flux, bench_burgers_flux);
criterion_main!(benches);

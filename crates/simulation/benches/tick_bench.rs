//! Criterion benchmark: one solver tick at several grid sizes.
//!
//! Each scenario loads procedural terrain, scatters deposits and runs a few
//! warm-up ticks so velocities are non-trivial before measuring.
//!
//! Budget: N=128 tick well under 1ms.
//!
//! Run with: cargo bench -p simulation --bench tick_bench

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use simulation::terrain_source::generate_heights;
use simulation::{SimParams, SnowSimulation};

fn prepared_simulation(n: usize) -> SnowSimulation {
    let mut sim = SnowSimulation::new(SimParams::with_grid(n, 200.0)).expect("valid params");
    sim.load_elevation(&generate_heights(n, 42))
        .expect("patch fits");
    for i in (8..n - 8).step_by(8) {
        for j in (8..n - 8).step_by(8) {
            sim.inject_material((i, j), 2.0).expect("finite amount");
        }
    }
    for _ in 0..20 {
        sim.tick();
    }
    sim
}

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("solver_tick");
    for n in [64usize, 128, 256] {
        let mut sim = prepared_simulation(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| sim.tick());
        });
    }
    group.finish();
}

fn bench_inject(c: &mut Criterion) {
    let mut sim = prepared_simulation(128);
    c.bench_function("inject_material_128", |b| {
        b.iter(|| sim.inject_material((64, 64), 0.01).expect("finite amount"));
    });
}

criterion_group!(benches, bench_tick, bench_inject);
criterion_main!(benches);

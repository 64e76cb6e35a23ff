//! Benchmarks for tether simulation steps.

use criterion::{criterion_group, criterion_main, Criterion};
use tether::*;

fn bench_hanging_rope(c: &mut Criterion) {
    c.bench_function("rope_50_nodes_60_steps", |b| {
        b.iter(|| {
            let mut sim: Simulation<f32> = Simulation::new(SimulationConfig::new());
            let nodes = sim.build_grid(Vec2::new(20.0, 20.0), 50, 1, 8.0);
            sim.set_locked(nodes[0], true).unwrap();
            for _ in 0..60 {
                sim.step(1.0 / 60.0);
            }
            sim.positions()
        });
    });
}

fn bench_fabric(c: &mut Criterion) {
    c.bench_function("fabric_37x25_60_steps", |b| {
        b.iter(|| {
            let mut sim: Simulation<f32> = Simulation::new(
                SimulationConfig::new()
                    .with_bounds(Bounds::from_size(1280.0, 720.0))
                    .with_breakage(4.5),
            );
            let nodes = sim.build_grid(Vec2::new(500.0, 100.0), 37, 25, 20.0);
            for &top in &nodes[..37] {
                sim.set_locked(top, true).unwrap();
            }
            for _ in 0..60 {
                sim.step(1.0 / 60.0);
            }
            sim.stick_count()
        });
    });
}

fn bench_hit_testing(c: &mut Criterion) {
    let mut sim: Simulation<f32> = Simulation::new(SimulationConfig::new());
    sim.build_grid(Vec2::new(10.0, 10.0), 40, 40, 12.0);
    c.bench_function("nearest_node_and_stick_1600_nodes", |b| {
        b.iter(|| {
            let p = Vec2::new(250.0, 250.0);
            (sim.nearest_node(p, 20.0), sim.nearest_stick(p, 17.0))
        });
    });
}

criterion_group!(benches, bench_hanging_rope, bench_fabric, bench_hit_testing);
criterion_main!(benches);

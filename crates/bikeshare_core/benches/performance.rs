//! Performance benchmarks for bikeshare_core using Criterion.rs.

use bevy_ecs::prelude::World;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use bikeshare_core::runner::{initialize_simulation, run_to_completion, simulation_schedule};
use bikeshare_core::scenario::{build_scenario, ScenarioParams};

fn bench_replication(c: &mut Criterion) {
    let scenarios = vec![
        ("small", 10, 8, 1_000.0),
        ("medium", 50, 40, 10_000.0),
        ("large", 100, 80, 50_000.0),
    ];

    let mut group = c.benchmark_group("replication");
    for (name, posts, bikes, horizon) in scenarios {
        group.bench_with_input(
            BenchmarkId::from_parameter(name),
            &(posts, bikes, horizon),
            |b, &(posts, bikes, horizon)| {
                b.iter(|| {
                    let mut world = World::new();
                    let params = ScenarioParams::default()
                        .with_capacity(posts, bikes)
                        .with_seed(42);
                    build_scenario(&mut world, params).expect("valid params");
                    initialize_simulation(&mut world, horizon);
                    let mut schedule = simulation_schedule();
                    black_box(run_to_completion(&mut world, &mut schedule, usize::MAX));
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_replication);
criterion_main!(benches);

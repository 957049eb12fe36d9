use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use orrery::catalog::{BootstrapOptions, bootstrap, format_catalog, parse_catalog};
use orrery::config::GeneratorConfig;
use orrery::generator::generate_system;
use orrery::physics::integrators::SemiImplicitEuler;
use orrery::physics::simulation::{PhysicsSettings, UpdateOrder, step};
use orrery::physics::system::StarSystem;
use orrery::resources::SharedRng;
use std::hint::black_box;

fn generated_system(seed: u64, config: &GeneratorConfig) -> StarSystem {
    let mut rng = SharedRng::from_seed(seed);
    let rows = generate_system(config, &mut *rng);
    bootstrap(&rows, &BootstrapOptions::default())
        .map(|result| result.system)
        .unwrap_or_default()
}

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("step");

    for max_planets in [4, 8, 16] {
        let config = GeneratorConfig {
            min_planets: max_planets,
            max_planets,
            moon_probability: 1.0,
            ..Default::default()
        };
        let system = generated_system(42, &config);

        group.throughput(Throughput::Elements(system.len() as u64));
        for order in [UpdateOrder::Simultaneous, UpdateOrder::Sequential] {
            group.bench_with_input(
                BenchmarkId::new(format!("{order:?}"), system.len()),
                &system,
                |b, system| {
                    let mut system = system.clone();
                    let settings = PhysicsSettings::with_timestep(150.0, order);
                    b.iter(|| step(black_box(&mut system), &settings, &SemiImplicitEuler));
                },
            );
        }
    }

    group.finish();
}

fn bench_catalog(c: &mut Criterion) {
    let mut rng = SharedRng::from_seed(7);
    let rows = generate_system(&GeneratorConfig::default(), &mut *rng);
    let text = format_catalog(&rows);

    c.bench_function("catalog/parse_and_bootstrap", |b| {
        b.iter(|| {
            let parsed = parse_catalog(black_box(&text));
            bootstrap(&parsed.rows, &BootstrapOptions::default())
        })
    });
}

criterion_group!(benches, bench_step, bench_catalog);
criterion_main!(benches);

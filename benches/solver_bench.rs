//! Criterion benchmarks for genotype decoding and short GA runs.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use guillotine::board::{Board, CutSpec};
use guillotine::ga::{GaConfig, GeneticAlgorithm};
use guillotine::genotype::Genotype;
use guillotine::layout::LayoutTree;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_spec(nboards: usize, seed: u64) -> CutSpec {
    let mut rng = StdRng::seed_from_u64(seed);
    let boards = (0..nboards)
        .map(|_| Board::new(rng.random_range(1..100), rng.random_range(1..100)))
        .collect();
    CutSpec::new(boards, 0)
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for &n in &[10, 50, 100] {
        let spec = random_spec(n, 42);
        let mut rng = StdRng::seed_from_u64(42);
        let genotype = Genotype::random(n as u16, &mut rng);
        group.bench_with_input(
            BenchmarkId::from_parameter(n),
            &(&spec, &genotype),
            |b, (spec, genotype)| {
                b.iter(|| {
                    let tree = LayoutTree::decode(black_box(spec), black_box(genotype));
                    black_box(tree.area())
                })
            },
        );
    }
    group.finish();
}

fn bench_ga_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("ga_run");
    group.sample_size(10);

    for &n in &[10, 25] {
        let spec = random_spec(n, 42);
        let config = GaConfig::default()
            .with_population_size(30)
            .with_generations(20)
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::from_parameter(n),
            &(&spec, config),
            |b, (spec, config)| {
                b.iter(|| {
                    let ga = GeneticAlgorithm::new(black_box(spec), config.clone()).unwrap();
                    black_box(ga.run().best_fitness)
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_decode, bench_ga_run);
criterion_main!(benches);

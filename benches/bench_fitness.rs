use criterion::{black_box, criterion_group, criterion_main, Criterion};
use queenga::{chromosome::Chromosome, evolution::FitnessEvaluator, rng::RandomNumberGenerator};

fn bench_fitness(c: &mut Criterion) {
    let mut rng = RandomNumberGenerator::from_seed(42);

    let mut group = c.benchmark_group("fitness_batch");
    for n in [8, 16, 32].iter() {
        let population: Vec<Chromosome> =
            (0..1000).map(|_| Chromosome::random(*n, &mut rng)).collect();

        for parallel in [false, true] {
            let label = if parallel { "parallel" } else { "sequential" };
            group.bench_function(&format!("{}_{}_queens", label, n), |b| {
                b.iter(|| {
                    // fresh cache so every chromosome is computed
                    let evaluator = FitnessEvaluator::new(*n, parallel);
                    evaluator.calculate_fitnesses(black_box(&population))
                })
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_fitness);
criterion_main!(benches);

//! Criterion benchmarks for the NRP search engine.
//!
//! Uses randomly generated layered instances to measure flip throughput
//! and the cost of each strategy under a fixed evaluation budget.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;
use nrp_search::constructor::GreedyConstructor;
use nrp_search::fitness::ProfitFitness;
use nrp_search::model::{Project, ProjectBuilder};
use nrp_search::random::create_rng;
use nrp_search::search::{Algorithm, SearchConfig};
use nrp_search::solution::Solution;

// ===========================================================================
// Synthetic instance: requirements in layers, each with at most two
// precedents from lower indices; customers want 1-4 requirements.
// ===========================================================================

fn layered_instance(requirements: usize, customers: usize) -> Project {
    let mut rng = create_rng(7);
    let mut b = ProjectBuilder::new(format!("bench-{requirements}x{customers}"));

    for r in 0..requirements {
        let cost = rng.random_range(1..=20);
        b.add_requirement(cost);
        b.set_requirement_cost_estimates(r, cost as f64 * 0.8, cost as f64 * 1.5);
        for _ in 0..rng.random_range(0..=2usize) {
            if r > 0 {
                b.add_precedence(rng.random_range(0..r), r);
            }
        }
    }

    for _ in 0..customers {
        let wanted: Vec<usize> = (0..rng.random_range(1..=4usize))
            .map(|_| rng.random_range(0..requirements))
            .collect();
        b.add_customer(rng.random_range(1..=60), wanted);
    }

    b.build().expect("acyclic by construction")
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_flip(c: &mut Criterion) {
    let mut group = c.benchmark_group("flip_customer");

    for &(nr, nc) in &[(100usize, 100usize), (500, 1_000), (2_000, 5_000)] {
        let project = layered_instance(nr, nc);
        let mut rng = create_rng(1);
        let flips: Vec<usize> = (0..1_000).map(|_| rng.random_range(0..nc)).collect();

        group.bench_with_input(
            BenchmarkId::new(format!("r{nr}_c{nc}"), nc),
            &(project, flips),
            |b, (p, flips)| {
                let mut solution = Solution::new(p);
                b.iter(|| {
                    for &customer in flips {
                        solution.flip_customer(black_box(customer));
                    }
                    black_box(solution.cost())
                })
            },
        );
    }
    group.finish();
}

fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("strategies");
    group.sample_size(10);

    let project = layered_instance(300, 500);
    let constructor = GreedyConstructor::new(&project);
    let fitness = ProfitFitness::new(project.total_cost() as f64 * 0.3);
    let config = SearchConfig::default()
        .with_max_evaluations(50_000)
        .with_seed(42);

    for algorithm in Algorithm::ALL {
        group.bench_with_input(
            BenchmarkId::from_parameter(algorithm),
            &algorithm,
            |b, &algorithm| {
                b.iter(|| {
                    let result = algorithm.run(
                        black_box(&project),
                        &constructor,
                        &fitness,
                        black_box(&config),
                    );
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_flip, bench_strategies);
criterion_main!(benches);

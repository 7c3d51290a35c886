//! Iterated local search (ILS).
//!
//! # Algorithm
//!
//! 1. Construct a solution and climb to an incumbent local optimum
//! 2. While budget remains:
//!    a. **Perturbation**: flip `perturbation_size` distinct random
//!    customers of a copy of the incumbent
//!    b. **Local search**: climb from the perturbed copy
//!    c. **Acceptance**: replace the incumbent only if strictly better
//! 3. Return the best solution found

use rand::seq::index;
use tracing::info;

use super::config::SearchConfig;
use super::engine::SearchEngine;
use super::types::{FlipPolicy, SearchAlgorithm, Unconstrained};
use crate::constructor::Constructor;
use crate::fitness::FitnessCalculator;
use crate::model::Project;
use crate::random::{create_rng, SearchRng};
use crate::solution::Solution;

/// Iterated local search with better-only acceptance.
pub struct IteratedLocalSearch<'p, C: Constructor> {
    engine: SearchEngine<'p>,
    constructor: C,
    rng: SearchRng,
    perturbation_size: usize,
    history: Vec<f64>,
}

impl<'p, C: Constructor> IteratedLocalSearch<'p, C> {
    /// # Panics
    ///
    /// Panics if `config` fails validation.
    pub fn new(project: &'p Project, constructor: C, config: &SearchConfig) -> Self {
        config.validate().expect("invalid SearchConfig");
        let mut rng = create_rng(config.seed());
        let engine = SearchEngine::new(
            project,
            config.max_evaluations,
            config.progress_interval,
            &mut rng,
        );
        Self {
            engine,
            constructor,
            rng,
            perturbation_size: config.perturbation_size,
            history: Vec::new(),
        }
    }
}

impl<C: Constructor> SearchAlgorithm for IteratedLocalSearch<'_, C> {
    fn name(&self) -> &'static str {
        "ILS"
    }

    fn execute<F: FitnessCalculator>(&mut self, calculator: &F) -> Vec<bool> {
        info!(
            algorithm = self.name(),
            fitness = calculator.name(),
            customers = self.engine.project().customer_count(),
            max_evaluations = self.engine.max_evaluations(),
            "search started"
        );

        let start = self.constructor.generate_solution(&mut self.rng);
        let incumbent = self.engine.load(&start);
        let k = self.perturbation_size;
        iterate(
            &mut self.engine,
            incumbent,
            calculator,
            &Unconstrained,
            &mut self.rng,
            &mut self.history,
            |solution, rng| perturb_distinct(solution, k, rng),
        );

        info!(
            algorithm = self.name(),
            best_fitness = self.engine.best_fitness(),
            evaluations = self.engine.evaluations(),
            rounds = self.history.len(),
            "search finished"
        );
        self.engine.best_selection().to_vec()
    }

    fn best(&self) -> &[bool] {
        self.engine.best_selection()
    }

    fn fitness(&self) -> f64 {
        self.engine.best_fitness()
    }

    fn iteration_best_found(&self) -> u64 {
        self.engine.best_evaluation()
    }

    fn evaluations_consumed(&self) -> u64 {
        self.engine.evaluations()
    }

    fn iterations(&self) -> usize {
        self.history.len()
    }

    fn history(&self) -> &[f64] {
        &self.history
    }
}

/// Perturb-climb-accept loop shared by ILS and VISILS.
///
/// Climbs `incumbent` first, then iterates until the budget runs out,
/// pushing the incumbent fitness to `history` after the initial climb
/// and after every round.
pub(super) fn iterate<'p, F, P, M>(
    engine: &mut SearchEngine<'p>,
    mut incumbent: Solution<'p>,
    calculator: &F,
    policy: &P,
    rng: &mut SearchRng,
    history: &mut Vec<f64>,
    mut perturb: M,
) -> Solution<'p>
where
    F: FitnessCalculator,
    P: FlipPolicy,
    M: FnMut(&mut Solution<'p>, &mut SearchRng),
{
    let (mut incumbent_fitness, mut status) =
        engine.local_search(&mut incumbent, calculator, policy);
    history.push(incumbent_fitness);

    while !status.is_exhausted() {
        let mut candidate = incumbent.clone();
        perturb(&mut candidate, rng);

        let (fitness, next) = engine.local_search(&mut candidate, calculator, policy);
        status = next;
        if fitness > incumbent_fitness {
            incumbent = candidate;
            incumbent_fitness = fitness;
        }
        history.push(incumbent_fitness);
    }
    incumbent
}

/// Flips `count` distinct uniformly chosen customers.
fn perturb_distinct(solution: &mut Solution<'_>, count: usize, rng: &mut SearchRng) {
    let n = solution.customer_count();
    for customer in index::sample(rng, n, count.min(n)) {
        solution.flip_customer(customer);
    }
}

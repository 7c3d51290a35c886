//! Sampling-guided iterated local search (VISILS).
//!
//! # Algorithm
//!
//! 1. **Sampling**: for each customer count `k` in `1..=n`, evaluate
//!    `sample_size` constructed solutions of exactly `k` customers; the
//!    smallest `k` reaching the best sampled fitness becomes
//!    `min_customers`
//! 2. Construct a start with between `min_customers` and `n` customers
//! 3. Run ILS in which no move may leave fewer than `min_customers`
//!    customers attended

use rand::Rng;
use tracing::{debug, info};

use super::config::SearchConfig;
use super::engine::SearchEngine;
use super::ils::iterate;
use super::types::{MinCustomers, SearchAlgorithm, SearchResult};
use crate::constructor::Constructor;
use crate::fitness::FitnessCalculator;
use crate::model::Project;
use crate::random::{create_rng, SearchRng};
use crate::solution::Solution;

/// ILS with a customer-count floor learned by sampling.
pub struct SamplingGuidedIls<'p, C: Constructor> {
    engine: SearchEngine<'p>,
    constructor: C,
    rng: SearchRng,
    sample_size: usize,
    perturbation_size: usize,
    min_customers: Option<usize>,
    history: Vec<f64>,
}

impl<'p, C: Constructor> SamplingGuidedIls<'p, C> {
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
            sample_size: config.sample_size,
            perturbation_size: config.perturbation_size,
            min_customers: None,
            history: Vec::new(),
        }
    }

    /// Customer floor fixed by the sampling phase, `None` before
    /// [`execute`](SearchAlgorithm::execute) or if the budget ran out
    /// before any sample was evaluated.
    pub fn min_customers(&self) -> Option<usize> {
        self.min_customers
    }

    fn sample<F: FitnessCalculator>(&mut self, calculator: &F) -> Option<usize> {
        let n = self.engine.project().customer_count();
        let mut solution = self.engine.new_solution();
        let mut best: Option<(f64, usize)> = None;

        'counts: for count in 1..=n {
            for _ in 0..self.sample_size {
                let selection = self.constructor.generate_solution_with(count, &mut self.rng);
                solution.set_all_customers(&selection);
                let Some(fitness) = self.engine.evaluate(calculator, &solution) else {
                    break 'counts;
                };
                self.engine.update_best(&solution, fitness);
                if best.map_or(true, |(f, _)| fitness > f) {
                    best = Some((fitness, count));
                }
            }
        }

        best.map(|(fitness, count)| {
            debug!(min_customers = count, fitness, "minimum customer count fixed");
            count
        })
    }
}

impl<C: Constructor> SearchAlgorithm for SamplingGuidedIls<'_, C> {
    fn name(&self) -> &'static str {
        "VISILS"
    }

    fn execute<F: FitnessCalculator>(&mut self, calculator: &F) -> Vec<bool> {
        let n = self.engine.project().customer_count();
        info!(
            algorithm = self.name(),
            fitness = calculator.name(),
            customers = n,
            max_evaluations = self.engine.max_evaluations(),
            sample_size = self.sample_size,
            "search started"
        );

        self.min_customers = self.sample(calculator);

        if let Some(floor) = self.min_customers.filter(|_| !self.engine.is_exhausted()) {
            let start = self
                .constructor
                .generate_solution_in_interval(floor, n, &mut self.rng);
            let incumbent = self.engine.load(&start);
            let k = self.perturbation_size;
            iterate(
                &mut self.engine,
                incumbent,
                calculator,
                &MinCustomers(floor),
                &mut self.rng,
                &mut self.history,
                |solution, rng| perturb_above_floor(solution, floor, k, rng),
            );
        }

        info!(
            algorithm = self.name(),
            best_fitness = self.engine.best_fitness(),
            evaluations = self.engine.evaluations(),
            min_customers = ?self.min_customers,
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

    fn result(&self) -> SearchResult {
        SearchResult {
            best: self.best().to_vec(),
            best_fitness: self.fitness(),
            evaluations: self.evaluations_consumed(),
            best_evaluation: self.iteration_best_found(),
            iterations: self.iterations(),
            history: self.history.clone(),
            min_customers: self.min_customers,
            best_restart: None,
        }
    }
}

/// Adds or removes `count` random customers without dropping below
/// `floor` attended. Both moves are equally likely when legal.
fn perturb_above_floor(
    solution: &mut Solution<'_>,
    floor: usize,
    count: usize,
    rng: &mut SearchRng,
) {
    let n = solution.customer_count();
    for _ in 0..count {
        let attended = solution.count_attended_customers();
        let can_add = attended < n;
        let can_remove = attended > floor;

        let add = match (can_add, can_remove) {
            (true, true) => rng.random_bool(0.5),
            (true, false) => true,
            (false, true) => false,
            (false, false) => return,
        };

        // pick uniformly among customers in the wanted state
        let pool = if add { n - attended } else { attended };
        let rank = rng.random_range(0..pool);
        let customer = (0..n)
            .filter(|&c| solution.is_customer_attended(c) != add)
            .nth(rank);
        if let Some(customer) = customer {
            solution.flip_customer(customer);
        }
    }
}

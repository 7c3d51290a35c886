//! Shared search types: visit status, flip policies, results and the
//! strategy trait.

use crate::fitness::FitnessCalculator;
use crate::solution::Solution;

/// Outcome of one neighborhood visit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NeighborhoodStatus {
    /// A strictly better solution was reached (carries its fitness). The
    /// improving flip is left applied.
    FoundBetterNeighbor(f64),
    /// The scan finished without improvement (carries the starting
    /// fitness). The solution is unchanged.
    NoBetterNeighbor(f64),
    /// The evaluation budget ran out. Any in-flight flip was reverted.
    SearchExhausted,
}

impl NeighborhoodStatus {
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::SearchExhausted)
    }
}

/// Decides which single-customer flips a neighborhood scan may try.
pub trait FlipPolicy {
    fn allows_flip(&self, solution: &Solution<'_>, customer: usize) -> bool;
}

/// Every flip is legal.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unconstrained;

impl FlipPolicy for Unconstrained {
    #[inline]
    fn allows_flip(&self, _solution: &Solution<'_>, _customer: usize) -> bool {
        true
    }
}

/// Forbids deselecting a customer when that would leave fewer than
/// `min` customers attended.
#[derive(Debug, Clone, Copy)]
pub struct MinCustomers(pub usize);

impl FlipPolicy for MinCustomers {
    #[inline]
    fn allows_flip(&self, solution: &Solution<'_>, customer: usize) -> bool {
        !solution.is_customer_attended(customer) || solution.count_attended_customers() > self.0
    }
}

/// Result of a search run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResult {
    /// Best customer selection found.
    pub best: Vec<bool>,
    /// Fitness of the best selection.
    pub best_fitness: f64,
    /// Evaluations consumed, including the one that hit the budget.
    pub evaluations: u64,
    /// Evaluation index at which the best selection was found.
    pub best_evaluation: u64,
    /// Outer iterations: restarts for HC, perturbation rounds for ILS
    /// and VISILS.
    pub iterations: usize,
    /// Best (HC) or incumbent (ILS, VISILS) fitness after each outer
    /// iteration.
    pub history: Vec<f64>,
    /// Customer floor fixed by the VISILS sampling phase.
    pub min_customers: Option<usize>,
    /// Restart on which HC found its best, counting the first climb as 0.
    pub best_restart: Option<usize>,
}

impl SearchResult {
    /// Number of attended customers in the best selection.
    pub fn attended(&self) -> usize {
        self.best.iter().filter(|&&s| s).count()
    }
}

/// A search strategy bound to one project and one random stream.
pub trait SearchAlgorithm {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Runs the search to budget exhaustion and returns the best
    /// selection found.
    fn execute<F: FitnessCalculator>(&mut self, calculator: &F) -> Vec<bool>;

    /// Best selection found so far.
    fn best(&self) -> &[bool];

    /// Fitness of [`best`](Self::best).
    fn fitness(&self) -> f64;

    /// Evaluation index at which the best was found.
    fn iteration_best_found(&self) -> u64;

    fn evaluations_consumed(&self) -> u64;

    fn iterations(&self) -> usize;

    fn history(&self) -> &[f64];

    /// Snapshot of the run as a [`SearchResult`].
    fn result(&self) -> SearchResult {
        SearchResult {
            best: self.best().to_vec(),
            best_fitness: self.fitness(),
            evaluations: self.evaluations_consumed(),
            best_evaluation: self.iteration_best_found(),
            iterations: self.iterations(),
            history: self.history().to_vec(),
            min_customers: None,
            best_restart: None,
        }
    }
}

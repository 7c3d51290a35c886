//! Evaluation-counted neighborhood exploration shared by all strategies.
//!
//! # Neighborhood visit (first improvement)
//!
//! 1. Evaluate the current solution (`starting`)
//! 2. If `starting` beats the global best, report it without scanning
//! 3. Otherwise, for each customer in the selection order that the flip
//!    policy allows: flip, evaluate, keep the flip if strictly better
//!    than `starting`, else revert
//! 4. A full scan without improvement is a local optimum
//!
//! The evaluation that exceeds the budget reports exhaustion; a flip in
//! flight at that point is reverted.

use std::sync::Arc;

use rand::Rng;
use tracing::{debug, trace};

use super::types::{FlipPolicy, NeighborhoodStatus};
use crate::fitness::FitnessCalculator;
use crate::model::Project;
use crate::random::{is_permutation, random_permutation};
use crate::solution::{ClosureTable, Solution};

/// Evaluation counter, global best tracker and neighborhood visitor for
/// one algorithm instance.
#[derive(Debug, Clone)]
pub struct SearchEngine<'p> {
    project: &'p Project,
    closure: Arc<ClosureTable>,
    order: Vec<usize>,
    max_evaluations: u64,
    progress_interval: u64,
    evaluations: u64,
    best_fitness: f64,
    best_selection: Vec<bool>,
    best_evaluation: u64,
}

impl<'p> SearchEngine<'p> {
    /// Creates an engine with a fresh selection order drawn from `rng`.
    ///
    /// # Panics
    ///
    /// Panics if the drawn order is not a permutation of the customers.
    pub fn new<R: Rng + ?Sized>(
        project: &'p Project,
        max_evaluations: u64,
        progress_interval: u64,
        rng: &mut R,
    ) -> Self {
        let n = project.customer_count();
        let order = random_permutation(n, rng);
        assert!(
            is_permutation(&order),
            "selection order must be a permutation of the customers"
        );

        Self {
            project,
            closure: Arc::new(ClosureTable::new(project)),
            order,
            max_evaluations,
            progress_interval,
            evaluations: 0,
            best_fitness: f64::NEG_INFINITY,
            best_selection: vec![false; n],
            best_evaluation: 0,
        }
    }

    pub fn project(&self) -> &'p Project {
        self.project
    }

    /// Order in which neighborhood scans try customers.
    pub fn selection_order(&self) -> &[usize] {
        &self.order
    }

    /// An empty solution sharing this engine's closure table.
    pub fn new_solution(&self) -> Solution<'p> {
        Solution::with_closure(self.project, Arc::clone(&self.closure))
    }

    /// A solution loaded with `selection`.
    pub fn load(&self, selection: &[bool]) -> Solution<'p> {
        let mut solution = self.new_solution();
        solution.set_all_customers(selection);
        solution
    }

    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }

    pub fn max_evaluations(&self) -> u64 {
        self.max_evaluations
    }

    /// `true` once an evaluation has exceeded the budget.
    pub fn is_exhausted(&self) -> bool {
        self.evaluations > self.max_evaluations
    }

    pub fn best_fitness(&self) -> f64 {
        self.best_fitness
    }

    pub fn best_selection(&self) -> &[bool] {
        &self.best_selection
    }

    /// Evaluation index at which the global best was recorded.
    pub fn best_evaluation(&self) -> u64 {
        self.best_evaluation
    }

    /// Counts and performs one evaluation. Returns `None` when this
    /// evaluation exceeds the budget; once exhausted no further
    /// evaluations are counted.
    pub fn evaluate<F: FitnessCalculator>(
        &mut self,
        calculator: &F,
        solution: &Solution<'_>,
    ) -> Option<f64> {
        if self.is_exhausted() {
            return None;
        }
        self.evaluations += 1;
        if self.is_exhausted() {
            return None;
        }

        let fitness = calculator.evaluate(solution);
        if self.progress_interval > 0 && self.evaluations % self.progress_interval == 0 {
            trace!(
                evaluations = self.evaluations,
                best_fitness = self.best_fitness,
                "progress"
            );
        }
        Some(fitness)
    }

    /// Records `solution` as the global best if `fitness` beats it.
    pub fn update_best(&mut self, solution: &Solution<'_>, fitness: f64) -> bool {
        if fitness > self.best_fitness {
            self.best_fitness = fitness;
            self.best_selection.copy_from_slice(solution.selection());
            self.best_evaluation = self.evaluations;
            debug!(
                fitness,
                evaluation = self.evaluations,
                attended = solution.count_attended_customers(),
                "new best"
            );
            true
        } else {
            false
        }
    }

    /// Explores the single-flip neighborhood of `solution`.
    pub fn visit_neighbors<F, P>(
        &mut self,
        solution: &mut Solution<'_>,
        calculator: &F,
        policy: &P,
    ) -> NeighborhoodStatus
    where
        F: FitnessCalculator,
        P: FlipPolicy,
    {
        let Some(starting) = self.evaluate(calculator, solution) else {
            return NeighborhoodStatus::SearchExhausted;
        };
        if starting > self.best_fitness {
            return NeighborhoodStatus::FoundBetterNeighbor(starting);
        }

        for i in 0..self.order.len() {
            let customer = self.order[i];
            if !policy.allows_flip(solution, customer) {
                continue;
            }

            solution.flip_customer(customer);
            match self.evaluate(calculator, solution) {
                None => {
                    solution.flip_customer(customer);
                    return NeighborhoodStatus::SearchExhausted;
                }
                Some(fitness) if fitness > starting => {
                    return NeighborhoodStatus::FoundBetterNeighbor(fitness);
                }
                Some(_) => solution.flip_customer(customer),
            }
        }

        NeighborhoodStatus::NoBetterNeighbor(starting)
    }

    /// Climbs from `solution` until a local optimum or budget exhaustion.
    ///
    /// Returns the fitness of the final `solution` (negative infinity if
    /// the budget ran out before it was ever evaluated) and the terminal
    /// status, which is never `FoundBetterNeighbor`.
    pub fn local_search<F, P>(
        &mut self,
        solution: &mut Solution<'_>,
        calculator: &F,
        policy: &P,
    ) -> (f64, NeighborhoodStatus)
    where
        F: FitnessCalculator,
        P: FlipPolicy,
    {
        let mut fitness = f64::NEG_INFINITY;
        loop {
            match self.visit_neighbors(solution, calculator, policy) {
                NeighborhoodStatus::FoundBetterNeighbor(f) => {
                    fitness = f;
                    self.update_best(solution, f);
                }
                status @ NeighborhoodStatus::NoBetterNeighbor(f) => return (f, status),
                NeighborhoodStatus::SearchExhausted => {
                    return (fitness, NeighborhoodStatus::SearchExhausted)
                }
            }
        }
    }
}

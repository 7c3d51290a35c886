//! Plain profit objective.

use super::types::{is_feasible, FitnessCalculator};
use crate::solution::Solution;

/// `profit` when `cost <= budget`, otherwise `-cost`.
#[derive(Debug, Clone, Copy)]
pub struct ProfitFitness {
    budget: f64,
}

impl ProfitFitness {
    pub fn new(budget: f64) -> Self {
        Self { budget }
    }

    pub fn budget(&self) -> f64 {
        self.budget
    }
}

impl FitnessCalculator for ProfitFitness {
    #[inline]
    fn evaluate(&self, solution: &Solution<'_>) -> f64 {
        if is_feasible(solution, self.budget) {
            solution.profit() as f64
        } else {
            -(solution.cost() as f64)
        }
    }

    fn name(&self) -> &'static str {
        "profit"
    }
}

//! Profit under a cap on worst-case cost exposure.

use super::types::{is_feasible, FitnessCalculator};
use crate::solution::Solution;

/// `profit` for feasible solutions whose relative worst-case overrun
/// `(worst_cost - cost) / cost` stays within `risk_importance / 100`;
/// `-cost` for everything else.
#[derive(Debug, Clone, Copy)]
pub struct CostCapFitness {
    budget: f64,
    max_overrun: f64,
}

impl CostCapFitness {
    /// `risk_importance` is the tolerated overrun as a percentage.
    pub fn new(budget: f64, risk_importance: u32) -> Self {
        Self {
            budget,
            max_overrun: f64::from(risk_importance) / 100.0,
        }
    }

    pub fn max_overrun(&self) -> f64 {
        self.max_overrun
    }
}

impl FitnessCalculator for CostCapFitness {
    fn evaluate(&self, solution: &Solution<'_>) -> f64 {
        let cost = solution.cost() as f64;
        if !is_feasible(solution, self.budget) {
            return -cost;
        }

        let worst_cost = solution.worst_cost();
        let overrun = if worst_cost <= cost {
            0.0
        } else if cost > 0.0 {
            (worst_cost - cost) / cost
        } else {
            // free release with a positive worst case
            f64::INFINITY
        };

        if overrun > self.max_overrun {
            -cost
        } else {
            solution.profit() as f64
        }
    }

    fn name(&self) -> &'static str {
        "cost-cap"
    }
}

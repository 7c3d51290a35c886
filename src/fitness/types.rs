//! Core trait for fitness calculators.

use crate::solution::Solution;

/// Maps a solution to a scalar fitness. Higher is better.
///
/// Calculators capture the available budget and any risk parameters at
/// construction, so every search strategy evaluates solutions the same
/// way. Infeasible solutions (cost above budget) are never rejected;
/// they score below every feasible one so that strict `>` comparisons
/// steer the search back to feasibility.
pub trait FitnessCalculator: Send + Sync {
    /// Computes the fitness of a solution.
    fn evaluate(&self, solution: &Solution<'_>) -> f64;

    /// Short identifier used in log events.
    fn name(&self) -> &'static str;
}

impl<F: FitnessCalculator + ?Sized> FitnessCalculator for &F {
    fn evaluate(&self, solution: &Solution<'_>) -> f64 {
        (**self).evaluate(solution)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<F: FitnessCalculator + ?Sized> FitnessCalculator for Box<F> {
    fn evaluate(&self, solution: &Solution<'_>) -> f64 {
        (**self).evaluate(solution)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Whether a solution's cost fits in the budget.
#[inline]
pub(crate) fn is_feasible(solution: &Solution<'_>, budget: f64) -> bool {
    solution.cost() as f64 <= budget
}

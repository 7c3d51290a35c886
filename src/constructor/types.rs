//! Core trait for initial-solution constructors.

use rand::Rng;

use crate::random::rand_int;

/// Produces customer-selection bit vectors used as search seeds.
///
/// All draws come from the caller's random stream so that a run is
/// reproducible from its seed.
pub trait Constructor: Send + Sync {
    /// Length of the produced selections.
    fn customer_count(&self) -> usize;

    /// Generates a selection with no constraint on its size.
    fn generate_solution<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<bool>;

    /// Generates a selection with exactly `count` attended customers
    /// (capped at the customer count).
    fn generate_solution_with<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<bool>;

    /// Generates a selection whose attended count is drawn uniformly
    /// from `[min, max]`.
    fn generate_solution_in_interval<R: Rng + ?Sized>(
        &self,
        min: usize,
        max: usize,
        rng: &mut R,
    ) -> Vec<bool> {
        let max = max.min(self.customer_count());
        let count = rand_int(rng, min.min(max), max);
        self.generate_solution_with(count, rng)
    }
}

impl<C: Constructor> Constructor for &C {
    fn customer_count(&self) -> usize {
        (**self).customer_count()
    }

    fn generate_solution<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<bool> {
        (**self).generate_solution(rng)
    }

    fn generate_solution_with<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<bool> {
        (**self).generate_solution_with(count, rng)
    }

    fn generate_solution_in_interval<R: Rng + ?Sized>(
        &self,
        min: usize,
        max: usize,
        rng: &mut R,
    ) -> Vec<bool> {
        (**self).generate_solution_in_interval(min, max, rng)
    }
}

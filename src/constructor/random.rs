//! Uniform random constructor.

use rand::Rng;

use super::types::Constructor;
use crate::model::Project;

/// Draws selections uniformly at random.
///
/// Unconstrained selections attend each customer with probability ½;
/// fixed-size selections pick `count` distinct customers uniformly.
#[derive(Debug, Clone)]
pub struct RandomConstructor {
    customer_count: usize,
}

impl RandomConstructor {
    pub fn new(project: &Project) -> Self {
        Self {
            customer_count: project.customer_count(),
        }
    }
}

impl Constructor for RandomConstructor {
    fn customer_count(&self) -> usize {
        self.customer_count
    }

    fn generate_solution<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<bool> {
        (0..self.customer_count)
            .map(|_| rng.random::<f64>() >= 0.5)
            .collect()
    }

    fn generate_solution_with<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<bool> {
        let n = self.customer_count;
        let count = count.min(n);
        let mut pool: Vec<usize> = (0..n).collect();
        let mut solution = vec![false; n];

        // partial Fisher-Yates: the first `count` slots become the sample
        for i in 0..count {
            let j = rng.random_range(i..n);
            pool.swap(i, j);
            solution[pool[i]] = true;
        }
        solution
    }
}

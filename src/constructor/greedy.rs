//! Profit/cost weighted constructor.

use rand::Rng;

use super::types::Constructor;
use crate::model::Project;
use crate::random::rand_int;

/// Weight floor so that customers with zero profit stay selectable.
const MIN_WEIGHT: f64 = 1e-9;

/// Samples customers with probability proportional to
/// `profit / cost(closure)`, without replacement.
///
/// The cost of a customer is the cost of its full requirement closure
/// when attended alone. Customers whose closure is free weigh their raw
/// profit.
#[derive(Debug, Clone)]
pub struct GreedyConstructor {
    weights: Vec<f64>,
}

impl GreedyConstructor {
    pub fn new(project: &Project) -> Self {
        let n = project.customer_count();
        let mut selection = vec![false; n];
        let weights = (0..n)
            .map(|customer| {
                selection[customer] = true;
                let cost = project.calculate_cost(&selection) as f64;
                selection[customer] = false;

                let profit = project.customer_profit(customer) as f64;
                let ratio = if cost > 0.0 { profit / cost } else { profit };
                ratio.max(MIN_WEIGHT)
            })
            .collect();
        Self { weights }
    }

    /// Selection weight of each customer.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }
}

impl Constructor for GreedyConstructor {
    fn customer_count(&self) -> usize {
        self.weights.len()
    }

    fn generate_solution<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<bool> {
        let count = rand_int(rng, 1, self.weights.len());
        self.generate_solution_with(count, rng)
    }

    fn generate_solution_with<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<bool> {
        let n = self.weights.len();
        let count = count.min(n);
        let mut solution = vec![false; n];
        let mut pool: Vec<usize> = (0..n).collect();

        for _ in 0..count {
            let slot = roulette(&pool, &self.weights, rng);
            let customer = pool.swap_remove(slot);
            solution[customer] = true;
        }
        solution
    }
}

/// Picks a slot of `pool` with probability proportional to its weight.
fn roulette<R: Rng + ?Sized>(pool: &[usize], weights: &[f64], rng: &mut R) -> usize {
    debug_assert!(!pool.is_empty());
    let total: f64 = pool.iter().map(|&c| weights[c]).sum();
    if total <= 0.0 || !total.is_finite() {
        return rng.random_range(0..pool.len());
    }

    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (slot, &c) in pool.iter().enumerate() {
        cumulative += weights[c];
        if cumulative > threshold {
            return slot;
        }
    }

    pool.len() - 1 // floating-point fallback
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProjectBuilder;
    use crate::random::create_rng;

    /// c0 ratio 10, c1 ratio 1, c2 ratio 0 (free but unprofitable).
    fn project() -> Project {
        let mut b = ProjectBuilder::new("greedy");
        let r0 = b.add_requirement(2);
        let r1 = b.add_requirement(20);
        b.add_customer(20, [r0]);
        b.add_customer(20, [r1]);
        b.add_customer(0, Vec::new());
        b.build().unwrap()
    }

    fn attended(selection: &[bool]) -> usize {
        selection.iter().filter(|&&s| s).count()
    }

    #[test]
    fn test_weights_are_profit_over_closure_cost() {
        let ctor = GreedyConstructor::new(&project());
        assert!((ctor.weights()[0] - 10.0).abs() < 1e-12);
        assert!((ctor.weights()[1] - 1.0).abs() < 1e-12);
        assert_eq!(ctor.weights()[2], MIN_WEIGHT);
    }

    #[test]
    fn test_weights_include_precedent_cost() {
        let mut b = ProjectBuilder::new("prec");
        let r0 = b.add_requirement(5);
        let r1 = b.add_requirement(15);
        b.add_precedence(r1, r0);
        b.add_customer(40, [r0]);
        let ctor = GreedyConstructor::new(&b.build().unwrap());
        assert!((ctor.weights()[0] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_favors_high_ratio() {
        let ctor = GreedyConstructor::new(&project());
        let mut rng = create_rng(42);
        let mut counts = [0u32; 3];
        for _ in 0..5000 {
            let sel = ctor.generate_solution_with(1, &mut rng);
            for (c, &s) in sel.iter().enumerate() {
                counts[c] += s as u32;
            }
        }
        assert!(counts[0] > counts[1] * 5, "counts {counts:?}");
        assert!(counts[1] > counts[2], "counts {counts:?}");
    }

    #[test]
    fn test_exact_count_without_replacement() {
        let ctor = GreedyConstructor::new(&project());
        let mut rng = create_rng(7);
        for k in 0..=3 {
            assert_eq!(attended(&ctor.generate_solution_with(k, &mut rng)), k);
        }
        assert_eq!(attended(&ctor.generate_solution_with(10, &mut rng)), 3);
    }

    #[test]
    fn test_unconstrained_attends_at_least_one() {
        let ctor = GreedyConstructor::new(&project());
        let mut rng = create_rng(9);
        for _ in 0..100 {
            let n = attended(&ctor.generate_solution(&mut rng));
            assert!((1..=3).contains(&n));
        }
    }

    #[test]
    fn test_interval() {
        let ctor = GreedyConstructor::new(&project());
        let mut rng = create_rng(11);
        for _ in 0..100 {
            let n = attended(&ctor.generate_solution_in_interval(2, 3, &mut rng));
            assert!((2..=3).contains(&n));
        }
    }
}

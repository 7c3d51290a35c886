//! Incrementally maintained solution state.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::closure::ClosureTable;
use super::selection::format_selection;
use crate::model::Project;

/// A customer selection together with the aggregates it induces.
///
/// `coverage[r]` counts the selected customers whose closure contains
/// requirement `r`; a requirement contributes its cost, cost risk and
/// worst-case cost exactly while its coverage is positive. Profit and
/// profit risk are summed directly over selected customers.
///
/// [`flip_customer`](Self::flip_customer) updates everything in
/// O(closure size) without allocating. Cloning copies the mutable
/// arrays and shares the closure table.
#[derive(Debug, Clone)]
pub struct Solution<'p> {
    project: &'p Project,
    closure: Arc<ClosureTable>,
    selected: Vec<bool>,
    coverage: Vec<u32>,
    attended: usize,
    covered: usize,
    cost: i64,
    profit: i64,
    cost_risk: f64,
    profit_risk: f64,
    worst_cost: f64,
}

impl<'p> Solution<'p> {
    /// Creates an empty solution, building the closure table.
    pub fn new(project: &'p Project) -> Self {
        Self::with_closure(project, Arc::new(ClosureTable::new(project)))
    }

    /// Creates an empty solution sharing an existing closure table.
    pub fn with_closure(project: &'p Project, closure: Arc<ClosureTable>) -> Self {
        debug_assert_eq!(closure.customer_count(), project.customer_count());
        Self {
            project,
            closure,
            selected: vec![false; project.customer_count()],
            coverage: vec![0; project.requirement_count()],
            attended: 0,
            covered: 0,
            cost: 0,
            profit: 0,
            cost_risk: 0.0,
            profit_risk: 0.0,
            worst_cost: 0.0,
        }
    }

    /// Replaces the whole selection and recomputes every aggregate.
    ///
    /// # Panics
    ///
    /// Panics if `selection.len()` differs from the customer count.
    pub fn set_all_customers(&mut self, selection: &[bool]) {
        assert_eq!(
            selection.len(),
            self.selected.len(),
            "selection length must equal the customer count"
        );

        self.selected.copy_from_slice(selection);
        self.coverage.fill(0);
        self.covered = 0;
        self.cost = 0;
        self.cost_risk = 0.0;
        self.worst_cost = 0.0;
        self.profit = 0;
        self.profit_risk = 0.0;
        self.attended = 0;

        for customer in 0..self.selected.len() {
            if self.selected[customer] {
                self.add_closure(customer);
                self.profit += self.project.customer_profit(customer);
                self.profit_risk += self.project.customer_profit_risk(customer);
                self.attended += 1;
            }
        }
    }

    /// Toggles the presence of `customer` in the solution.
    #[inline]
    pub fn flip_customer(&mut self, customer: usize) {
        let project = self.project;

        if self.selected[customer] {
            self.selected[customer] = false;
            self.remove_closure(customer);
            self.profit -= project.customer_profit(customer);
            self.attended -= 1;
            self.profit_risk = if self.attended == 0 {
                0.0
            } else {
                clamp_drift(
                    self.profit_risk - project.customer_profit_risk(customer),
                    "profit_risk",
                )
            };
        } else {
            self.selected[customer] = true;
            self.add_closure(customer);
            self.profit += project.customer_profit(customer);
            self.profit_risk += project.customer_profit_risk(customer);
            self.attended += 1;
        }
    }

    fn add_closure(&mut self, customer: usize) {
        let project = self.project;
        for &r in self.closure.customer_closure(customer) {
            if self.coverage[r] == 0 {
                self.cost += project.requirement_cost(r);
                self.cost_risk += project.requirement_cost_risk(r);
                self.worst_cost += project.requirement_worst_cost(r);
                self.covered += 1;
            }
            self.coverage[r] += 1;
        }
    }

    fn remove_closure(&mut self, customer: usize) {
        let project = self.project;
        for &r in self.closure.customer_closure(customer) {
            self.coverage[r] -= 1;
            if self.coverage[r] == 0 {
                self.cost -= project.requirement_cost(r);
                self.cost_risk -= project.requirement_cost_risk(r);
                self.worst_cost -= project.requirement_worst_cost(r);
                self.covered -= 1;
            }
        }

        if self.covered == 0 {
            self.cost_risk = 0.0;
            self.worst_cost = 0.0;
        } else {
            self.cost_risk = clamp_drift(self.cost_risk, "cost_risk");
            self.worst_cost = clamp_drift(self.worst_cost, "worst_cost");
        }
    }

    pub fn project(&self) -> &'p Project {
        self.project
    }

    pub fn closure(&self) -> &Arc<ClosureTable> {
        &self.closure
    }

    pub fn customer_count(&self) -> usize {
        self.selected.len()
    }

    /// The customer selection as a bit vector.
    pub fn selection(&self) -> &[bool] {
        &self.selected
    }

    pub fn cost(&self) -> i64 {
        self.cost
    }

    pub fn profit(&self) -> i64 {
        self.profit
    }

    pub fn cost_risk(&self) -> f64 {
        self.cost_risk
    }

    pub fn profit_risk(&self) -> f64 {
        self.profit_risk
    }

    pub fn worst_cost(&self) -> f64 {
        self.worst_cost
    }

    pub fn is_customer_attended(&self, customer: usize) -> bool {
        self.selected[customer]
    }

    pub fn count_attended_customers(&self) -> usize {
        self.attended
    }

    /// Number of selected customers whose closure includes `requirement`.
    pub fn coverage(&self, requirement: usize) -> u32 {
        self.coverage[requirement]
    }
}

impl fmt::Display for Solution<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_selection(&self.selected))
    }
}

/// Floating cancellation can leave a risk aggregate slightly below zero.
#[inline]
fn clamp_drift(value: f64, aggregate: &'static str) -> f64 {
    if value < 0.0 {
        report_clamp(value, aggregate);
        0.0
    } else {
        value
    }
}

#[cold]
fn report_clamp(value: f64, aggregate: &'static str) {
    debug!(aggregate, value, "negative aggregate clamped to zero");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProjectBuilder;
    use crate::testing::scenario;
    use proptest::prelude::*;

    fn risky() -> Project {
        let mut b = ProjectBuilder::new("risky");
        let r0 = b.add_requirement(10);
        let r1 = b.add_requirement(7);
        let r2 = b.add_requirement(3);
        b.add_precedence(r1, r0);
        b.set_requirement_cost_estimates(r0, 8.1, 13.3)
            .set_requirement_cost_estimates(r1, 6.0, 9.7)
            .set_requirement_cost_estimates(r2, 2.9, 3.1);
        b.add_customer(40, [r0]);
        b.add_customer(25, [r1, r2]);
        b.add_customer(10, [r2]);
        b.set_customer_profit_estimates(0, 30.3, 44.4)
            .set_customer_profit_estimates(1, 20.0, 25.1)
            .set_customer_profit_estimates(2, 9.9, 10.1);
        b.build().unwrap()
    }

    #[test]
    fn test_empty_solution() {
        let p = scenario();
        let s = Solution::new(&p);
        assert_eq!(s.cost(), 0);
        assert_eq!(s.profit(), 0);
        assert_eq!(s.count_attended_customers(), 0);
        assert_eq!(s.to_string(), "[--]");
    }

    #[test]
    fn test_flip_shares_requirement_cost() {
        let p = scenario();
        let mut s = Solution::new(&p);

        s.flip_customer(1);
        assert_eq!(s.cost(), 20);
        assert_eq!(s.profit(), 50);
        assert_eq!(s.coverage(1), 1);

        s.flip_customer(0);
        assert_eq!(s.cost(), 30);
        assert_eq!(s.profit(), 150);
        assert_eq!(s.coverage(1), 2);
        assert_eq!(s.coverage(0), 1);

        s.flip_customer(1);
        assert_eq!(s.cost(), 30, "requirement 2 still needed by A");
        assert_eq!(s.profit(), 100);
        assert_eq!(s.to_string(), "[S-]");
    }

    #[test]
    fn test_set_all_customers_matches_flips() {
        let p = risky();
        let mut bulk = Solution::new(&p);
        bulk.set_all_customers(&[true, false, true]);

        let mut inc = Solution::new(&p);
        inc.flip_customer(2);
        inc.flip_customer(0);

        assert_eq!(bulk.cost(), inc.cost());
        assert_eq!(bulk.profit(), inc.profit());
        assert!((bulk.cost_risk() - inc.cost_risk()).abs() < 1e-9);
        assert!((bulk.worst_cost() - inc.worst_cost()).abs() < 1e-9);
        assert!((bulk.profit_risk() - inc.profit_risk()).abs() < 1e-9);
        assert_eq!(bulk.count_attended_customers(), 2);
    }

    #[test]
    fn test_set_all_customers_rebases() {
        let p = risky();
        let mut s = Solution::new(&p);
        s.set_all_customers(&[true, true, true]);
        s.set_all_customers(&[false, false, true]);
        assert_eq!(s.cost(), 3);
        assert_eq!(s.profit(), 10);
        assert_eq!(s.coverage(0), 0);
        assert_eq!(s.coverage(2), 1);
    }

    #[test]
    #[should_panic(expected = "selection length must equal the customer count")]
    fn test_set_all_customers_wrong_length_panics() {
        let p = scenario();
        Solution::new(&p).set_all_customers(&[true]);
    }

    #[test]
    fn test_empty_again_resets_risk_exactly() {
        let p = risky();
        let mut s = Solution::new(&p);
        for c in [0, 1, 2, 1, 0, 2] {
            s.flip_customer(c);
        }
        assert_eq!(s.cost_risk(), 0.0);
        assert_eq!(s.worst_cost(), 0.0);
        assert_eq!(s.profit_risk(), 0.0);
    }

    #[test]
    fn test_clone_shares_closure() {
        let p = scenario();
        let mut a = Solution::new(&p);
        a.flip_customer(0);
        let mut b = a.clone();
        b.flip_customer(1);

        assert!(Arc::ptr_eq(a.closure(), b.closure()));
        assert_eq!(a.selection(), &[true, false]);
        assert_eq!(b.selection(), &[true, true]);
    }

    fn arb_project() -> impl Strategy<Value = Project> {
        (1usize..8, 1usize..8)
            .prop_flat_map(|(nr, nc)| {
                (
                    prop::collection::vec((0i64..50, 0.0f64..10.0), nr),
                    prop::collection::vec((0usize..nr, 0usize..nr), 0..(2 * nr)),
                    prop::collection::vec(
                        (0i64..100, 0.0f64..10.0, prop::collection::vec(0usize..nr, 1..4)),
                        nc,
                    ),
                )
            })
            .prop_map(|(requirements, edges, customers)| {
                let mut b = ProjectBuilder::new("prop");
                for &(cost, spread) in &requirements {
                    let r = b.add_requirement(cost);
                    b.set_requirement_cost_estimates(r, cost as f64 - spread, cost as f64 + spread);
                }
                // edges only point from higher to lower index: acyclic
                for (x, y) in edges {
                    if x != y {
                        b.add_precedence(x.max(y), x.min(y));
                    }
                }
                for (profit, spread, wanted) in customers {
                    let c = b.add_customer(profit, wanted);
                    b.set_customer_profit_estimates(c, profit as f64 - spread, profit as f64 + spread);
                }
                b.build().unwrap()
            })
    }

    fn with_flips() -> impl Strategy<Value = (Project, Vec<usize>)> {
        arb_project().prop_flat_map(|p| {
            let n = p.customer_count();
            (Just(p), prop::collection::vec(0..n, 0..60))
        })
    }

    proptest! {
        #[test]
        fn prop_incremental_matches_batch((p, flips) in with_flips()) {
            let mut s = Solution::new(&p);
            for &c in &flips {
                s.flip_customer(c);
                let sel = s.selection();
                prop_assert_eq!(s.cost(), p.calculate_cost(sel));
                prop_assert_eq!(s.profit(), p.calculate_profit(sel));
                prop_assert!((s.cost_risk() - p.calculate_cost_risk(sel)).abs() < 1e-6);
                prop_assert!((s.worst_cost() - p.calculate_worst_cost(sel)).abs() < 1e-6);
                prop_assert!((s.profit_risk() - p.calculate_profit_risk(sel)).abs() < 1e-6);
                prop_assert_eq!(s.count_attended_customers(), sel.iter().filter(|&&x| x).count());
            }
        }

        #[test]
        fn prop_double_flip_is_identity((p, flips) in with_flips(), pick in 0usize..64) {
            let mut s = Solution::new(&p);
            for &c in &flips {
                s.flip_customer(c);
            }
            let before = s.clone();
            let c = pick % p.customer_count();
            s.flip_customer(c);
            s.flip_customer(c);

            prop_assert_eq!(s.selection(), before.selection());
            for r in 0..p.requirement_count() {
                prop_assert_eq!(s.coverage(r), before.coverage(r));
            }
            prop_assert_eq!(s.cost(), before.cost());
            prop_assert_eq!(s.profit(), before.profit());
            prop_assert!((s.cost_risk() - before.cost_risk()).abs() < 1e-9);
            prop_assert!((s.worst_cost() - before.worst_cost()).abs() < 1e-9);
            prop_assert!((s.profit_risk() - before.profit_risk()).abs() < 1e-9);
        }

        #[test]
        fn prop_risk_aggregates_never_negative((p, flips) in with_flips()) {
            let mut s = Solution::new(&p);
            for &c in &flips {
                s.flip_customer(c);
                prop_assert!(s.cost_risk() >= 0.0);
                prop_assert!(s.profit_risk() >= 0.0);
                prop_assert!(s.worst_cost() >= 0.0);
            }
        }
    }
}

//! Shared test instances.

use rand::Rng;

use crate::model::{Project, ProjectBuilder};
use crate::random::create_rng;

/// Two requirements (costs 10 and 20, the second precedes the first) and
/// two customers: A (profit 100) wants requirement 1, B (profit 50)
/// wants requirement 2. With budget 25 only `{B}` is feasible.
pub(crate) fn scenario() -> Project {
    let mut b = ProjectBuilder::new("scenario");
    let r1 = b.add_requirement(10);
    let r2 = b.add_requirement(20);
    b.add_precedence(r2, r1);
    b.add_customer(100, [r1]);
    b.add_customer(50, [r2]);
    b.build().expect("valid scenario")
}

/// Random layered instance with cost and profit estimates.
pub(crate) fn synthetic(requirements: usize, customers: usize, seed: u64) -> Project {
    let mut rng = create_rng(seed);
    let mut b = ProjectBuilder::new(format!("synthetic-{requirements}x{customers}"));

    for r in 0..requirements {
        let cost = rng.random_range(1..=20);
        b.add_requirement(cost);
        let spread = rng.random_range(0.0..(cost as f64) * 0.5);
        b.set_requirement_cost_estimates(r, cost as f64 - spread, cost as f64 + 2.0 * spread);
        // precedents only point to lower indices
        if r > 0 && rng.random_bool(0.4) {
            b.add_precedence(rng.random_range(0..r), r);
        }
    }

    for c in 0..customers {
        let profit = rng.random_range(1..=60);
        let wanted = rng.random_range(1..=3usize);
        let declared: Vec<usize> = (0..wanted)
            .map(|_| rng.random_range(0..requirements))
            .collect();
        b.add_customer(profit, declared);
        let spread = rng.random_range(0.0..(profit as f64) * 0.3);
        b.set_customer_profit_estimates(c, profit as f64 - spread, profit as f64 + spread);
    }

    b.build().expect("valid synthetic instance")
}

//! Fitness calculators.
//!
//! Interchangeable objective formulas behind one trait. The search
//! engine is fitness-agnostic: it only compares values with `>`.
//!
//! | Calculator               | feasible                                   | infeasible         |
//! |--------------------------|--------------------------------------------|--------------------|
//! | [`ProfitFitness`]        | `profit`                                   | `-cost`            |
//! | [`ProfitRiskFitness`]    | blend of profit and profit-risk terms      | `-cost/total_cost` |
//! | [`CostRiskFitness`]      | blend of profit and cost-risk terms        | `-cost/total_cost` |
//! | [`CostCapFitness`]       | `profit` unless worst-case overrun too big | `-cost`            |
//! | [`ProfitRiskOnlyFitness`]| `profit_risk`                              | `-cost`            |
//! | [`CostRiskOnlyFitness`]  | `cost_risk`                                | `-cost`            |

mod cost_cap;
mod profit;
mod risk;
mod types;

pub use cost_cap::CostCapFitness;
pub use profit::ProfitFitness;
pub use risk::{CostRiskFitness, CostRiskOnlyFitness, ProfitRiskFitness, ProfitRiskOnlyFitness};
pub use types::FitnessCalculator;

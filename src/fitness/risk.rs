//! Risk-aware objectives.
//!
//! [`ProfitRiskFitness`] and [`CostRiskFitness`] blend normalized profit
//! with a normalized risk term weighted by `α = risk_importance / 100`:
//!
//! ```text
//! (1 - α) · profit / max_profit  +  α · clamp01((max_risk - risk) / max_risk)
//! ```
//!
//! `max_profit` and `max_risk` are normalization constants supplied by
//! the caller, typically the best values known for the budget level.
//! Infeasible solutions score `-cost / total_cost`.
//!
//! The `*Only` variants ignore profit and return the raw risk aggregate,
//! which maps the risk landscape on its own.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::warn;

use super::types::{is_feasible, FitnessCalculator};
use crate::model::Project;
use crate::solution::Solution;

/// Slack allowed on the risk term before it is reported as out of range.
const RISK_TERM_TOLERANCE: f64 = 1e-9;

/// Which risk aggregate a blended objective reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RiskSource {
    Profit,
    Cost,
}

impl RiskSource {
    fn read(self, solution: &Solution<'_>) -> f64 {
        match self {
            RiskSource::Profit => solution.profit_risk(),
            RiskSource::Cost => solution.cost_risk(),
        }
    }
}

#[derive(Debug)]
struct BlendedRisk {
    source: RiskSource,
    total_cost: f64,
    budget: f64,
    alpha: f64,
    max_profit: f64,
    max_risk: f64,
    reported: AtomicBool,
}

impl BlendedRisk {
    fn new(
        source: RiskSource,
        project: &Project,
        budget: f64,
        risk_importance: u32,
        max_profit: f64,
        max_risk: f64,
    ) -> Self {
        Self {
            source,
            total_cost: project.total_cost() as f64,
            budget,
            alpha: (f64::from(risk_importance) / 100.0).clamp(0.0, 1.0),
            max_profit,
            max_risk,
            reported: AtomicBool::new(false),
        }
    }

    #[inline]
    fn evaluate(&self, solution: &Solution<'_>) -> f64 {
        if !is_feasible(solution, self.budget) {
            let cost = solution.cost() as f64;
            return if self.total_cost > 0.0 {
                -cost / self.total_cost
            } else {
                -cost
            };
        }

        let profit_factor = if self.max_profit > 0.0 {
            solution.profit() as f64 / self.max_profit
        } else {
            0.0
        };

        let risk_factor = self.risk_term(self.source.read(solution));
        (1.0 - self.alpha) * profit_factor + self.alpha * risk_factor
    }

    fn risk_term(&self, risk: f64) -> f64 {
        if self.max_risk <= 0.0 {
            return 1.0;
        }
        let term = (self.max_risk - risk) / self.max_risk;
        if (term < -RISK_TERM_TOLERANCE || term > 1.0 + RISK_TERM_TOLERANCE)
            && !self.reported.swap(true, Ordering::Relaxed)
        {
            warn!(
                risk,
                max_risk = self.max_risk,
                term,
                "risk term outside [0, 1]; clamping (reported once)"
            );
        }
        term.clamp(0.0, 1.0)
    }
}

/// Profit blended with profit risk.
#[derive(Debug)]
pub struct ProfitRiskFitness(BlendedRisk);

impl ProfitRiskFitness {
    /// `risk_importance` is a percentage in `0..=100`.
    pub fn new(
        project: &Project,
        budget: f64,
        risk_importance: u32,
        max_profit: f64,
        max_risk: f64,
    ) -> Self {
        Self(BlendedRisk::new(
            RiskSource::Profit,
            project,
            budget,
            risk_importance,
            max_profit,
            max_risk,
        ))
    }
}

impl FitnessCalculator for ProfitRiskFitness {
    fn evaluate(&self, solution: &Solution<'_>) -> f64 {
        self.0.evaluate(solution)
    }

    fn name(&self) -> &'static str {
        "profit-risk"
    }
}

/// Profit blended with cost risk.
#[derive(Debug)]
pub struct CostRiskFitness(BlendedRisk);

impl CostRiskFitness {
    /// `risk_importance` is a percentage in `0..=100`.
    pub fn new(
        project: &Project,
        budget: f64,
        risk_importance: u32,
        max_profit: f64,
        max_risk: f64,
    ) -> Self {
        Self(BlendedRisk::new(
            RiskSource::Cost,
            project,
            budget,
            risk_importance,
            max_profit,
            max_risk,
        ))
    }
}

impl FitnessCalculator for CostRiskFitness {
    fn evaluate(&self, solution: &Solution<'_>) -> f64 {
        self.0.evaluate(solution)
    }

    fn name(&self) -> &'static str {
        "cost-risk"
    }
}

/// Raw profit risk of feasible solutions, `-cost` otherwise.
#[derive(Debug, Clone, Copy)]
pub struct ProfitRiskOnlyFitness {
    budget: f64,
}

impl ProfitRiskOnlyFitness {
    pub fn new(budget: f64) -> Self {
        Self { budget }
    }
}

impl FitnessCalculator for ProfitRiskOnlyFitness {
    fn evaluate(&self, solution: &Solution<'_>) -> f64 {
        if is_feasible(solution, self.budget) {
            solution.profit_risk()
        } else {
            -(solution.cost() as f64)
        }
    }

    fn name(&self) -> &'static str {
        "profit-risk-only"
    }
}

/// Raw cost risk of feasible solutions, `-cost` otherwise.
#[derive(Debug, Clone, Copy)]
pub struct CostRiskOnlyFitness {
    budget: f64,
}

impl CostRiskOnlyFitness {
    pub fn new(budget: f64) -> Self {
        Self { budget }
    }
}

impl FitnessCalculator for CostRiskOnlyFitness {
    fn evaluate(&self, solution: &Solution<'_>) -> f64 {
        if is_feasible(solution, self.budget) {
            solution.cost_risk()
        } else {
            -(solution.cost() as f64)
        }
    }

    fn name(&self) -> &'static str {
        "cost-risk-only"
    }
}

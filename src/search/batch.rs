//! Repeated independent runs.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::info;

use super::algorithm::Algorithm;
use super::config::SearchConfig;
use super::types::SearchResult;
use crate::constructor::Constructor;
use crate::fitness::FitnessCalculator;
use crate::model::Project;
use crate::random::cycle_seed;

/// Runs `cycles` independent repetitions of `algorithm`.
///
/// Cycle `i` uses the seed `cycle_seed(config.seed(), i)`, so results
/// are identical whether cycles run sequentially or, with the
/// `parallel` feature, on the rayon pool. Results are in cycle order.
pub fn run_cycles<C, F>(
    algorithm: Algorithm,
    project: &Project,
    constructor: &C,
    calculator: &F,
    config: &SearchConfig,
    cycles: usize,
) -> Vec<SearchResult>
where
    C: Constructor,
    F: FitnessCalculator,
{
    config.validate().expect("invalid SearchConfig");
    info!(%algorithm, cycles, "cycles started");

    let base = config.seed();
    let run_one = |cycle: usize| {
        let cycle_config = config.clone().with_seed(cycle_seed(base, cycle));
        algorithm.run(project, constructor, calculator, &cycle_config)
    };

    #[cfg(feature = "parallel")]
    let results: Vec<SearchResult> = (0..cycles).into_par_iter().map(run_one).collect();
    #[cfg(not(feature = "parallel"))]
    let results: Vec<SearchResult> = (0..cycles).map(run_one).collect();

    results
}

/// Summary statistics over a batch of runs.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CycleSummary {
    pub runs: usize,
    pub best_fitness: f64,
    pub worst_fitness: f64,
    pub mean_fitness: f64,
    pub std_dev_fitness: f64,
    /// Mean evaluation index at which each run found its best.
    pub mean_best_evaluation: f64,
}

impl CycleSummary {
    /// Returns `None` for an empty batch.
    pub fn from_results(results: &[SearchResult]) -> Option<Self> {
        if results.is_empty() {
            return None;
        }
        let n = results.len() as f64;
        let fitness = results.iter().map(|r| r.best_fitness);

        let best_fitness = fitness.clone().fold(f64::NEG_INFINITY, f64::max);
        let worst_fitness = fitness.clone().fold(f64::INFINITY, f64::min);
        let mean_fitness = fitness.clone().sum::<f64>() / n;
        let variance = fitness.map(|f| (f - mean_fitness).powi(2)).sum::<f64>() / n;
        let mean_best_evaluation =
            results.iter().map(|r| r.best_evaluation as f64).sum::<f64>() / n;

        Some(Self {
            runs: results.len(),
            best_fitness,
            worst_fitness,
            mean_fitness,
            std_dev_fitness: variance.sqrt(),
            mean_best_evaluation,
        })
    }
}

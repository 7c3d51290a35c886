//! Restart hill climbing (HC).
//!
//! # Algorithm
//!
//! 1. Construct a solution
//! 2. Climb with first-improvement local search to a local optimum
//! 3. While budget remains, go to 1
//! 4. Return the best solution seen across all climbs

use tracing::info;

use super::config::SearchConfig;
use super::engine::SearchEngine;
use super::types::{SearchAlgorithm, SearchResult, Unconstrained};
use crate::constructor::Constructor;
use crate::fitness::FitnessCalculator;
use crate::model::Project;
use crate::random::{create_rng, SearchRng};

/// Random-restart hill climbing.
///
/// # Examples
///
/// ```
/// use nrp_search::constructor::RandomConstructor;
/// use nrp_search::fitness::ProfitFitness;
/// use nrp_search::model::ProjectBuilder;
/// use nrp_search::search::{HillClimbing, SearchAlgorithm, SearchConfig};
///
/// let mut b = ProjectBuilder::new("demo");
/// let r1 = b.add_requirement(10);
/// let r2 = b.add_requirement(20);
/// b.add_precedence(r2, r1);
/// b.add_customer(100, [r1]);
/// b.add_customer(50, [r2]);
/// let project = b.build().unwrap();
///
/// let config = SearchConfig::default().with_max_evaluations(200);
/// let mut hc = HillClimbing::new(&project, RandomConstructor::new(&project), &config);
/// let best = hc.execute(&ProfitFitness::new(25.0));
/// assert_eq!(best, vec![false, true]);
/// assert_eq!(hc.fitness(), 50.0);
/// ```
pub struct HillClimbing<'p, C: Constructor> {
    engine: SearchEngine<'p>,
    constructor: C,
    rng: SearchRng,
    restarts: usize,
    best_restart: usize,
    history: Vec<f64>,
}

impl<'p, C: Constructor> HillClimbing<'p, C> {
    /// # Panics
    ///
    /// Panics if `config` fails validation.
    pub fn new(project: &'p Project, constructor: C, config: &SearchConfig) -> Self {
        config.validate().expect("invalid SearchConfig");
        let mut rng = create_rng(config.seed());
        let engine = SearchEngine::new(
            project,
            config.max_evaluations,
            config.progress_interval,
            &mut rng,
        );
        Self {
            engine,
            constructor,
            rng,
            restarts: 0,
            best_restart: 0,
            history: Vec::new(),
        }
    }

    /// Climbs started after the first one.
    pub fn restarts(&self) -> usize {
        self.restarts
    }

    /// Climb on which the best was found (0 is the first climb).
    pub fn restart_best_found(&self) -> usize {
        self.best_restart
    }
}

impl<C: Constructor> SearchAlgorithm for HillClimbing<'_, C> {
    fn name(&self) -> &'static str {
        "HC"
    }

    fn execute<F: FitnessCalculator>(&mut self, calculator: &F) -> Vec<bool> {
        info!(
            algorithm = self.name(),
            fitness = calculator.name(),
            customers = self.engine.project().customer_count(),
            max_evaluations = self.engine.max_evaluations(),
            "search started"
        );

        let mut climb = 0;
        loop {
            let start = self.constructor.generate_solution(&mut self.rng);
            let mut solution = self.engine.load(&start);
            let before = self.engine.best_fitness();

            let (_, status) = self
                .engine
                .local_search(&mut solution, calculator, &Unconstrained);

            if self.engine.best_fitness() > before {
                self.best_restart = climb;
            }
            self.history.push(self.engine.best_fitness());

            if status.is_exhausted() {
                break;
            }
            climb += 1;
        }
        self.restarts = climb;

        info!(
            algorithm = self.name(),
            best_fitness = self.engine.best_fitness(),
            evaluations = self.engine.evaluations(),
            restarts = self.restarts,
            "search finished"
        );
        self.engine.best_selection().to_vec()
    }

    fn best(&self) -> &[bool] {
        self.engine.best_selection()
    }

    fn fitness(&self) -> f64 {
        self.engine.best_fitness()
    }

    fn iteration_best_found(&self) -> u64 {
        self.engine.best_evaluation()
    }

    fn evaluations_consumed(&self) -> u64 {
        self.engine.evaluations()
    }

    fn iterations(&self) -> usize {
        self.history.len()
    }

    fn history(&self) -> &[f64] {
        &self.history
    }

    fn result(&self) -> SearchResult {
        SearchResult {
            best: self.best().to_vec(),
            best_fitness: self.fitness(),
            evaluations: self.evaluations_consumed(),
            best_evaluation: self.iteration_best_found(),
            iterations: self.iterations(),
            history: self.history.clone(),
            min_customers: None,
            best_restart: Some(self.best_restart),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructor::{GreedyConstructor, RandomConstructor};
    use crate::fitness::ProfitFitness;
    use crate::testing::{scenario, synthetic};

    #[test]
    fn test_scenario_optimum() {
        let p = scenario();
        let config = SearchConfig::default().with_max_evaluations(500);
        let mut hc = HillClimbing::new(&p, RandomConstructor::new(&p), &config);
        let best = hc.execute(&ProfitFitness::new(25.0));

        assert_eq!(best, vec![false, true]);
        assert_eq!(hc.fitness(), 50.0);
        assert!(hc.restarts() > 0);
    }

    #[test]
    fn test_budget_respected() {
        let p = synthetic(40, 80, 1);
        let config = SearchConfig::default().with_max_evaluations(3_000);
        let mut hc = HillClimbing::new(&p, GreedyConstructor::new(&p), &config);
        hc.execute(&ProfitFitness::new(p.total_cost() as f64 * 0.3));

        assert_eq!(hc.evaluations_consumed(), 3_001);
        assert!(hc.iteration_best_found() <= 3_000);
        assert!(hc.restart_best_found() <= hc.restarts());
        assert_eq!(hc.history().len(), hc.restarts() + 1);
    }

    #[test]
    fn test_history_is_best_so_far() {
        let p = synthetic(30, 50, 2);
        let config = SearchConfig::default().with_max_evaluations(5_000);
        let mut hc = HillClimbing::new(&p, RandomConstructor::new(&p), &config);
        hc.execute(&ProfitFitness::new(p.total_cost() as f64 * 0.5));

        assert!(hc.history().windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(*hc.history().last().unwrap(), hc.fitness());
    }

    #[test]
    fn test_best_is_feasible() {
        let p = synthetic(30, 50, 3);
        let budget = p.total_cost() as f64 * 0.25;
        let config = SearchConfig::default().with_max_evaluations(5_000);
        let mut hc = HillClimbing::new(&p, GreedyConstructor::new(&p), &config);
        let best = hc.execute(&ProfitFitness::new(budget));

        assert!(p.calculate_cost(&best) as f64 <= budget);
        assert_eq!(p.calculate_profit(&best) as f64, hc.fitness());
    }

    #[test]
    fn test_same_seed_same_result() {
        let p = synthetic(25, 40, 4);
        let fitness = ProfitFitness::new(p.total_cost() as f64 * 0.4);
        let config = SearchConfig::default().with_max_evaluations(4_000).with_seed(9);

        let run = || {
            let mut hc = HillClimbing::new(&p, RandomConstructor::new(&p), &config);
            hc.execute(&fitness);
            hc.result()
        };
        let (a, b) = (run(), run());
        assert_eq!(a.best, b.best);
        assert_eq!(a.best_evaluation, b.best_evaluation);
        assert_eq!(a.history, b.history);
        assert_eq!(a.best_restart, b.best_restart);
    }

    #[test]
    #[should_panic(expected = "invalid SearchConfig")]
    fn test_invalid_config_panics() {
        let p = scenario();
        let config = SearchConfig::default().with_max_evaluations(0);
        HillClimbing::new(&p, RandomConstructor::new(&p), &config);
    }
}

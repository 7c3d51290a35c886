//! Metaheuristic local search for the Next Release Problem (NRP).
//!
//! Select the customers to satisfy in a software release. Every customer
//! demands a set of requirements; building a requirement also requires
//! building its precedents, and a requirement shared by several
//! customers is paid for once. Subject to a budget, maximize profit,
//! optionally adjusted for estimation risk.
//!
//! - **Model**: immutable [`Project`](model::Project) instances, built
//!   programmatically or read from the classic NRP text format.
//! - **Solution**: an incrementally maintained customer selection with
//!   cost, profit and risk aggregates updated per single-customer flip.
//! - **Fitness**: interchangeable objective calculators.
//! - **Constructors**: random and profit/cost-greedy initial solutions.
//! - **Search**: restart hill climbing (HC), iterated local search (ILS)
//!   and sampling-guided ILS (VISILS) over a shared first-improvement
//!   neighborhood engine bounded by an evaluation budget.
//!
//! # Example
//!
//! ```
//! use nrp_search::constructor::GreedyConstructor;
//! use nrp_search::fitness::ProfitFitness;
//! use nrp_search::model::ProjectBuilder;
//! use nrp_search::search::{Algorithm, SearchConfig};
//!
//! let mut b = ProjectBuilder::new("release");
//! let login = b.add_requirement(10);
//! let storage = b.add_requirement(20);
//! b.add_precedence(storage, login);
//! b.add_customer(100, [login]);
//! b.add_customer(50, [storage]);
//! let project = b.build()?;
//!
//! let result = Algorithm::Ils.run(
//!     &project,
//!     &GreedyConstructor::new(&project),
//!     &ProfitFitness::new(25.0),
//!     &SearchConfig::default().with_max_evaluations(1_000),
//! );
//! assert_eq!(result.best, vec![false, true]);
//! assert_eq!(result.best_fitness, 50.0);
//! # Ok::<(), nrp_search::NrpError>(())
//! ```
//!
//! # Features
//!
//! - `parallel`: run repetitions of [`search::run_cycles`] on rayon
//! - `serde`: derive serialization for configuration and result types

pub mod constructor;
pub mod error;
pub mod fitness;
pub mod model;
pub mod random;
pub mod search;
pub mod solution;

#[cfg(test)]
mod testing;

pub use error::{NrpError, Result};

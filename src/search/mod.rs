//! Local search strategies.
//!
//! All strategies share one [`SearchEngine`]: a counted evaluator that
//! tracks the global best and explores the single-flip neighborhood of
//! a solution in a fixed random order, accepting the first strict
//! improvement. They differ only in how trajectories are started and
//! restarted:
//!
//! - [`HillClimbing`]: a fresh constructed solution per climb
//! - [`IteratedLocalSearch`]: perturb the incumbent, keep strict
//!   improvements
//! - [`SamplingGuidedIls`]: sample solution sizes to fix a customer
//!   floor, then ILS above it
//!
//! Every strategy runs until the evaluation budget is exhausted and
//! returns the best selection found.
//!
//! # References
//!
//! - Lourenço, H. R., Martin, O. C. & Stützle, T. (2003). "Iterated local
//!   search", *Handbook of Metaheuristics*, 320-353.
//! - Bagnall, A. J., Rayward-Smith, V. J. & Whittley, I. M. (2001). "The
//!   next release problem", *Information and Software Technology* 43(14),
//!   883-890.

mod algorithm;
mod batch;
mod config;
mod engine;
mod hill_climbing;
mod ils;
mod types;
mod visils;

pub use algorithm::Algorithm;
pub use batch::{run_cycles, CycleSummary};
pub use config::SearchConfig;
pub use engine::SearchEngine;
pub use hill_climbing::HillClimbing;
pub use ils::IteratedLocalSearch;
pub use types::{
    FlipPolicy, MinCustomers, NeighborhoodStatus, SearchAlgorithm, SearchResult, Unconstrained,
};
pub use visils::SamplingGuidedIls;

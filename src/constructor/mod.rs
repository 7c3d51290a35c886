//! Initial-solution constructors.
//!
//! A constructor produces raw customer-selection vectors that the
//! search strategies load into a [`Solution`](crate::solution::Solution)
//! as starting points.
//!
//! - [`RandomConstructor`]: uniform draws
//! - [`GreedyConstructor`]: draws biased by profit over closure cost

mod greedy;
mod random;
mod types;

pub use greedy::GreedyConstructor;
pub use random::RandomConstructor;
pub use types::Constructor;

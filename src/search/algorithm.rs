//! Strategy selector.

use std::fmt;
use std::str::FromStr;

use super::config::SearchConfig;
use super::hill_climbing::HillClimbing;
use super::ils::IteratedLocalSearch;
use super::types::{SearchAlgorithm, SearchResult};
use super::visils::SamplingGuidedIls;
use crate::constructor::Constructor;
use crate::error::NrpError;
use crate::fitness::FitnessCalculator;
use crate::model::Project;

/// The available search strategies.
///
/// # Examples
///
/// ```
/// use nrp_search::search::Algorithm;
///
/// let algorithm: Algorithm = "visils".parse().unwrap();
/// assert_eq!(algorithm, Algorithm::Visils);
/// assert_eq!(algorithm.to_string(), "VISILS");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    /// Restart hill climbing.
    Hc,
    /// Iterated local search.
    Ils,
    /// Sampling-guided iterated local search.
    Visils,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Hc, Algorithm::Ils, Algorithm::Visils];

    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Hc => "HC",
            Algorithm::Ils => "ILS",
            Algorithm::Visils => "VISILS",
        }
    }

    /// Runs this strategy once and returns its result.
    ///
    /// # Panics
    ///
    /// Panics if `config` fails validation.
    pub fn run<C, F>(
        self,
        project: &Project,
        constructor: &C,
        calculator: &F,
        config: &SearchConfig,
    ) -> SearchResult
    where
        C: Constructor,
        F: FitnessCalculator,
    {
        match self {
            Algorithm::Hc => execute(HillClimbing::new(project, constructor, config), calculator),
            Algorithm::Ils => execute(
                IteratedLocalSearch::new(project, constructor, config),
                calculator,
            ),
            Algorithm::Visils => execute(
                SamplingGuidedIls::new(project, constructor, config),
                calculator,
            ),
        }
    }
}

fn execute<A, F>(mut algorithm: A, calculator: &F) -> SearchResult
where
    A: SearchAlgorithm,
    F: FitnessCalculator,
{
    algorithm.execute(calculator);
    algorithm.result()
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = NrpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| NrpError::UnknownAlgorithm(s.to_string()))
    }
}

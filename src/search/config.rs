//! Search configuration.

use crate::error::{NrpError, Result};
use crate::random::DEFAULT_SEED;

/// Parameters shared by every search strategy.
///
/// # Examples
///
/// ```
/// use nrp_search::search::SearchConfig;
///
/// let config = SearchConfig::default()
///     .with_max_evaluations(50_000)
///     .with_seed(7);
/// assert_eq!(config.max_evaluations, 50_000);
/// assert_eq!(config.seed(), 7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// Evaluation budget. The evaluation that exceeds it is counted but
    /// its value is discarded.
    pub max_evaluations: u64,
    /// Solutions sampled per customer count in the VISILS sampling phase.
    pub sample_size: usize,
    /// Customers flipped per ILS/VISILS perturbation.
    pub perturbation_size: usize,
    /// Evaluations between progress trace events (0 disables them).
    pub progress_interval: u64,
    /// Random seed (None for default seed).
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_evaluations: 10_000_000,
            sample_size: 10,
            perturbation_size: 2,
            progress_interval: 10_000,
            seed: None,
        }
    }
}

impl SearchConfig {
    /// Sets the evaluation budget.
    pub fn with_max_evaluations(mut self, n: u64) -> Self {
        self.max_evaluations = n;
        self
    }

    /// Sets the number of samples per customer count in VISILS.
    pub fn with_sample_size(mut self, n: usize) -> Self {
        self.sample_size = n;
        self
    }

    /// Sets the number of customers flipped per perturbation.
    pub fn with_perturbation_size(mut self, n: usize) -> Self {
        self.perturbation_size = n;
        self
    }

    /// Sets the evaluation interval between progress events.
    pub fn with_progress_interval(mut self, n: u64) -> Self {
        self.progress_interval = n;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The effective seed.
    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_evaluations == 0 {
            return Err(NrpError::InvalidConfig("max_evaluations must be positive".into()));
        }
        if self.sample_size == 0 {
            return Err(NrpError::InvalidConfig("sample_size must be positive".into()));
        }
        if self.perturbation_size == 0 {
            return Err(NrpError::InvalidConfig(
                "perturbation_size must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = SearchConfig::default();
        assert_eq!(c.max_evaluations, 10_000_000);
        assert_eq!(c.sample_size, 10);
        assert_eq!(c.perturbation_size, 2);
        assert_eq!(c.seed(), DEFAULT_SEED);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_budget() {
        let c = SearchConfig::default().with_max_evaluations(0);
        assert!(matches!(c.validate(), Err(NrpError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_zero_sample_size() {
        assert!(SearchConfig::default().with_sample_size(0).validate().is_err());
    }

    #[test]
    fn test_validate_zero_perturbation() {
        assert!(SearchConfig::default()
            .with_perturbation_size(0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_zero_progress_interval_is_valid() {
        assert!(SearchConfig::default()
            .with_progress_interval(0)
            .validate()
            .is_ok());
    }
}

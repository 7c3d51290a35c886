//! Crate error type.

use thiserror::Error;

/// Errors raised while building instances, parsing selections or
/// validating configuration.
///
/// Search itself never fails: running out of evaluations is reported as
/// [`NeighborhoodStatus::SearchExhausted`](crate::search::NeighborhoodStatus)
/// and the best solution found so far is returned.
#[derive(Debug, Error)]
pub enum NrpError {
    #[error("requirement index {index} out of range (requirement count {count})")]
    RequirementOutOfRange { index: usize, count: usize },

    #[error("customer index {index} out of range (customer count {count})")]
    CustomerOutOfRange { index: usize, count: usize },

    #[error("precedence cycle through requirement #{requirement}")]
    PrecedenceCycle { requirement: usize },

    #[error("project has no customers")]
    EmptyProject,

    #[error("invalid risk estimate for {what} #{index}: min {min} > max {max}")]
    InvalidEstimate {
        what: &'static str,
        index: usize,
        min: f64,
        max: f64,
    },

    #[error("selection length mismatch: expected {expected} characters, found {found}")]
    SelectionLength { expected: usize, found: usize },

    #[error("invalid selection string: {0}")]
    InvalidSelection(String),

    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("unknown algorithm `{0}` (expected HC, ILS or VISILS)")]
    UnknownAlgorithm(String),
}

/// Crate result alias.
pub type Result<T> = std::result::Result<T, NrpError>;

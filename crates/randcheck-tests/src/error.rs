//! Errors raised by the test battery.

use thiserror::Error;

/// Errors returned by [`crate::RandomnessTester`].
///
/// Numerically degenerate inputs (zero variance, every sample on one side of the
/// median) are not errors; they map to defined outputs on the individual tests.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RandomnessError {
    /// The sequence or range cannot be analyzed at all.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A query parameter is outside its domain. The tester stays usable.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, RandomnessError>;

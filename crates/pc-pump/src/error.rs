//! Error types for pump model operations.

use pc_core::CoreError;
use pc_fit::FitError;
use thiserror::Error;

/// Errors raised by the pump performance model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PumpError {
    /// An operation needs a curve that was never assigned.
    #[error("Missing data: {field} not defined")]
    MissingData { field: &'static str },

    /// Too few samples, or paired series of different lengths.
    #[error("Insufficient data: {what}")]
    InsufficientData { what: String },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Curve fit error: {0}")]
    Fit(FitError),
}

pub type PumpResult<T> = Result<T, PumpError>;

impl From<FitError> for PumpError {
    fn from(e: FitError) -> Self {
        if e.is_insufficient_data() {
            PumpError::InsufficientData {
                what: e.to_string(),
            }
        } else {
            PumpError::Fit(e)
        }
    }
}

impl From<CoreError> for PumpError {
    fn from(e: CoreError) -> Self {
        PumpError::Fit(e.into())
    }
}

impl PumpError {
    pub(crate) fn length_mismatch(what: &str, values: usize, basis: usize) -> Self {
        PumpError::InsufficientData {
            what: format!("{what} has {values} values but its flow basis has {basis}"),
        }
    }
}

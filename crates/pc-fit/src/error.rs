//! Error types for curve fitting.

use pc_core::CoreError;
use thiserror::Error;

/// Errors that can occur while fitting a polynomial.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FitError {
    #[error("Insufficient data for {what}: got {len} points, need at least {required}")]
    InsufficientData {
        what: &'static str,
        len: usize,
        required: usize,
    },

    #[error("Mismatched sample lengths: x has {x_len} values, y has {y_len}")]
    LengthMismatch { x_len: usize, y_len: usize },

    #[error("Non-finite sample in {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Numeric error: {what}")]
    Numeric { what: String },
}

pub type FitResult<T> = Result<T, FitError>;

impl From<CoreError> for FitError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::NonFinite { what, value } => FitError::NonFinite { what, value },
        }
    }
}

impl FitError {
    /// True for the "too few or mismatched samples" family.
    pub fn is_insufficient_data(&self) -> bool {
        matches!(
            self,
            FitError::InsufficientData { .. } | FitError::LengthMismatch { .. }
        )
    }
}

//! Centrifugal pump affinity laws.
//!
//! For a fixed impeller diameter and a speed ratio `r = n / n_ref`:
//!
//! ```text
//! Q' = Q * r
//! H' = H * r^2
//! P' = P * r^3
//! ```
//!
//! Speeds are given in percent of the reference speed. Zero or negative
//! speeds are accepted as-is; rejecting them is left to callers.

use crate::speed::REFERENCE_SPEED;

/// Flow and head multipliers for one speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffinityRatio {
    pub flow: f64,
    pub head: f64,
}

impl AffinityRatio {
    /// Shaft power multiplier (cube of the speed ratio).
    pub fn power(&self) -> f64 {
        self.flow * self.head
    }
}

/// Stateless scaler applying the affinity laws.
#[derive(Debug, Clone, Copy, Default)]
pub struct AffinityScaler;

impl AffinityScaler {
    pub fn ratio(speed_percent: f64) -> AffinityRatio {
        let r = speed_percent / REFERENCE_SPEED;
        AffinityRatio {
            flow: r,
            head: r * r,
        }
    }

    /// Scale a whole curve element-wise; length and order are preserved.
    pub fn scale_curve(flow: &[f64], head: &[f64], speed_percent: f64) -> (Vec<f64>, Vec<f64>) {
        let ratio = Self::ratio(speed_percent);
        (
            flow.iter().map(|q| q * ratio.flow).collect(),
            head.iter().map(|h| h * ratio.head).collect(),
        )
    }

    pub fn scale_point(flow: f64, head: f64, speed_percent: f64) -> (f64, f64) {
        let ratio = Self::ratio(speed_percent);
        (flow * ratio.flow, head * ratio.head)
    }
}

//! Float helpers shared by the fitting, model and plotting crates.

use crate::{CoreError, CoreResult};

/// Reject a series holding NaN or infinity; the first offender is reported.
pub fn ensure_all_finite(values: &[f64], what: &'static str) -> CoreResult<()> {
    match values.iter().find(|v| !v.is_finite()) {
        Some(&value) => Err(CoreError::NonFinite { what, value }),
        None => Ok(()),
    }
}

/// `num` evenly spaced samples from `start` to `end` inclusive.
///
/// The last sample is pinned to `end` so callers can close polygons exactly.
pub fn linspace(start: f64, end: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let delta = (end - start) / (num - 1) as f64;
            let mut points: Vec<f64> = (0..num).map(|i| start + i as f64 * delta).collect();
            points[num - 1] = end;
            points
        }
    }
}

/// Index of the largest value; the first occurrence wins on ties.
///
/// NaN entries are never selected. Returns `None` for an empty or all-NaN slice.
pub fn argmax_first(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Largest value of a series, NaN ignored.
pub fn max_value(values: &[f64]) -> Option<f64> {
    argmax_first(values).map(|i| values[i])
}

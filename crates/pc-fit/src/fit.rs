//! Least-squares polynomial fitting.
//!
//! The fit solves the Vandermonde system `V c = y` in the least-squares sense
//! with an SVD. Columns are scaled to unit norm before the solve so flows in
//! the hundreds of L/s do not wreck the conditioning of the cubic column.

use crate::error::{FitError, FitResult};
use crate::polynomial::Polynomial;
use nalgebra::{DMatrix, DVector};
use pc_core::numeric::ensure_all_finite;

/// Degree used for every pump curve fit.
pub const DEFAULT_DEGREE: usize = 3;

/// Singular values below this (relative to the largest) are treated as zero.
const SVD_EPS: f64 = 1e-12;

/// Fit a polynomial of `degree` through `(x, y)` by least squares.
///
/// # Errors
/// - `LengthMismatch` if `x` and `y` differ in length
/// - `InsufficientData` if `x.len() <= degree`
/// - `NonFinite` if any sample is NaN or infinite
pub fn fit(x: &[f64], y: &[f64], degree: usize) -> FitResult<Polynomial> {
    if x.len() != y.len() {
        return Err(FitError::LengthMismatch {
            x_len: x.len(),
            y_len: y.len(),
        });
    }
    let coeff_count = degree + 1;
    if x.len() < coeff_count {
        return Err(FitError::InsufficientData {
            what: "polynomial fit",
            len: x.len(),
            required: coeff_count,
        });
    }
    ensure_all_finite(x, "fit x samples")?;
    ensure_all_finite(y, "fit y samples")?;

    let rows = x.len();
    let mut vandermonde = DMatrix::zeros(rows, coeff_count);
    for (row, &xi) in x.iter().enumerate() {
        let mut x_pow = 1.0;
        for col in 0..coeff_count {
            vandermonde[(row, col)] = x_pow;
            x_pow *= xi;
        }
    }

    let mut column_scale = vec![1.0; coeff_count];
    for (col, scale) in column_scale.iter_mut().enumerate() {
        let norm = vandermonde.column(col).norm();
        if norm > 0.0 {
            *scale = norm;
            vandermonde.column_mut(col).unscale_mut(norm);
        }
    }

    let rhs = DVector::from_column_slice(y);
    let svd = vandermonde.svd(true, true);
    let max_sv = svd.singular_values.max();
    let scaled = svd
        .solve(&rhs, SVD_EPS * max_sv.max(1.0))
        .map_err(|e| FitError::Numeric {
            what: format!("least-squares solve failed: {e}"),
        })?;

    let coefficients: Vec<f64> = scaled
        .iter()
        .zip(&column_scale)
        .map(|(c, s)| c / s)
        .collect();
    if coefficients.iter().any(|c| !c.is_finite()) {
        return Err(FitError::Numeric {
            what: "fit produced non-finite coefficients".to_string(),
        });
    }

    tracing::debug!(degree, points = rows, ?coefficients, "fitted polynomial");
    Ok(Polynomial::new(coefficients))
}

/// Cubic fit, the degree every pump curve uses.
pub fn fit_cubic(x: &[f64], y: &[f64]) -> FitResult<Polynomial> {
    fit(x, y, DEFAULT_DEGREE)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn cubic_data_is_reproduced(
            c0 in -50.0_f64..50.0,
            c1 in -2.0_f64..2.0,
            c2 in -0.1_f64..0.1,
            c3 in -0.001_f64..0.001,
        ) {
            let truth = Polynomial::new(vec![c0, c1, c2, c3]);
            let xs: Vec<f64> = (0..12).map(|i| i as f64 * 5.0).collect();
            let ys = truth.evaluate_many(&xs);
            let poly = fit_cubic(&xs, &ys).unwrap();
            for &x in &xs {
                prop_assert!((poly.evaluate(x) - truth.evaluate(x)).abs() < 1e-6);
            }
        }
    }
}

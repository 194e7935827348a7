//! pc-fit: least-squares polynomial curve fitting.
//!
//! Pump curves are smoothed by a cubic fit before any head is read off them,
//! so the measured scatter in vendor data does not leak into derived points.
//!
//! # Example
//!
//! ```
//! use pc_fit::fit_cubic;
//!
//! let flow = [0.0, 10.0, 20.0, 30.0, 40.0, 50.0];
//! let head = [50.0, 48.0, 44.0, 38.0, 30.0, 20.0];
//! let poly = fit_cubic(&flow, &head).unwrap();
//! assert!((poly.evaluate(30.0) - 38.0).abs() < 0.5);
//! ```

pub mod error;
pub mod fit;
pub mod polynomial;

pub use error::{FitError, FitResult};
pub use fit::{DEFAULT_DEGREE, fit, fit_cubic};
pub use polynomial::Polynomial;

//! pc-core: shared foundation for pumpcurve.
//!
//! Contains:
//! - units (uom flow conversion for display)
//! - numeric (finite checks and sampling helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use units::*;

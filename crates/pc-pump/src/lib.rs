//! pc-pump: centrifugal pump performance model.
//!
//! A [`PumpCurveModel`] owns the curves measured at reference (100%) speed
//! and derives from them:
//! - the best efficiency point (BEP)
//! - the preferred operating range (POR, 70%-120% of BEP flow)
//! - curves, BEPs and PORs at other speeds via the affinity laws
//!
//! # Example
//!
//! ```
//! use pc_pump::PumpCurveModel;
//!
//! let mut pump = PumpCurveModel::new("Xylem", "NP3153", None, None).unwrap();
//! pump.define_curve(
//!     vec![0.0, 10.0, 20.0, 30.0, 40.0, 50.0],
//!     vec![50.0, 48.0, 44.0, 38.0, 30.0, 20.0],
//! )
//! .unwrap();
//! pump.define_efficiency(vec![0.0, 40.0, 65.0, 72.0, 68.0, 50.0], None)
//!     .unwrap();
//!
//! let bep = pump.best_efficiency_point().unwrap();
//! assert_eq!(bep.flow, 30.0);
//!
//! let por = pump.preferred_operating_range().unwrap();
//! assert!((por.upper_flow - 36.0).abs() < 1e-12);
//! ```

pub mod affinity;
pub mod curve;
pub mod error;
pub mod identity;
pub mod model;
pub mod points;
pub mod speed;

// Re-exports
pub use affinity::{AffinityRatio, AffinityScaler};
pub use curve::{FlowBasis, ReferenceCurve, Series};
pub use error::{PumpError, PumpResult};
pub use identity::PumpIdentity;
pub use model::PumpCurveModel;
pub use points::{
    BepAtSpeed, BestEfficiencyPoint, POR_LOWER_FRACTION, POR_UPPER_FRACTION,
    PreferredOperatingRange,
};
pub use speed::{DEFAULT_SPEEDS, REFERENCE_SPEED, SpeedMap, SpeedSet};

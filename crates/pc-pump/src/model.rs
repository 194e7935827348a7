//! Pump performance model.

use pc_core::numeric::argmax_first;
use pc_fit::{Polynomial, fit_cubic};

use crate::affinity::AffinityScaler;
use crate::curve::{FlowBasis, ReferenceCurve, Series};
use crate::error::{PumpError, PumpResult};
use crate::identity::PumpIdentity;
use crate::points::{
    BepAtSpeed, BestEfficiencyPoint, POR_LOWER_FRACTION, POR_UPPER_FRACTION,
    PreferredOperatingRange,
};
use crate::speed::{SpeedMap, SpeedSet};

/// Centrifugal pump with curves measured at reference (100%) speed.
///
/// Curve setters are independent and may be called in any order. Derived
/// quantities are recomputed on every call and fail with
/// [`PumpError::MissingData`] until the curves they need are assigned.
///
/// ## Model
///
/// - BEP flow is the efficiency-basis flow at the highest efficiency sample
///   (first occurrence on ties).
/// - BEP and POR heads come from a cubic least-squares fit of `(flow, head)`,
///   never from the raw samples.
/// - Other speeds follow the affinity laws, `Q ∝ n`, `H ∝ n²`.
#[derive(Debug, Clone)]
pub struct PumpCurveModel {
    identity: PumpIdentity,
    curve: ReferenceCurve,
}

impl PumpCurveModel {
    /// Create a pump with no curves assigned.
    ///
    /// # Errors
    /// Returns `InvalidArg` if make or model is blank.
    pub fn new(
        make: impl Into<String>,
        model: impl Into<String>,
        impeller: Option<String>,
        motor: Option<String>,
    ) -> PumpResult<Self> {
        Ok(Self::from_identity(PumpIdentity::new(
            make, model, impeller, motor,
        )?))
    }

    pub fn from_identity(identity: PumpIdentity) -> Self {
        Self {
            identity,
            curve: ReferenceCurve::default(),
        }
    }

    pub fn identity(&self) -> &PumpIdentity {
        &self.identity
    }

    pub fn reference_curve(&self) -> &ReferenceCurve {
        &self.curve
    }

    /// Assign the flow (L/s) and head (m) curve.
    pub fn define_curve(&mut self, flow: Vec<f64>, head: Vec<f64>) -> PumpResult<&mut Self> {
        self.curve.set_curve(flow, head)?;
        tracing::debug!(pump = %self.identity, points = self.curve.len(), "pump curve defined");
        Ok(self)
    }

    /// Assign efficiency (%) samples.
    ///
    /// Without `flow_basis` the values pair with the pump curve flow.
    pub fn define_efficiency(
        &mut self,
        values: Vec<f64>,
        flow_basis: Option<Vec<f64>>,
    ) -> PumpResult<&mut Self> {
        self.curve.set_efficiency(Series {
            values,
            basis: FlowBasis::from_option(flow_basis),
        })?;
        tracing::debug!(pump = %self.identity, "efficiency defined");
        Ok(self)
    }

    /// Assign NPSHr (m) samples.
    ///
    /// Without `flow_basis` the values pair with the pump curve flow.
    pub fn define_npshr(
        &mut self,
        values: Vec<f64>,
        flow_basis: Option<Vec<f64>>,
    ) -> PumpResult<&mut Self> {
        self.curve.set_npshr(Series {
            values,
            basis: FlowBasis::from_option(flow_basis),
        })?;
        tracing::debug!(pump = %self.identity, "npshr defined");
        Ok(self)
    }

    pub fn flow(&self) -> &[f64] {
        self.curve.flow()
    }

    pub fn head(&self) -> &[f64] {
        self.curve.head()
    }

    pub fn has_curve(&self) -> bool {
        !self.curve.is_empty()
    }

    pub fn has_efficiency(&self) -> bool {
        self.curve.efficiency().is_some()
    }

    pub fn has_npshr(&self) -> bool {
        self.curve.npshr().is_some()
    }

    pub fn efficiency(&self) -> Option<&[f64]> {
        self.curve.efficiency().map(|s| s.values.as_slice())
    }

    pub fn efficiency_flow(&self) -> Option<&[f64]> {
        self.curve.efficiency().map(|s| self.curve.basis_flow(s))
    }

    /// True if efficiency was given its own flow samples.
    pub fn has_explicit_efficiency_flow(&self) -> bool {
        matches!(
            self.curve.efficiency().map(|s| &s.basis),
            Some(FlowBasis::Explicit(_))
        )
    }

    pub fn npshr(&self) -> Option<&[f64]> {
        self.curve.npshr().map(|s| s.values.as_slice())
    }

    pub fn npshr_flow(&self) -> Option<&[f64]> {
        self.curve.npshr().map(|s| self.curve.basis_flow(s))
    }

    pub fn has_explicit_npshr_flow(&self) -> bool {
        matches!(
            self.curve.npshr().map(|s| &s.basis),
            Some(FlowBasis::Explicit(_))
        )
    }

    /// Largest measured head, the shut-off head for a normal curve.
    pub fn max_head(&self) -> Option<f64> {
        pc_core::numeric::max_value(self.curve.head())
    }

    fn require_curve(&self) -> PumpResult<()> {
        if self.curve.is_empty() {
            return Err(PumpError::MissingData {
                field: "pump curve",
            });
        }
        Ok(())
    }

    /// Cubic fit of head against flow at reference speed.
    pub fn head_fit(&self) -> PumpResult<Polynomial> {
        self.require_curve()?;
        Ok(fit_cubic(self.curve.flow(), self.curve.head())?)
    }

    /// Cubic fit of efficiency against its flow basis.
    pub fn efficiency_fit(&self) -> PumpResult<Polynomial> {
        let series = self.curve.efficiency().ok_or(PumpError::MissingData {
            field: "efficiency",
        })?;
        self.curve.check_series("efficiency", series)?;
        Ok(fit_cubic(self.curve.basis_flow(series), &series.values)?)
    }

    /// Cubic fit of NPSHr against its flow basis.
    pub fn npshr_fit(&self) -> PumpResult<Polynomial> {
        let series = self
            .curve
            .npshr()
            .ok_or(PumpError::MissingData { field: "npshr" })?;
        self.curve.check_series("npshr", series)?;
        Ok(fit_cubic(self.curve.basis_flow(series), &series.values)?)
    }

    /// Fitted head at an arbitrary flow, reference speed.
    pub fn head_at(&self, flow: f64) -> PumpResult<f64> {
        Ok(self.head_fit()?.evaluate(flow))
    }

    /// Best efficiency point at reference speed.
    ///
    /// # Errors
    /// - `MissingData` if efficiency or the pump curve is not defined
    /// - `InsufficientData` if the curve has fewer than four points or a
    ///   series does not match its flow basis
    pub fn best_efficiency_point(&self) -> PumpResult<BestEfficiencyPoint> {
        let series = self.curve.efficiency().ok_or(PumpError::MissingData {
            field: "efficiency",
        })?;
        self.require_curve()?;
        self.curve.check_series("efficiency", series)?;

        let index = argmax_first(&series.values).ok_or_else(|| PumpError::InsufficientData {
            what: "efficiency has no finite samples".to_string(),
        })?;
        let flow = self.curve.basis_flow(series)[index];
        let head = self.head_fit()?.evaluate(flow);
        let bep = BestEfficiencyPoint {
            efficiency_percent: series.values[index],
            flow,
            head,
        };
        tracing::debug!(pump = %self.identity, index, ?bep, "best efficiency point");
        Ok(bep)
    }

    /// Preferred operating range at reference speed.
    pub fn preferred_operating_range(&self) -> PumpResult<PreferredOperatingRange> {
        let bep = self.best_efficiency_point()?;
        let fit = self.head_fit()?;
        let upper_flow = POR_UPPER_FRACTION * bep.flow;
        let lower_flow = POR_LOWER_FRACTION * bep.flow;
        let por = PreferredOperatingRange {
            upper_flow,
            upper_head: fit.evaluate(upper_flow),
            lower_flow,
            lower_head: fit.evaluate(lower_flow),
        };
        tracing::debug!(pump = %self.identity, ?por, "preferred operating range");
        Ok(por)
    }

    /// Reference curve projected to one speed.
    pub fn speed_curve(&self, speed_percent: f64) -> PumpResult<(Vec<f64>, Vec<f64>)> {
        self.require_curve()?;
        Ok(AffinityScaler::scale_curve(
            self.curve.flow(),
            self.curve.head(),
            speed_percent,
        ))
    }

    /// Reference curve projected to every requested speed.
    pub fn speed_curves(
        &self,
        speeds: impl Into<SpeedSet>,
    ) -> PumpResult<SpeedMap<(Vec<f64>, Vec<f64>)>> {
        let speeds = speeds.into();
        let mut entries = Vec::with_capacity(speeds.len());
        for &speed in &speeds {
            entries.push((speed, self.speed_curve(speed)?));
        }
        tracing::debug!(pump = %self.identity, speeds = ?speeds.as_slice(), "speed curves");
        Ok(SpeedMap::from_entries(entries))
    }

    /// Reference BEP scaled to each speed.
    pub fn speed_bep(&self, speeds: impl Into<SpeedSet>) -> PumpResult<SpeedMap<(f64, f64)>> {
        let bep = self.best_efficiency_point()?;
        let speeds = speeds.into();
        Ok(SpeedMap::from_entries(
            speeds
                .iter()
                .map(|&s| (s, AffinityScaler::scale_point(bep.flow, bep.head, s)))
                .collect(),
        ))
    }

    /// Reference POR scaled to each speed.
    pub fn speed_por(
        &self,
        speeds: impl Into<SpeedSet>,
    ) -> PumpResult<SpeedMap<PreferredOperatingRange>> {
        let por = self.preferred_operating_range()?;
        let speeds = speeds.into();
        Ok(SpeedMap::from_entries(
            speeds.iter().map(|&s| (s, por.at_speed(s))).collect(),
        ))
    }

    /// BEP at a single speed with a printable summary.
    pub fn best_efficiency_point_at_speed(&self, speed_percent: f64) -> PumpResult<BepAtSpeed> {
        let reference = self.best_efficiency_point()?;
        let result = BepAtSpeed {
            speed_percent,
            reference,
            scaled: reference.at_speed(speed_percent),
            power_ratio: AffinityScaler::ratio(speed_percent).power(),
        };
        tracing::info!("{}", result.summary(&self.identity.full_name()));
        Ok(result)
    }
}

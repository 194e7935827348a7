//! Derived operating points.

use std::fmt;

use pc_core::units::{lps, to_m3_per_h};

use crate::affinity::AffinityScaler;

/// Lower POR bound as a fraction of BEP flow.
pub const POR_LOWER_FRACTION: f64 = 0.7;

/// Upper POR bound as a fraction of BEP flow.
pub const POR_UPPER_FRACTION: f64 = 1.2;

/// Best efficiency point: flow (L/s), head (m) and efficiency (%).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BestEfficiencyPoint {
    pub efficiency_percent: f64,
    pub flow: f64,
    pub head: f64,
}

impl BestEfficiencyPoint {
    /// Same point at another speed; efficiency is carried over unchanged.
    pub fn at_speed(&self, speed_percent: f64) -> Self {
        let (flow, head) = AffinityScaler::scale_point(self.flow, self.head, speed_percent);
        Self {
            efficiency_percent: self.efficiency_percent,
            flow,
            head,
        }
    }
}

impl fmt::Display for BestEfficiencyPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.1}% at {:.2} L/s ({:.1} m³/h), {:.2} m",
            self.efficiency_percent,
            self.flow,
            to_m3_per_h(lps(self.flow)),
            self.head,
        )
    }
}

/// Preferred operating range: 70% to 120% of BEP flow with fitted heads.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PreferredOperatingRange {
    pub upper_flow: f64,
    pub upper_head: f64,
    pub lower_flow: f64,
    pub lower_head: f64,
}

impl PreferredOperatingRange {
    pub fn at_speed(&self, speed_percent: f64) -> Self {
        let (upper_flow, upper_head) =
            AffinityScaler::scale_point(self.upper_flow, self.upper_head, speed_percent);
        let (lower_flow, lower_head) =
            AffinityScaler::scale_point(self.lower_flow, self.lower_head, speed_percent);
        Self {
            upper_flow,
            upper_head,
            lower_flow,
            lower_head,
        }
    }
}

impl fmt::Display for PreferredOperatingRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.2} L/s @ {:.2} m to {:.2} L/s @ {:.2} m",
            self.lower_flow, self.lower_head, self.upper_flow, self.upper_head
        )
    }
}

/// BEP projected to one speed, with the reference values it came from.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BepAtSpeed {
    pub speed_percent: f64,
    pub reference: BestEfficiencyPoint,
    pub scaled: BestEfficiencyPoint,
    pub power_ratio: f64,
}

impl BepAtSpeed {
    /// Human-readable one-paragraph summary.
    pub fn summary(&self, pump_name: &str) -> String {
        format!(
            "{pump_name} at {speed:.0}% speed: BEP {scaled}\n  reference (100%): {reference}\n  shaft power ratio vs reference: {power:.3}",
            speed = self.speed_percent,
            scaled = self.scaled,
            reference = self.reference,
            power = self.power_ratio,
        )
    }
}

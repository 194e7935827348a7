//! Normalized curve record.

use pc_pump::{PumpCurveModel, PumpIdentity};
use serde::{Deserialize, Serialize};

use crate::{LoadError, LoadResult};

pub const PUMP: &str = "Pump";
pub const MOTOR: &str = "Motor";
pub const IMPELLER: &str = "Impeller";
pub const FLOW: &str = "Flow [l/s]";
pub const HEAD: &str = "Head [m]";
pub const EFFICIENCY: &str = "Overall Efficiency [%]";
pub const EFFICIENCY_FLOW: &str = "Overall Efficiency Flow [l/s]";
pub const NPSHR: &str = "NPSHR-values [m]";
pub const NPSHR_FLOW: &str = "NPSHR-Flow [l/s]";

/// Curve data and identity as a flat mapping of named arrays.
///
/// Field names on the wire are the vendor column headings, so a JSON export
/// reads like the spreadsheet it came from.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CurveRecord {
    #[serde(rename = "Make", default, skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,
    #[serde(rename = "Pump", default, skip_serializing_if = "Option::is_none")]
    pub pump: Option<String>,
    #[serde(rename = "Motor", default, skip_serializing_if = "Option::is_none")]
    pub motor: Option<String>,
    #[serde(rename = "Impeller", default, skip_serializing_if = "Option::is_none")]
    pub impeller: Option<String>,
    #[serde(rename = "Flow [l/s]")]
    pub flow: Vec<f64>,
    #[serde(rename = "Head [m]")]
    pub head: Vec<f64>,
    #[serde(
        rename = "Overall Efficiency [%]",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub efficiency: Option<Vec<f64>>,
    #[serde(
        rename = "Overall Efficiency Flow [l/s]",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub efficiency_flow: Option<Vec<f64>>,
    #[serde(
        rename = "NPSHR-values [m]",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub npshr: Option<Vec<f64>>,
    #[serde(
        rename = "NPSHR-Flow [l/s]",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub npshr_flow: Option<Vec<f64>>,
}

impl CurveRecord {
    /// Build a pump model from this record.
    ///
    /// `make` and `model` override the record's own identity; vendor exports
    /// carry the model in the `Pump` cell but never the make.
    pub fn to_model(&self, make: Option<&str>, model: Option<&str>) -> LoadResult<PumpCurveModel> {
        let make = make
            .map(str::to_string)
            .or_else(|| self.make.clone())
            .ok_or_else(|| LoadError::parse("Make", "pump make not given and not in record"))?;
        let model = model
            .map(str::to_string)
            .or_else(|| self.pump.clone())
            .ok_or_else(|| LoadError::parse(PUMP, "pump model not given and not in record"))?;

        let identity =
            PumpIdentity::new(make, model, self.impeller.clone(), self.motor.clone())?;
        let mut pump = PumpCurveModel::from_identity(identity);
        pump.define_curve(self.flow.clone(), self.head.clone())?;
        if let Some(eff) = &self.efficiency {
            pump.define_efficiency(eff.clone(), self.efficiency_flow.clone())?;
        }
        if let Some(npshr) = &self.npshr {
            pump.define_npshr(npshr.clone(), self.npshr_flow.clone())?;
        }
        Ok(pump)
    }

    /// Snapshot a pump model; flow bases are written only when explicit.
    pub fn from_model(pump: &PumpCurveModel) -> Self {
        let id = pump.identity();
        Self {
            make: Some(id.make().to_string()),
            pump: Some(id.model().to_string()),
            motor: id.motor().map(str::to_string),
            impeller: id.impeller().map(str::to_string),
            flow: pump.flow().to_vec(),
            head: pump.head().to_vec(),
            efficiency: pump.efficiency().map(<[f64]>::to_vec),
            efficiency_flow: pump
                .has_explicit_efficiency_flow()
                .then(|| pump.efficiency_flow().map(<[f64]>::to_vec))
                .flatten(),
            npshr: pump.npshr().map(<[f64]>::to_vec),
            npshr_flow: pump
                .has_explicit_npshr_flow()
                .then(|| pump.npshr_flow().map(<[f64]>::to_vec))
                .flatten(),
        }
    }
}

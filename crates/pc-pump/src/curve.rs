//! Reference-speed curve storage.

use pc_core::numeric::ensure_all_finite;

use crate::error::{PumpError, PumpResult};

/// Flow basis of a secondary series (efficiency or NPSHr).
///
/// Resolved once when the series is assigned: either it shares the primary
/// curve's flow samples or it carries its own.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowBasis {
    Primary,
    Explicit(Vec<f64>),
}

impl FlowBasis {
    pub(crate) fn from_option(basis: Option<Vec<f64>>) -> Self {
        match basis {
            Some(flow) => FlowBasis::Explicit(flow),
            None => FlowBasis::Primary,
        }
    }
}

/// Values measured against a flow basis.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub values: Vec<f64>,
    pub basis: FlowBasis,
}

/// Curves measured at reference speed.
///
/// `flow` and `head` are paired index-for-index. Secondary series may use
/// their own flow samples.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceCurve {
    flow: Vec<f64>,
    head: Vec<f64>,
    efficiency: Option<Series>,
    npshr: Option<Series>,
}

impl ReferenceCurve {
    pub fn flow(&self) -> &[f64] {
        &self.flow
    }

    pub fn head(&self) -> &[f64] {
        &self.head
    }

    pub fn is_empty(&self) -> bool {
        self.flow.is_empty()
    }

    pub fn len(&self) -> usize {
        self.flow.len()
    }

    pub fn efficiency(&self) -> Option<&Series> {
        self.efficiency.as_ref()
    }

    pub fn npshr(&self) -> Option<&Series> {
        self.npshr.as_ref()
    }

    /// Flow samples a secondary series is measured against.
    pub fn basis_flow<'a>(&'a self, series: &'a Series) -> &'a [f64] {
        match &series.basis {
            FlowBasis::Primary => &self.flow,
            FlowBasis::Explicit(flow) => flow,
        }
    }

    pub(crate) fn set_curve(&mut self, flow: Vec<f64>, head: Vec<f64>) -> PumpResult<()> {
        if flow.len() != head.len() {
            return Err(PumpError::InsufficientData {
                what: format!(
                    "pump curve has {} flow values but {} head values",
                    flow.len(),
                    head.len()
                ),
            });
        }
        ensure_all_finite(&flow, "pump curve flow")?;
        ensure_all_finite(&head, "pump curve head")?;
        self.flow = flow;
        self.head = head;
        Ok(())
    }

    pub(crate) fn set_efficiency(&mut self, series: Series) -> PumpResult<()> {
        self.check_series("efficiency", &series)?;
        self.efficiency = Some(series);
        Ok(())
    }

    pub(crate) fn set_npshr(&mut self, series: Series) -> PumpResult<()> {
        self.check_series("npshr", &series)?;
        self.npshr = Some(series);
        Ok(())
    }

    /// Length check for a series against its basis.
    ///
    /// A primary basis is only checked once a curve exists; assignment order
    /// is free.
    pub(crate) fn check_series(&self, what: &str, series: &Series) -> PumpResult<()> {
        let basis_len = match &series.basis {
            FlowBasis::Explicit(flow) => flow.len(),
            FlowBasis::Primary if self.flow.is_empty() => return Ok(()),
            FlowBasis::Primary => self.flow.len(),
        };
        if basis_len != series.values.len() {
            return Err(PumpError::length_mismatch(
                what,
                series.values.len(),
                basis_len,
            ));
        }
        Ok(())
    }
}

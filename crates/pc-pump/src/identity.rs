//! Pump identity metadata.

use std::fmt;

use crate::error::{PumpError, PumpResult};

/// Make, model and optional impeller/motor designations.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PumpIdentity {
    make: String,
    model: String,
    impeller: Option<String>,
    motor: Option<String>,
}

impl PumpIdentity {
    /// # Errors
    /// Returns `InvalidArg` if make or model is blank.
    pub fn new(
        make: impl Into<String>,
        model: impl Into<String>,
        impeller: Option<String>,
        motor: Option<String>,
    ) -> PumpResult<Self> {
        let make = make.into();
        let model = model.into();
        if make.trim().is_empty() {
            return Err(PumpError::InvalidArg {
                what: "pump make must not be empty",
            });
        }
        if model.trim().is_empty() {
            return Err(PumpError::InvalidArg {
                what: "pump model must not be empty",
            });
        }
        Ok(Self {
            make,
            model,
            impeller: impeller.filter(|s| !s.trim().is_empty()),
            motor: motor.filter(|s| !s.trim().is_empty()),
        })
    }

    pub fn make(&self) -> &str {
        &self.make
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn impeller(&self) -> Option<&str> {
        self.impeller.as_deref()
    }

    pub fn motor(&self) -> Option<&str> {
        self.motor.as_deref()
    }

    /// "make model", used for titles and file names.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.make, self.model)
    }
}

impl fmt::Display for PumpIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.make, self.model)
    }
}

//! YAML analysis configuration.

use std::path::{Path, PathBuf};

use pc_io::ColumnMapping;
use pc_plot::PorMode;
use pc_pump::DEFAULT_SPEEDS;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// One analysis run: where the curve comes from and what to draw.
///
/// ```yaml
/// pump: { make: Xylem }
/// source: { kind: vendor, path: curve.csv }
/// speeds: [90, 80, 70]
/// plot: { por: fill, efficiency: true, output_dir: plots }
/// duty_point: { flow: 25.0, head: 30.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub pump: PumpOverride,
    pub source: SourceConfig,
    #[serde(default = "default_speeds")]
    pub speeds: Vec<f64>,
    #[serde(default)]
    pub plot: PlotConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duty_point: Option<DutyPointConfig>,
}

fn default_speeds() -> Vec<f64> {
    DEFAULT_SPEEDS.to_vec()
}

/// Identity overrides; the source file's own values are used otherwise.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PumpOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceConfig {
    /// Fixed-layout vendor export.
    Vendor { path: PathBuf },
    /// Any table with named columns.
    Generic {
        path: PathBuf,
        columns: ColumnMapping,
    },
    /// A record previously written by `export-json`.
    Json { path: PathBuf },
}

impl SourceConfig {
    pub fn path(&self) -> &Path {
        match self {
            SourceConfig::Vendor { path }
            | SourceConfig::Generic { path, .. }
            | SourceConfig::Json { path } => path,
        }
    }
}

/// Chart overlays.
///
/// `bep` and `por` left unset follow the data: the BEP marker and POR
/// markers are drawn when the pump has an efficiency curve and skipped
/// otherwise. Setting either explicitly on a pump without efficiency
/// fails the run with missing data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bep: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub por: Option<PorMode>,
    pub efficiency: bool,
    pub npshr: bool,
    pub grid: bool,
    /// Mark the scaled BEP on every speed overlay.
    pub speed_bep: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            bep: None,
            por: None,
            efficiency: false,
            npshr: false,
            grid: true,
            speed_bep: false,
            output_dir: None,
            title: None,
        }
    }
}

impl PlotConfig {
    pub fn show_bep(&self, has_efficiency: bool) -> bool {
        self.bep.unwrap_or(has_efficiency)
    }

    pub fn por_mode(&self, has_efficiency: bool) -> PorMode {
        self.por.unwrap_or(if has_efficiency {
            PorMode::Marker
        } else {
            PorMode::None
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DutyPointConfig {
    pub flow: f64,
    pub head: f64,
    #[serde(default)]
    pub as_line: bool,
}

impl AnalysisConfig {
    pub fn new(source: SourceConfig) -> Self {
        Self {
            pump: PumpOverride::default(),
            source,
            speeds: default_speeds(),
            plot: PlotConfig::default(),
            duty_point: None,
        }
    }

    /// Reject configurations that cannot produce a chart.
    pub fn validate(&self) -> AppResult<()> {
        if self.source.path().as_os_str().is_empty() {
            return Err(AppError::Validation("source path is empty".to_string()));
        }
        if let SourceConfig::Generic { columns, .. } = &self.source {
            if columns.flow.trim().is_empty() || columns.head.trim().is_empty() {
                return Err(AppError::Validation(
                    "generic source needs flow and head columns".to_string(),
                ));
            }
        }
        for name in [&self.pump.make, &self.pump.model].into_iter().flatten() {
            if name.trim().is_empty() {
                return Err(AppError::Validation(
                    "pump make/model override must not be blank".to_string(),
                ));
            }
        }
        if let Some(speed) = self.speeds.iter().find(|s| !s.is_finite()) {
            return Err(AppError::Validation(format!(
                "speed {speed} is not a finite percentage"
            )));
        }
        if let Some(duty) = &self.duty_point {
            if !duty.flow.is_finite() || !duty.head.is_finite() {
                return Err(AppError::Validation(
                    "duty point must be finite".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Resolve relative paths against `base` (usually the config file's
    /// directory).
    pub fn resolve_paths(&mut self, base: &Path) {
        let join = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        match &mut self.source {
            SourceConfig::Vendor { path }
            | SourceConfig::Generic { path, .. }
            | SourceConfig::Json { path } => join(path),
        }
        if let Some(dir) = &mut self.plot.output_dir {
            join(dir);
        }
    }
}

/// Load, validate and resolve an analysis config.
pub fn load_config(path: &Path) -> AppResult<AnalysisConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut config: AnalysisConfig = serde_yaml::from_str(&content)?;
    config.validate()?;
    if let Some(base) = path.parent() {
        config.resolve_paths(base);
    }
    tracing::debug!(path = %path.display(), "loaded analysis config");
    Ok(config)
}

pub fn save_config(path: &Path, config: &AnalysisConfig) -> AppResult<()> {
    config.validate()?;
    let content = serde_yaml::to_string(config)?;
    std::fs::write(path, content).map_err(|e| AppError::ConfigWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(())
}

//! pc-app: service layer shared by front ends.
//!
//! Ties the loaders, the pump model and the chart presenter together behind
//! a YAML analysis configuration.

pub mod config;
pub mod error;
pub mod service;

pub use config::{
    AnalysisConfig, DutyPointConfig, PlotConfig, PumpOverride, SourceConfig, load_config,
    save_config,
};
pub use error::{AppError, AppResult};
pub use service::{
    AnalysisReport, analyze, export_json, load_pump, plot_pump, run_config,
};

//! Error types for the pc-app service layer.

use std::path::PathBuf;

/// Unified error for every front end.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to read config file: {path}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write config file: {path}")]
    ConfigWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Config error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("Config validation failed: {0}")]
    Validation(String),

    #[error("Load error: {0}")]
    Load(#[from] pc_io::LoadError),

    #[error("Pump model error: {0}")]
    Pump(#[from] pc_pump::PumpError),

    #[error("Plot error: {0}")]
    Plot(#[from] pc_plot::PlotError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for pc-app operations.
pub type AppResult<T> = Result<T, AppError>;

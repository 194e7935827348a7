//! pc-io: pump curve loading and interchange.
//!
//! Loaders turn tabular exports into a [`CurveRecord`], the normalized flat
//! mapping of named arrays that the rest of the workspace consumes:
//! - [`vendor`]: fixed-layout vendor export (identity block + data table)
//! - [`generic`]: any table, with caller-supplied column names
//! - [`json`]: indented JSON interchange of a record

pub mod generic;
pub mod json;
pub mod record;
pub mod vendor;

pub use generic::{ColumnMapping, load_generic_csv, parse_generic_csv};
pub use json::{read_json, to_json_string, write_json};
pub use record::CurveRecord;
pub use vendor::{load_vendor_csv, parse_vendor_csv};

use pc_pump::PumpError;
use std::path::PathBuf;

pub type LoadResult<T> = Result<T, LoadError>;

#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    /// Malformed or missing column in the source table.
    #[error("Parse error in column '{column}': {reason}")]
    Parse { column: String, reason: String },

    #[error("Failed to read curve file: {path}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Pump model error: {0}")]
    Pump(#[from] PumpError),
}

impl LoadError {
    pub(crate) fn parse(column: impl Into<String>, reason: impl Into<String>) -> Self {
        LoadError::Parse {
            column: column.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn missing_column(column: &str) -> Self {
        Self::parse(column, "column not found")
    }
}

/// Parse one numeric cell, naming the column on failure.
pub(crate) fn parse_cell(column: &str, line: u64, cell: &str) -> LoadResult<f64> {
    let trimmed = cell.trim();
    trimmed.parse::<f64>().map_err(|_| {
        LoadError::parse(
            column,
            format!("line {line}: '{trimmed}' is not a number"),
        )
    })
}

fn open_file(path: &std::path::Path) -> LoadResult<std::fs::File> {
    std::fs::File::open(path).map_err(|source| LoadError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

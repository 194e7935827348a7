//! JSON interchange for curve records.

use std::path::Path;

use crate::record::CurveRecord;
use crate::{LoadError, LoadResult};

/// Indented JSON text of a record.
pub fn to_json_string(record: &CurveRecord) -> LoadResult<String> {
    Ok(serde_json::to_string_pretty(record)?)
}

pub fn write_json(path: &Path, record: &CurveRecord) -> LoadResult<()> {
    let content = to_json_string(record)?;
    std::fs::write(path, content)?;
    tracing::info!(path = %path.display(), "pump curve data saved");
    Ok(())
}

pub fn read_json(path: &Path) -> LoadResult<CurveRecord> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&content)?)
}

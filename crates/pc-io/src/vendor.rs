//! Vendor fixed-layout curve export.
//!
//! Layout of the sheet, 0-based rows:
//!
//! ```text
//! row 0      title row (ignored)
//! row 1..=3  label, value: pump model, motor, impeller
//! row 4      spacer (ignored)
//! row 5      column headings, e.g. "Flow [l/s]", "Head [m]", ...
//! row 6..    data
//! ```
//!
//! Data rows with any empty cell are dropped, so every column ends up
//! sharing the same flow basis.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use crate::record::{self, CurveRecord};
use crate::{LoadError, LoadResult, open_file, parse_cell};

const IDENTITY_ROWS: [(usize, &str); 3] = [
    (1, record::PUMP),
    (2, record::MOTOR),
    (3, record::IMPELLER),
];
const IDENTITY_COLUMN: usize = 1;
const HEADER_ROW: usize = 5;
const DATA_START_ROW: usize = 6;

/// Load a vendor export saved as CSV.
pub fn load_vendor_csv(path: &Path) -> LoadResult<CurveRecord> {
    let record = parse_vendor_csv(open_file(path)?)?;
    tracing::info!(
        path = %path.display(),
        points = record.flow.len(),
        "loaded vendor curve"
    );
    Ok(record)
}

pub fn parse_vendor_csv<R: Read>(mut reader: R) -> LoadResult<CurveRecord> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;

    // Rows are physical lines; the csv reader would skip blank spacer lines
    // and shift the fixed layout.
    let mut rows: BTreeMap<usize, (u64, Vec<String>)> = BTreeMap::new();
    for (row, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        rows.insert(row, (row as u64 + 1, split_row(line)?));
    }

    let mut identity = [None, None, None];
    for (slot, (row, label)) in identity.iter_mut().zip(IDENTITY_ROWS) {
        *slot = rows
            .get(&row)
            .and_then(|(_, cells)| cells.get(IDENTITY_COLUMN))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        if slot.is_none() {
            tracing::debug!(label, row, "identity cell empty");
        }
    }
    let [pump, motor, impeller] = identity;

    let headers: Vec<String> = rows
        .get(&HEADER_ROW)
        .map(|(_, cells)| cells.iter().map(|c| c.trim().to_string()).collect())
        .ok_or_else(|| LoadError::missing_column(record::FLOW))?;

    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); headers.len()];
    let mut dropped = 0usize;
    for (_, (line, cells)) in rows.range(DATA_START_ROW..) {
        let complete = (0..headers.len())
            .all(|i| cells.get(i).is_some_and(|c| !c.trim().is_empty()));
        if !complete {
            dropped += 1;
            continue;
        }
        for (i, header) in headers.iter().enumerate() {
            columns[i].push(parse_cell(header, *line, &cells[i])?);
        }
    }
    if dropped > 0 {
        tracing::warn!(dropped, "dropped incomplete rows from vendor curve");
    }

    let take = |name: &str| -> Option<Vec<f64>> {
        headers
            .iter()
            .position(|h| h == name)
            .map(|i| columns[i].clone())
    };

    Ok(CurveRecord {
        make: None,
        pump,
        motor,
        impeller,
        flow: take(record::FLOW).ok_or_else(|| LoadError::missing_column(record::FLOW))?,
        head: take(record::HEAD).ok_or_else(|| LoadError::missing_column(record::HEAD))?,
        efficiency: take(record::EFFICIENCY),
        efficiency_flow: None,
        npshr: take(record::NPSHR),
        npshr_flow: None,
    })
}

/// Cells of one CSV line, quoting honoured.
fn split_row(line: &str) -> LoadResult<Vec<String>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());
    match csv_reader.records().next() {
        Some(rec) => Ok(rec?.iter().map(str::to_string).collect()),
        None => Ok(Vec::new()),
    }
}

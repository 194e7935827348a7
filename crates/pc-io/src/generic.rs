//! Generic tabular curve export with caller-named columns.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::record::CurveRecord;
use crate::{LoadError, LoadResult, open_file, parse_cell};

/// Which source columns hold which curve.
///
/// Secondary flow columns are optional; without them the series pair with
/// the `flow` column.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub flow: String,
    pub head: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub efficiency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub efficiency_flow: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub npshr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub npshr_flow: Option<String>,
}

impl ColumnMapping {
    pub fn new(flow: impl Into<String>, head: impl Into<String>) -> Self {
        Self {
            flow: flow.into(),
            head: head.into(),
            ..Default::default()
        }
    }

    pub fn with_efficiency(mut self, column: impl Into<String>, flow: Option<String>) -> Self {
        self.efficiency = Some(column.into());
        self.efficiency_flow = flow;
        self
    }

    pub fn with_npshr(mut self, column: impl Into<String>, flow: Option<String>) -> Self {
        self.npshr = Some(column.into());
        self.npshr_flow = flow;
        self
    }
}

/// Load a generic table saved as CSV.
pub fn load_generic_csv(path: &Path, mapping: &ColumnMapping) -> LoadResult<CurveRecord> {
    let record = parse_generic_csv(open_file(path)?, mapping)?;
    tracing::info!(
        path = %path.display(),
        points = record.flow.len(),
        "loaded generic curve"
    );
    Ok(record)
}

/// The first row with any content is the header.
///
/// Every series is read as pairs with its flow column from the same rows;
/// a row where only one of the pair is filled is dropped. A series without
/// its own flow column pairs with `flow`, and when its filled rows differ
/// from the head curve's rows the matching flow cells become its explicit
/// basis, so index `i` always means one measured point.
pub fn parse_generic_csv<R: Read>(reader: R, mapping: &ColumnMapping) -> LoadResult<CurveRecord> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut headers: Option<Vec<String>> = None;
    let mut rows: Vec<(u64, Vec<String>)> = Vec::new();
    for result in csv_reader.records() {
        let rec = result?;
        if rec.iter().all(|c| c.trim().is_empty()) {
            continue;
        }
        let cells: Vec<String> = rec.iter().map(|c| c.trim().to_string()).collect();
        if headers.is_none() {
            headers = Some(cells);
        } else {
            rows.push((rec.position().map_or(0, |p| p.line()), cells));
        }
    }
    let table = Table {
        headers: headers.unwrap_or_default(),
        rows,
    };

    let curve = table.pairs(&mapping.flow, &mapping.head)?;
    let efficiency = mapping
        .efficiency
        .as_deref()
        .map(|name| table.series(name, mapping.efficiency_flow.as_deref(), mapping, &curve))
        .transpose()?;
    let npshr = mapping
        .npshr
        .as_deref()
        .map(|name| table.series(name, mapping.npshr_flow.as_deref(), mapping, &curve))
        .transpose()?;

    let (efficiency, efficiency_flow) = efficiency.map_or((None, None), |(v, b)| (Some(v), b));
    let (npshr, npshr_flow) = npshr.map_or((None, None), |(v, b)| (Some(v), b));
    Ok(CurveRecord {
        make: None,
        pump: None,
        motor: None,
        impeller: None,
        flow: curve.x,
        head: curve.y,
        efficiency,
        efficiency_flow,
        npshr,
        npshr_flow,
    })
}

/// Samples of two columns taken from the same rows.
struct Paired {
    x: Vec<f64>,
    y: Vec<f64>,
    rows: Vec<usize>,
}

struct Table {
    headers: Vec<String>,
    rows: Vec<(u64, Vec<String>)>,
}

impl Table {
    fn index(&self, name: &str) -> LoadResult<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| LoadError::missing_column(name))
    }

    fn pairs(&self, x_name: &str, y_name: &str) -> LoadResult<Paired> {
        let (xi, yi) = (self.index(x_name)?, self.index(y_name)?);
        let cell = |cells: &[String], i: usize| cells.get(i).filter(|c| !c.is_empty()).cloned();

        let mut paired = Paired {
            x: Vec::new(),
            y: Vec::new(),
            rows: Vec::new(),
        };
        let mut unpaired = 0usize;
        for (row, (line, cells)) in self.rows.iter().enumerate() {
            match (cell(cells, xi), cell(cells, yi)) {
                (Some(x), Some(y)) => {
                    paired.x.push(parse_cell(x_name, *line, &x)?);
                    paired.y.push(parse_cell(y_name, *line, &y)?);
                    paired.rows.push(row);
                }
                (None, None) => {}
                _ => unpaired += 1,
            }
        }
        if unpaired > 0 {
            tracing::warn!(
                x = x_name,
                y = y_name,
                unpaired,
                "dropped rows with only one of a column pair filled"
            );
        }
        Ok(paired)
    }

    /// Values and, when it is not the head curve's own flow, their basis.
    fn series(
        &self,
        name: &str,
        basis: Option<&str>,
        mapping: &ColumnMapping,
        curve: &Paired,
    ) -> LoadResult<(Vec<f64>, Option<Vec<f64>>)> {
        let paired = self.pairs(basis.unwrap_or(&mapping.flow), name)?;
        let explicit = basis.is_some() || paired.rows != curve.rows;
        Ok((paired.y, explicit.then_some(paired.x)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
,,,,
Q (l/s),H (m),Eta (%),Q eta (l/s),NPSH (m)
0,52,0,5,
12,50,48,15,2.1
24,45,70,25,2.9
36,37,66,35,4.2
48,26,,,
";

    fn mapping() -> ColumnMapping {
        ColumnMapping::new("Q (l/s)", "H (m)")
            .with_efficiency("Eta (%)", Some("Q eta (l/s)".into()))
            .with_npshr("NPSH (m)", None)
    }

    #[test]
    fn series_keep_their_own_rows() {
        let rec = parse_generic_csv(SAMPLE.as_bytes(), &mapping()).unwrap();
        assert_eq!(rec.flow, vec![0.0, 12.0, 24.0, 36.0, 48.0]);
        assert_eq!(rec.head.len(), 5);
        assert_eq!(rec.efficiency, Some(vec![0.0, 48.0, 70.0, 66.0]));
        assert_eq!(rec.efficiency_flow, Some(vec![5.0, 15.0, 25.0, 35.0]));
        // NPSH is only filled for three of the five flow rows
        assert_eq!(rec.npshr, Some(vec![2.1, 2.9, 4.2]));
        assert_eq!(rec.npshr_flow, Some(vec![12.0, 24.0, 36.0]));
    }

    #[test]
    fn holes_in_different_rows_do_not_shift_pairs() {
        let text = "Q,H\n0,50\n10,\n,44\n30,38\n40,30\n50,20\n";
        let rec = parse_generic_csv(text.as_bytes(), &ColumnMapping::new("Q", "H")).unwrap();
        assert_eq!(rec.flow, vec![0.0, 30.0, 40.0, 50.0]);
        assert_eq!(rec.head, vec![50.0, 38.0, 30.0, 20.0]);
    }

    #[test]
    fn complete_primary_series_shares_flow() {
        let text = "Q,H,Eta\n0,50,0\n10,48,40\n20,44,65\n30,38,72\n";
        let mapping = ColumnMapping::new("Q", "H").with_efficiency("Eta", None);
        let rec = parse_generic_csv(text.as_bytes(), &mapping).unwrap();
        assert_eq!(rec.efficiency, Some(vec![0.0, 40.0, 65.0, 72.0]));
        assert_eq!(rec.efficiency_flow, None);
    }

    #[test]
    fn unknown_column_is_named() {
        let mapping = ColumnMapping::new("Q (l/s)", "Head");
        let err = parse_generic_csv(SAMPLE.as_bytes(), &mapping).unwrap_err();
        match err {
            LoadError::Parse { column, reason } => {
                assert_eq!(column, "Head");
                assert_eq!(reason, "column not found");
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn malformed_optional_column_is_named() {
        let bad = SAMPLE.replace("24,45,70", "24,45,seventy");
        let err = parse_generic_csv(bad.as_bytes(), &mapping()).unwrap_err();
        assert!(matches!(err, LoadError::Parse { ref column, .. } if column == "Eta (%)"));
    }
}

//! Spreadsheet (.xlsx / .xls) reading.
//!
//! Workbooks declare their own encoding, so there is no fallback here: one
//! `calamine` call opens the file, the first worksheet is read, its first row
//! is the header and every later row is data.

use std::path::Path;

use polars::prelude::DataFrame;

use crate::error::Result;

#[cfg(feature = "excel")]
pub fn read_spreadsheet(path: &Path) -> Result<DataFrame> {
    use calamine::{Reader, open_workbook_auto};
    use fusion_model::{CellValue, infer_column};

    use crate::delimited::unique_names;
    use crate::error::IngestError;

    let spreadsheet_error = |message: String| IngestError::Spreadsheet {
        path: path.to_path_buf(),
        message,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| spreadsheet_error(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| IngestError::NoWorksheet {
            path: path.to_path_buf(),
        })?
        .map_err(|e| spreadsheet_error(e.to_string()))?;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Err(IngestError::EmptyFile {
            path: path.to_path_buf(),
        });
    };

    let raw_names: Vec<String> = header.iter().map(ToString::to_string).collect();
    let names = unique_names(&raw_names);
    let mut cells: Vec<Vec<CellValue>> = vec![Vec::with_capacity(range.height()); names.len()];

    for row in rows {
        for (idx, column) in cells.iter_mut().enumerate() {
            column.push(row.get(idx).map_or(CellValue::Missing, cell_value));
        }
    }

    let columns = names
        .iter()
        .zip(&cells)
        .map(|(name, values)| infer_column(name, values))
        .collect();

    tracing::debug!(
        path = %path.display(),
        columns = names.len(),
        rows = cells.first().map_or(0, Vec::len),
        "read first worksheet"
    );

    Ok(DataFrame::new(columns)?)
}

#[cfg(not(feature = "excel"))]
pub fn read_spreadsheet(path: &Path) -> Result<DataFrame> {
    Err(crate::error::IngestError::MissingDependency {
        path: path.to_path_buf(),
        component: "calamine",
        remedy: "rebuild with the `excel` feature enabled",
    })
}

/// Maps a worksheet cell onto the tagged cell value used for type inference.
///
/// Whole-number floats become integers, the way workbook readers usually
/// surface numeric cells typed as plain numbers.
#[cfg(feature = "excel")]
fn cell_value(cell: &calamine::Data) -> fusion_model::CellValue {
    use calamine::Data;
    use fusion_model::CellValue;

    const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

    match cell {
        Data::Empty | Data::Error(_) => CellValue::Missing,
        Data::Int(v) => CellValue::Integer(*v),
        Data::Float(v) if v.fract() == 0.0 && v.abs() < MAX_EXACT_INT => {
            CellValue::Integer(*v as i64)
        }
        Data::Float(v) => CellValue::Float(*v),
        Data::Bool(b) => CellValue::Boolean(*b),
        Data::String(s) if s.is_empty() => CellValue::Missing,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map_or_else(|| CellValue::Text(dt.to_string()), CellValue::DateTime),
        Data::DateTimeIso(s) => parse_iso_datetime(s)
            .map_or_else(|| CellValue::Text(s.clone()), CellValue::DateTime),
        other => CellValue::Text(other.to_string()),
    }
}

/// Parses the ISO 8601 forms workbooks store dates and timestamps in.
#[cfg(feature = "excel")]
fn parse_iso_datetime(value: &str) -> Option<chrono::NaiveDateTime> {
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

    value
        .parse::<NaiveDateTime>()
        .ok()
        .or_else(|| {
            value
                .parse::<NaiveDate>()
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}

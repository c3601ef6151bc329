//! CSV and spreadsheet writers.

use std::fs::File;
use std::path::Path;

use polars::prelude::*;

use crate::error::{OutputError, Result};
use crate::types::OutputFormat;

/// Writes `df` to `path` in the format its extension selects.
///
/// Returns the format that was written.
pub fn write_table(df: &mut DataFrame, path: &Path) -> Result<OutputFormat> {
    let format = OutputFormat::from_path(path);
    match format {
        OutputFormat::Csv => write_csv(df, path)?,
        OutputFormat::Spreadsheet => write_spreadsheet(df, path)?,
    }

    tracing::info!(
        path = %path.display(),
        format = format.label(),
        rows = df.height(),
        columns = df.width(),
        "wrote output"
    );
    Ok(format)
}

/// Writes a CSV file with a header row and no index column.
pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file = File::create(path).map_err(|e| OutputError::write(path, e))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .map_err(|e| OutputError::write(path, e))
}

/// Writes a single-sheet `.xlsx` workbook with a bold header row.
///
/// Null cells are left blank; numbers and booleans keep their cell type.
#[cfg(feature = "excel")]
pub fn write_spreadsheet(df: &mut DataFrame, path: &Path) -> Result<()> {
    let mut workbook = xlsx::build_workbook(df).map_err(|e| OutputError::write(path, e))?;
    workbook.save(path).map_err(|e| OutputError::write(path, e))
}

#[cfg(not(feature = "excel"))]
pub fn write_spreadsheet(_df: &mut DataFrame, _path: &Path) -> Result<()> {
    Err(OutputError::MissingDependency {
        component: "rust_xlsxwriter",
        remedy: "rebuild with the `excel` feature enabled, or write to a .csv file",
    })
}

#[cfg(feature = "excel")]
mod xlsx {
    use polars::prelude::{DataFrame, PolarsError};
    use rust_xlsxwriter::{Format, Workbook, XlsxError};
    use thiserror::Error;

    use fusion_common::{PlainValue, any_to_plain};

    #[derive(Debug, Error)]
    pub(super) enum WorkbookError {
        #[error("xlsx error: {0}")]
        Xlsx(#[from] XlsxError),

        #[error("dataframe error: {0}")]
        Polars(#[from] PolarsError),

        #[error("table of {rows} rows x {columns} columns does not fit in a worksheet")]
        TooLarge { rows: usize, columns: usize },
    }

    pub(super) fn build_workbook(df: &DataFrame) -> Result<Workbook, WorkbookError> {
        let too_large = || WorkbookError::TooLarge {
            rows: df.height(),
            columns: df.width(),
        };

        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();
        let sheet = workbook.add_worksheet();

        for (col_idx, column) in df.get_columns().iter().enumerate() {
            let col = u16::try_from(col_idx).map_err(|_| too_large())?;
            sheet.write_string_with_format(0, col, column.name().as_str(), &header_format)?;

            for row_idx in 0..df.height() {
                let row = u32::try_from(row_idx + 1).map_err(|_| too_large())?;
                match any_to_plain(column.get(row_idx)?) {
                    PlainValue::Null => {}
                    PlainValue::Number(v) => {
                        sheet.write_number(row, col, v)?;
                    }
                    PlainValue::Boolean(b) => {
                        sheet.write_boolean(row, col, b)?;
                    }
                    PlainValue::Text(s) => {
                        sheet.write_string(row, col, s.as_str())?;
                    }
                }
            }
        }

        Ok(workbook)
    }
}

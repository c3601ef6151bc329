//! CSV file reading with encoding fallback.

use std::io::Cursor;
use std::path::Path;

use polars::prelude::*;

use crate::error::{IngestError, Result};

use super::encoding::{FALLBACK_CHAIN, TextEncoding, decode_with_fallback};
use super::header::normalize_header_row;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Reads a CSV file into a Polars DataFrame.
///
/// The bytes go through the encoding fallback chain first; only a decoding
/// failure moves on to the next encoding. Parse errors on decoded text are
/// reported as they are. Column types are inferred from every row and empty
/// fields are missing values.
///
/// Returns the DataFrame and the encoding that decoded the file.
pub fn read_csv_table(path: &Path) -> Result<(DataFrame, TextEncoding)> {
    let bytes = std::fs::read(path).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes);

    let (text, encoding) = decode_with_fallback(bytes).ok_or_else(|| IngestError::Decode {
        path: path.to_path_buf(),
        tried: FALLBACK_CHAIN
            .iter()
            .map(|encoding| encoding.label())
            .collect::<Vec<_>>()
            .join(", "),
    })?;

    let df = parse_csv_text(path, &text)?;
    Ok((df, encoding))
}

fn parse_csv_text(path: &Path, text: &str) -> Result<DataFrame> {
    if text.trim().is_empty() {
        return Err(IngestError::EmptyFile {
            path: path.to_path_buf(),
        });
    }

    let text = normalize_header_row(text).into_owned();

    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .into_reader_with_file_handle(Cursor::new(text.into_bytes()))
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

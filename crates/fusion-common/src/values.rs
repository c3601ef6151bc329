//! Polars `AnyValue` helpers.
//!
//! Output writers and previews only care about four shapes of value:
//! nothing, a number, a boolean, or text. These helpers project any Polars
//! value onto one of them.

use polars::prelude::*;

/// A cell reduced to what output formats can represent.
#[derive(Debug, Clone, PartialEq)]
pub enum PlainValue {
    Null,
    Number(f64),
    Boolean(bool),
    Text(String),
}

/// Projects a Polars value onto a [`PlainValue`].
///
/// Numeric types become `Number`, strings stay text, and any other type
/// (dates, durations, nested values) is rendered with its `Display` form.
pub fn any_to_plain(value: AnyValue<'_>) -> PlainValue {
    match value {
        AnyValue::Null => PlainValue::Null,
        AnyValue::Boolean(b) => PlainValue::Boolean(b),
        AnyValue::Int8(v) => PlainValue::Number(f64::from(v)),
        AnyValue::Int16(v) => PlainValue::Number(f64::from(v)),
        AnyValue::Int32(v) => PlainValue::Number(f64::from(v)),
        AnyValue::Int64(v) => PlainValue::Number(v as f64),
        AnyValue::UInt8(v) => PlainValue::Number(f64::from(v)),
        AnyValue::UInt16(v) => PlainValue::Number(f64::from(v)),
        AnyValue::UInt32(v) => PlainValue::Number(f64::from(v)),
        AnyValue::UInt64(v) => PlainValue::Number(v as f64),
        AnyValue::Float32(v) => PlainValue::Number(f64::from(v)),
        AnyValue::Float64(v) => PlainValue::Number(v),
        AnyValue::String(s) => PlainValue::Text(s.to_string()),
        AnyValue::StringOwned(s) => PlainValue::Text(s.to_string()),
        other => PlainValue::Text(strip_quotes(other.to_string())),
    }
}

/// Converts a Polars value to display text. `Null` becomes an empty string.
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        other => match any_to_plain(other) {
            PlainValue::Null => String::new(),
            PlainValue::Number(v) => format_numeric(v),
            PlainValue::Boolean(b) => b.to_string(),
            PlainValue::Text(s) => s,
        },
    }
}

/// Formats a float without trailing zeros after the decimal point.
///
/// Integer-valued floats like 40.0 are formatted as "40", not "4".
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.');
        if trimmed.is_empty() {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    } else {
        s
    }
}

/// Column names of a frame, in order.
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect()
}

/// First `n` rows of a frame rendered as text, row-major.
pub fn head_rows(df: &DataFrame, n: usize) -> PolarsResult<Vec<Vec<String>>> {
    let height = df.height().min(n);
    let mut rows = Vec::with_capacity(height);
    for row_idx in 0..height {
        let mut row = Vec::with_capacity(df.width());
        for column in df.get_columns() {
            row.push(any_to_string(column.get(row_idx)?));
        }
        rows.push(row);
    }
    Ok(rows)
}

fn strip_quotes(s: String) -> String {
    if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
        s[1..s.len() - 1].to_string()
    } else {
        s
    }
}

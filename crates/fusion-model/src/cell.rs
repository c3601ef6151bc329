//! Tagged cell values and per-column type inference.
//!
//! Loaders that do not get typed columns from their parser (spreadsheets)
//! collect cells as [`CellValue`] and call [`infer_column`] once per column.
//! Inference is best-effort:
//!
//! | Non-missing cells          | Column type |
//! |----------------------------|-------------|
//! | all `Integer`              | `Int64`     |
//! | `Integer` and `Float` only | `Float64`   |
//! | all `Boolean`              | `Boolean`   |
//! | all `DateTime`             | `Datetime`  |
//! | anything else / none       | `String`    |

use std::fmt;

use chrono::NaiveDateTime;
use polars::prelude::{
    Column, Int64Chunked, IntoColumn, IntoSeries, NamedFrom, NewChunkedArray, Series, TimeUnit,
};

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single cell as read from a source file.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Integer(i64),
    Float(f64),
    Text(String),
    Boolean(bool),
    /// Date or timestamp without time zone.
    DateTime(NaiveDateTime),
    Missing,
}

impl CellValue {
    /// Returns true for [`CellValue::Missing`].
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            _ => None,
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    fn as_timestamp_ms(&self) -> Option<i64> {
        match self {
            Self::DateTime(v) => Some(v.and_utc().timestamp_millis()),
            _ => None,
        }
    }

    fn as_text(&self) -> Option<String> {
        match self {
            Self::Missing => None,
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
            Self::Boolean(v) => write!(f, "{v}"),
            Self::DateTime(v) => write!(f, "{}", v.format(DATETIME_FORMAT)),
            Self::Missing => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Integer,
    Float,
    Boolean,
    DateTime,
    Text,
}

fn infer_kind(cells: &[CellValue]) -> ColumnKind {
    let mut kind: Option<ColumnKind> = None;
    for cell in cells {
        let cell_kind = match cell {
            CellValue::Missing => continue,
            CellValue::Integer(_) => ColumnKind::Integer,
            CellValue::Float(_) => ColumnKind::Float,
            CellValue::Boolean(_) => ColumnKind::Boolean,
            CellValue::DateTime(_) => ColumnKind::DateTime,
            CellValue::Text(_) => return ColumnKind::Text,
        };
        kind = Some(match (kind, cell_kind) {
            (None, k) => k,
            (Some(a), b) if a == b => a,
            (Some(ColumnKind::Integer), ColumnKind::Float)
            | (Some(ColumnKind::Float), ColumnKind::Integer) => ColumnKind::Float,
            _ => return ColumnKind::Text,
        });
    }
    kind.unwrap_or(ColumnKind::Text)
}

/// Builds a typed column from raw cells.
pub fn infer_column(name: &str, cells: &[CellValue]) -> Column {
    let series = match infer_kind(cells) {
        ColumnKind::Integer => Series::new(
            name.into(),
            cells.iter().map(CellValue::as_i64).collect::<Vec<_>>(),
        ),
        ColumnKind::Float => Series::new(
            name.into(),
            cells.iter().map(CellValue::as_f64).collect::<Vec<_>>(),
        ),
        ColumnKind::Boolean => Series::new(
            name.into(),
            cells.iter().map(CellValue::as_bool).collect::<Vec<_>>(),
        ),
        ColumnKind::DateTime => Int64Chunked::from_iter_options(
            name.into(),
            cells.iter().map(CellValue::as_timestamp_ms),
        )
        .into_datetime(TimeUnit::Milliseconds, None)
        .into_series(),
        ColumnKind::Text => Series::new(
            name.into(),
            cells.iter().map(CellValue::as_text).collect::<Vec<_>>(),
        ),
    };
    series.into_column()
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::DataType;

    #[test]
    fn test_integer_column() {
        let column = infer_column(
            "id",
            &[CellValue::Integer(1), CellValue::Missing, CellValue::Integer(3)],
        );
        assert_eq!(column.dtype(), &DataType::Int64);
        assert_eq!(column.null_count(), 1);
        assert_eq!(column.len(), 3);
    }

    #[test]
    fn test_integer_and_float_widen_to_float() {
        let column = infer_column("x", &[CellValue::Integer(1), CellValue::Float(2.5)]);
        assert_eq!(column.dtype(), &DataType::Float64);
    }

    #[test]
    fn test_boolean_column() {
        let column = infer_column("flag", &[CellValue::Boolean(true), CellValue::Boolean(false)]);
        assert_eq!(column.dtype(), &DataType::Boolean);
    }

    #[test]
    fn test_mixed_column_falls_back_to_text() {
        let column = infer_column(
            "mixed",
            &[CellValue::Integer(7), CellValue::Text("seven".to_string())],
        );
        assert_eq!(column.dtype(), &DataType::String);
        assert_eq!(column.null_count(), 0);
    }

    #[test]
    fn test_all_missing_is_text_of_nulls() {
        let column = infer_column("empty", &[CellValue::Missing, CellValue::Missing]);
        assert_eq!(column.dtype(), &DataType::String);
        assert_eq!(column.null_count(), 2);
    }

    #[test]
    fn test_datetime_column() {
        let new_year = chrono::NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let column = infer_column(
            "visit",
            &[CellValue::DateTime(new_year), CellValue::Missing],
        );
        assert_eq!(
            column.dtype(),
            &DataType::Datetime(TimeUnit::Milliseconds, None)
        );
        assert_eq!(column.null_count(), 1);
    }

    #[test]
    fn test_datetime_mixed_with_text_renders_iso() {
        let noon = chrono::NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap();
        let column = infer_column(
            "when",
            &[CellValue::DateTime(noon), CellValue::Text("tbd".to_string())],
        );
        assert_eq!(column.dtype(), &DataType::String);
        assert_eq!(
            column.str().unwrap().get(0),
            Some("2024-03-05 12:30:00")
        );
    }

    #[test]
    fn test_display_missing_is_empty() {
        assert_eq!(CellValue::Missing.to_string(), "");
        assert_eq!(CellValue::Float(1.5).to_string(), "1.5");
        assert!(CellValue::Missing.is_missing());
    }
}

//! Output generation for fused tables.
//!
//! The output path's extension picks the writer: `.csv` (any case) gets a
//! delimited-text file, anything else gets an `.xlsx` workbook. Neither
//! writer emits a row index column.

mod error;
mod types;
mod writer;

pub use error::{OutputError, Result};
pub use types::OutputFormat;
pub use writer::{write_csv, write_spreadsheet, write_table};

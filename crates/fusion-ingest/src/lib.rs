//! Input discovery and loading for table fusion.
//!
//! This crate turns a folder of CSV and spreadsheet files into Polars
//! DataFrames, one file at a time, without letting a single bad file stop
//! the batch.
//!
//! # Features
//!
//! - **Discovery**: Non-recursive scan for `.csv`, `.xlsx` and `.xls` files
//! - **CSV Loading**: Ordered encoding fallback (Windows-1252, UTF-8, Latin-1)
//! - **Spreadsheet Loading**: First worksheet via `calamine` (`excel` feature)
//! - **Batch Loading**: Per-file failure isolation with progress callbacks
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use fusion_ingest::{discover_files, load_files};
//!
//! let files = discover_files(Path::new("data/exports"))?;
//! let report = load_files(&files, |done, total| println!("{done}/{total}"));
//! for error in &report.errors {
//!     eprintln!("skipped {error}");
//! }
//! ```

mod delimited;
mod discovery;
mod error;
mod loader;
mod spreadsheet;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use delimited::{FALLBACK_CHAIN, TextEncoding, decode_with_fallback, read_csv_table, unique_names};

// === File Discovery ===
pub use discovery::discover_files;

// === Spreadsheet Reading ===
pub use spreadsheet::read_spreadsheet;

// === Batch Loading ===
pub use loader::{LoadReport, LoadedTable, load_file, load_files};

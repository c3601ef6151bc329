//! Delimited-text (CSV) reading.

mod encoding;
mod header;
mod reader;

pub use encoding::{FALLBACK_CHAIN, TextEncoding, decode_with_fallback};
pub use header::unique_names;
pub use reader::read_csv_table;

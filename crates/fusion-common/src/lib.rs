//! Shared utilities for the table fusion crates.

mod values;

pub use values::{PlainValue, any_to_plain, any_to_string, column_names, format_numeric, head_rows};

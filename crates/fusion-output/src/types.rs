//! Output format selection.

use std::fmt;
use std::path::Path;

/// Serialization format of the output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// Comma-separated text with a header row.
    Csv,
    /// Single-sheet `.xlsx` workbook with a header row.
    Spreadsheet,
}

impl OutputFormat {
    /// Picks the format from the path's extension.
    ///
    /// Only `.csv` (case-insensitive) selects CSV; every other extension,
    /// or none at all, selects the spreadsheet writer.
    pub fn from_path(path: &Path) -> Self {
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv { Self::Csv } else { Self::Spreadsheet }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Csv => "CSV",
            Self::Spreadsheet => "spreadsheet",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

//! Export functionality for audit results.
//!
//! This module flattens per-domain results into report rows and writes them
//! out as CSV, JSONL or a plain stdout table.

mod csv;
mod jsonl;
mod row;
mod table;

pub use csv::export_csv;
pub use jsonl::export_jsonl;
pub use row::{flatten_results, ReportRow};
pub use table::print_table;

use std::path::Path;

/// Export format options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    /// CSV format (flattened view for Excel/Sheets)
    Csv,
    /// JSONL format (one JSON object per row, ideal for jq and ingestion)
    Jsonl,
}

impl ExportFormat {
    /// Picks the format from the output file extension. `None` means the
    /// extension is not recognized.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Some(ExportFormat::Csv),
            Some(ext) if ext.eq_ignore_ascii_case("jsonl") || ext.eq_ignore_ascii_case("json") => {
                Some(ExportFormat::Jsonl)
            }
            _ => None,
        }
    }
}

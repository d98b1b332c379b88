//! CSV export functionality.
//!
//! One row per (domain, record type[, selector]) entry with findings
//! flattened into columns.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use csv::Writer;

use super::row::ReportRow;

/// Writes report rows as CSV to `output`, or stdout when no path is given.
///
/// Returns the number of rows written.
pub fn export_csv(rows: &[ReportRow], output: Option<&PathBuf>) -> Result<usize> {
    // Use a trait object to handle both File and Stdout
    let mut writer: Writer<Box<dyn Write>> = if let Some(output_path) = output {
        let file = std::fs::File::create(output_path).context(format!(
            "Failed to create output file: {}",
            output_path.display()
        ))?;
        Writer::from_writer(Box::new(file) as Box<dyn Write>)
    } else {
        Writer::from_writer(Box::new(io::stdout()) as Box<dyn Write>)
    };

    writer.write_record([
        "domain",
        "record_type",
        "selector",
        "value",
        "severity",
        "message",
    ])?;

    for row in rows {
        writer.write_record([
            &row.domain,
            &row.record_type,
            &row.selector,
            &row.value,
            &row.severity,
            &row.message,
        ])?;
    }

    writer.flush()?;
    Ok(rows.len())
}

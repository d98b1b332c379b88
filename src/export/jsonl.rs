//! JSONL export functionality.
//!
//! Each line is a complete JSON object representing one report row. This
//! format is ideal for piping to `jq` or loading into databases.

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

use super::row::ReportRow;

/// Writes report rows as JSON Lines to `output`, or stdout when no path is
/// given.
///
/// Returns the number of rows written.
pub fn export_jsonl(rows: &[ReportRow], output: Option<&PathBuf>) -> Result<usize> {
    let mut writer: Box<dyn Write> = if let Some(output_path) = output {
        let file = std::fs::File::create(output_path).context(format!(
            "Failed to create output file: {}",
            output_path.display()
        ))?;
        Box::new(BufWriter::new(file))
    } else {
        Box::new(io::stdout())
    };

    for row in rows {
        serde_json::to_writer(&mut writer, row)?;
        writer.write_all(b"\n")?;
    }

    writer.flush()?;
    Ok(rows.len())
}

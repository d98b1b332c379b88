//! Plain stdout table for interactive runs.

use colored::Colorize;

use super::row::ReportRow;

const HEADERS: [&str; 6] = [
    "domain",
    "record_type",
    "selector",
    "value",
    "severity",
    "message",
];

/// Column cap so one long TXT answer does not blow up the terminal.
const MAX_COL_WIDTH: usize = 60;

/// Prints report rows as an aligned table with severities colorized.
pub fn print_table(rows: &[ReportRow]) {
    let mut widths: Vec<usize> = HEADERS.iter().map(|h| h.len()).collect();
    let cells: Vec<[String; 6]> = rows
        .iter()
        .map(|row| {
            [
                truncate(&row.domain),
                truncate(&row.record_type),
                truncate(&row.selector),
                truncate(&row.value),
                truncate(&row.severity),
                truncate(&row.message),
            ]
        })
        .collect();
    for row in &cells {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let line = |cols: &[String]| {
        let padded: Vec<String> = cols
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{:width$}", c, width = widths[i]))
            .collect();
        padded.join("  ")
    };

    println!(
        "{}",
        line(&HEADERS.map(str::to_string)).bold()
    );
    for row in &cells {
        let mut text = line(row);
        text = match row[4].as_str() {
            "CRITICAL" => text.red().to_string(),
            "WARN" => text.yellow().to_string(),
            _ => text,
        };
        println!("{text}");
    }
}

fn truncate(text: &str) -> String {
    if text.len() <= MAX_COL_WIDTH {
        text.to_string()
    } else {
        let cut: String = text.chars().take(MAX_COL_WIDTH - 3).collect();
        format!("{cut}...")
    }
}

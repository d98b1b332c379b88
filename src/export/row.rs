//! Shared report row building logic.
//!
//! Flattening lives here once so the CSV, JSONL and table writers all emit
//! the same view of a result set.

use serde::Serialize;

use crate::engine::{DomainResult, RecordEntry};
use crate::records::RecordOutcome;

/// One flattened report row: a single (domain, record type[, selector])
/// entry with its value and the aggregate of its findings.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub domain: String,
    pub record_type: String,
    /// DKIM selector, empty for every other record type.
    pub selector: String,
    /// Raw answer strings joined with " | "; absence is empty, a resolver
    /// failure shows the failure tag.
    pub value: String,
    /// Highest finding severity, empty when the entry has no findings.
    pub severity: String,
    /// All finding messages joined with "; ", remediation hints in
    /// parentheses.
    pub message: String,
}

impl ReportRow {
    fn from_entry(domain: &str, entry: &RecordEntry) -> Self {
        let value = match &entry.outcome {
            RecordOutcome::Failed(failure) => format!("<lookup failed: {failure}>"),
            _ => entry.raw.join(" | "),
        };

        let severity = entry
            .max_severity()
            .map(|s| s.to_string())
            .unwrap_or_default();

        let message = entry
            .findings
            .iter()
            .map(|f| match &f.remediation {
                Some(hint) => format!("{} ({hint})", f.message),
                None => f.message.clone(),
            })
            .collect::<Vec<_>>()
            .join("; ");

        ReportRow {
            domain: domain.to_string(),
            record_type: entry.kind.to_string(),
            selector: entry.selector.clone().unwrap_or_default(),
            value,
            severity,
            message,
        }
    }
}

/// Flattens results into report rows, preserving result and entry order.
pub fn flatten_results(results: &[DomainResult]) -> Vec<ReportRow> {
    results
        .iter()
        .flat_map(|result| {
            result
                .entries
                .iter()
                .map(|entry| ReportRow::from_entry(&result.domain, entry))
        })
        .collect()
}

//! Per-domain audit results.

use std::collections::BTreeMap;

use crate::records::{RecordKind, RecordOutcome};
use crate::rules::{Finding, Severity};

/// One outcome row: a (kind[, selector]) probe with its raw answers, parsed
/// outcome and findings. Every requested pair yields exactly one entry
/// (success, absence, malformed or resolver failure) so reports are never
/// silently incomplete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordEntry {
    pub kind: RecordKind,
    pub selector: Option<String>,
    /// Raw answer strings as returned by the adapter; empty on absence or
    /// failure.
    pub raw: Vec<String>,
    pub outcome: RecordOutcome,
    /// Empty when best-practice evaluation is disabled; the entry shape is
    /// stable regardless of the flag.
    pub findings: Vec<Finding>,
}

impl RecordEntry {
    /// The most severe finding on this entry, if any.
    pub fn max_severity(&self) -> Option<Severity> {
        self.findings.iter().map(|f| f.severity).max()
    }
}

/// Aggregated result for one domain: one entry per requested record kind
/// plus one per DKIM selector, in the fixed evaluation order. Finalized
/// (read-only) once returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainResult {
    pub domain: String,
    pub entries: Vec<RecordEntry>,
}

impl DomainResult {
    /// All findings across entries, in report order.
    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.entries.iter().flat_map(|e| e.findings.iter())
    }

    /// Finding counts per severity.
    pub fn severity_counts(&self) -> BTreeMap<Severity, usize> {
        let mut counts = BTreeMap::new();
        for finding in self.findings() {
            *counts.entry(finding.severity).or_insert(0) += 1;
        }
        counts
    }
}

//! Per-domain evaluation context for cross-record rules.

use std::collections::BTreeMap;

use crate::records::{RecordKind, RecordOutcome};

/// Already-computed outcomes for one domain, keyed by record kind.
///
/// Written once per kind during the fixed evaluation sequence and read-only
/// thereafter, so DMARC is always available by the time BIMI is evaluated.
/// Local to its domain; cross-domain evaluation shares nothing.
#[derive(Debug, Default)]
pub struct DomainContext {
    outcomes: BTreeMap<RecordKind, RecordOutcome>,
    /// NS hosts that resolved to no A record during the best-effort
    /// delegation probe. Only meaningful when `ns_probe_complete`.
    pub lame_ns_hosts: Vec<String>,
    /// Whether the delegation probe ran and every auxiliary lookup
    /// succeeded. When false the lame-delegation rule stays silent rather
    /// than guessing.
    pub ns_probe_complete: bool,
}

impl DomainContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the outcome for a kind. First write wins: for
    /// selector-scoped kinds only the first selector's outcome is cached,
    /// and nothing currently cross-references DKIM.
    pub fn record(&mut self, kind: RecordKind, outcome: &RecordOutcome) {
        self.outcomes.entry(kind).or_insert_with(|| outcome.clone());
    }

    /// The cached outcome for a kind, if that kind was evaluated.
    pub fn outcome(&self, kind: RecordKind) -> Option<&RecordOutcome> {
        self.outcomes.get(&kind)
    }
}

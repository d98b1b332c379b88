//! Audit targets: what to resolve for one domain.

use crate::records::{RecordKind, EVALUATION_ORDER};

/// One domain plus the record kinds and DKIM selectors requested for it.
/// Immutable once analysis starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainTarget {
    pub domain: String,
    pub record_kinds: Vec<RecordKind>,
    pub dkim_selectors: Vec<String>,
}

impl DomainTarget {
    /// A target requesting every supported record kind and no selectors.
    /// The domain is normalized (trimmed, trailing dot dropped,
    /// lower-cased).
    pub fn new(domain: impl Into<String>) -> Self {
        let domain = domain
            .into()
            .trim()
            .trim_end_matches('.')
            .to_ascii_lowercase();
        DomainTarget {
            domain,
            record_kinds: EVALUATION_ORDER.to_vec(),
            dkim_selectors: Vec::new(),
        }
    }

    /// Restricts the target to the given kinds (deduplicated, request order
    /// is irrelevant; evaluation always follows the fixed sequence).
    pub fn with_kinds(mut self, kinds: impl IntoIterator<Item = RecordKind>) -> Self {
        let mut seen = Vec::new();
        for kind in kinds {
            if !seen.contains(&kind) {
                seen.push(kind);
            }
        }
        self.record_kinds = seen;
        self
    }

    /// Sets the DKIM selectors to probe (trimmed, empties dropped,
    /// deduplicated, order preserved).
    pub fn with_selectors<I, S>(mut self, selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen: Vec<String> = Vec::new();
        for selector in selectors {
            let normalized = selector
                .into()
                .trim()
                .trim_end_matches('.')
                .to_ascii_lowercase();
            if !normalized.is_empty() && !seen.contains(&normalized) {
                seen.push(normalized);
            }
        }
        self.dkim_selectors = seen;
        self
    }
}

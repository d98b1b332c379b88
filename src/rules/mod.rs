//! Best-practice rule evaluation.
//!
//! The rule set is a fixed table (see [`catalogue`]) versioned with the
//! engine: identical DNS input always yields identical findings. Rules run
//! per record outcome, with cross-record dependencies (BIMI needs DMARC,
//! lame-delegation needs the NS probe) satisfied through a per-domain
//! [`DomainContext`] rather than shared state.

mod catalogue;
mod context;

pub use catalogue::{Rule, CATALOGUE};
pub use context::DomainContext;

use strum_macros::Display;

use crate::records::{RecordKind, RecordOutcome};

#[cfg(test)]
mod tests;

/// Finding severity, ordered from informational to likely-broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Severity {
    Info,
    Warn,
    Critical,
}

/// One rule hit attached to a record outcome. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub kind: RecordKind,
    /// DKIM selector the finding refers to, where applicable.
    pub selector: Option<String>,
    pub severity: Severity,
    pub message: String,
    pub remediation: Option<String>,
}

impl Finding {
    pub fn new(kind: RecordKind, severity: Severity, message: impl Into<String>) -> Self {
        Finding {
            kind,
            selector: None,
            severity,
            message: message.into(),
            remediation: None,
        }
    }

    pub fn with_remediation(mut self, hint: impl Into<String>) -> Self {
        self.remediation = Some(hint.into());
        self
    }
}

/// Evaluates one record outcome against the catalogue.
///
/// Generic conditions are handled first and short-circuit: a malformed or
/// ambiguous record is CRITICAL on its own and none of the per-kind rules
/// run on top of it (a broken record must not also be scored as if parsed),
/// and a resolver failure is merely "could not verify".
pub fn evaluate(
    kind: RecordKind,
    selector: Option<&str>,
    outcome: &RecordOutcome,
    ctx: &DomainContext,
) -> Vec<Finding> {
    let mut findings = match outcome {
        RecordOutcome::Failed(failure) => vec![Finding::new(
            kind,
            Severity::Info,
            format!("could not verify: lookup failed ({failure})"),
        )],
        RecordOutcome::Malformed { reason, .. } => vec![Finding::new(
            kind,
            Severity::Critical,
            format!("record present but malformed: {reason}"),
        )],
        RecordOutcome::Ambiguous { answers } => vec![Finding::new(
            kind,
            Severity::Critical,
            format!(
                "ambiguous record: {} TXT answers carry the {} version tag",
                answers.len(),
                kind
            ),
        )
        .with_remediation(format!("Publish exactly one {kind} record"))],
        RecordOutcome::Parsed(_) | RecordOutcome::Absent => CATALOGUE
            .iter()
            .filter(|rule| rule.kind == kind)
            .flat_map(|rule| (rule.check)(kind, outcome, selector, ctx))
            .collect(),
    };

    for finding in &mut findings {
        if finding.selector.is_none() {
            finding.selector = selector.map(str::to_string);
        }
    }
    findings
}

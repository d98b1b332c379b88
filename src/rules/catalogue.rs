//! The fixed best-practice rule table.
//!
//! Each entry pairs a record kind with a check function evaluated against
//! the parsed (or absent) outcome. Representing the catalogue as data keeps
//! the rules table-testable and the severity classification stable across
//! runs on identical DNS input.

use std::net::IpAddr;

use crate::records::{ParsedRecord, Qualifier, RecordKind, RecordOutcome};

use super::context::DomainContext;
use super::{Finding, Severity};

/// Check signature: outcome is always `Parsed` or `Absent` here; failures,
/// malformed and ambiguous records are handled generically before the table
/// is consulted.
pub type CheckFn = fn(RecordKind, &RecordOutcome, Option<&str>, &DomainContext) -> Vec<Finding>;

pub struct Rule {
    pub kind: RecordKind,
    pub check: CheckFn,
}

/// The rule catalogue, in no particular order; evaluation order is owned by
/// the engine's fixed sequence.
pub const CATALOGUE: &[Rule] = &[
    Rule {
        kind: RecordKind::Ns,
        check: check_ns,
    },
    Rule {
        kind: RecordKind::A,
        check: check_addresses,
    },
    Rule {
        kind: RecordKind::Aaaa,
        check: check_addresses,
    },
    Rule {
        kind: RecordKind::Mx,
        check: check_mx,
    },
    Rule {
        kind: RecordKind::Spf,
        check: check_spf,
    },
    Rule {
        kind: RecordKind::Dmarc,
        check: check_dmarc,
    },
    Rule {
        kind: RecordKind::Dkim,
        check: check_dkim,
    },
    Rule {
        kind: RecordKind::Bimi,
        check: check_bimi,
    },
];

/// RFC 7208 limit on DNS-querying mechanisms per SPF evaluation.
const SPF_LOOKUP_LIMIT: usize = 10;
/// Single TXT character-strings above this length need splitting.
const TXT_STRING_LIMIT: usize = 255;
/// DKIM RSA key strength thresholds.
const DKIM_MIN_BITS: u32 = 1024;
const DKIM_RECOMMENDED_BITS: u32 = 2048;

fn check_spf(
    kind: RecordKind,
    outcome: &RecordOutcome,
    _selector: Option<&str>,
    _ctx: &DomainContext,
) -> Vec<Finding> {
    let record = match outcome {
        RecordOutcome::Absent => {
            return vec![
                Finding::new(kind, Severity::Warn, "no SPF record published").with_remediation(
                    "Publish a v=spf1 TXT record listing authorized senders",
                ),
            ]
        }
        RecordOutcome::Parsed(ParsedRecord::Spf(record)) => record,
        _ => return Vec::new(),
    };

    let mut findings = Vec::new();

    let lookups = record.lookup_mechanisms();
    if lookups > SPF_LOOKUP_LIMIT {
        findings.push(
            Finding::new(
                kind,
                Severity::Critical,
                format!(
                    "{lookups} DNS-querying mechanisms exceed the limit of \
                     {SPF_LOOKUP_LIMIT}; verifiers will return PermError"
                ),
            )
            .with_remediation("Flatten includes or drop unused mechanisms"),
        );
    }

    match record.terminal_all() {
        Some(Qualifier::Pass) => findings.push(
            Finding::new(
                kind,
                Severity::Critical,
                "record ends with +all, authorizing any sender",
            )
            .with_remediation("End the record with -all or ~all"),
        ),
        Some(Qualifier::Neutral) => findings.push(Finding::new(
            kind,
            Severity::Warn,
            "record ends with ?all, asserting no policy",
        )),
        Some(Qualifier::Fail | Qualifier::SoftFail) => {}
        None => {
            // A redirect= takes over policy duty; only flag a genuinely
            // open-ended record
            if !record.has_all() && record.redirect.is_none() {
                findings.push(Finding::new(
                    kind,
                    Severity::Warn,
                    "missing terminal all mechanism",
                ));
            }
        }
    }

    if record.raw.len() > TXT_STRING_LIMIT {
        findings.push(Finding::new(
            kind,
            Severity::Warn,
            format!(
                "record is {} characters; single TXT strings over {TXT_STRING_LIMIT} \
                 octets must be split",
                record.raw.len()
            ),
        ));
    }

    findings
}

fn check_dmarc(
    kind: RecordKind,
    outcome: &RecordOutcome,
    _selector: Option<&str>,
    _ctx: &DomainContext,
) -> Vec<Finding> {
    let record = match outcome {
        RecordOutcome::Absent => {
            return vec![
                Finding::new(kind, Severity::Warn, "no DMARC record published")
                    .with_remediation("Publish a v=DMARC1 record at _dmarc.<domain>"),
            ]
        }
        RecordOutcome::Parsed(ParsedRecord::Dmarc(record)) => record,
        _ => return Vec::new(),
    };

    let mut findings = Vec::new();

    if !record.policy.is_enforcing() {
        findings.push(
            Finding::new(
                kind,
                Severity::Warn,
                "policy is none: monitoring only, not enforced",
            )
            .with_remediation("Move to p=quarantine or p=reject once reports look clean"),
        );
    }

    if record.pct < 100 && record.policy.is_enforcing() {
        findings.push(Finding::new(
            kind,
            Severity::Info,
            format!(
                "partial enforcement: pct={} applies {} to only part of the mail stream",
                record.pct,
                record.policy.as_str()
            ),
        ));
    }

    if record.rua.is_empty() {
        findings.push(Finding::new(
            kind,
            Severity::Info,
            "no aggregate report address (rua=)",
        ));
    }

    findings
}

fn check_dkim(
    kind: RecordKind,
    outcome: &RecordOutcome,
    selector: Option<&str>,
    _ctx: &DomainContext,
) -> Vec<Finding> {
    let record = match outcome {
        RecordOutcome::Absent => {
            let message = match selector {
                Some(sel) => format!("selector `{sel}` is not published"),
                None => "DKIM requested but no selectors were provided".to_string(),
            };
            return vec![Finding::new(kind, Severity::Warn, message)];
        }
        RecordOutcome::Parsed(ParsedRecord::Dkim(record)) => record,
        _ => return Vec::new(),
    };

    let mut findings = Vec::new();

    if record.duplicates > 0 {
        findings.push(Finding::new(
            kind,
            Severity::Warn,
            format!(
                "{} extra TXT answer(s) published at this selector",
                record.duplicates
            ),
        ));
    }

    if record.public_key.is_none() {
        findings.push(Finding::new(
            kind,
            Severity::Warn,
            "empty p= tag: the key is revoked",
        ));
        return findings;
    }

    match record.key_type.as_str() {
        "rsa" => {
            // Best-effort estimate from the base64 length of the key
            if let Some(bits) = record.estimated_key_bits() {
                if bits < DKIM_MIN_BITS {
                    findings.push(
                        Finding::new(
                            kind,
                            Severity::Critical,
                            format!("RSA key is roughly {bits} bits, below {DKIM_MIN_BITS}"),
                        )
                        .with_remediation("Rotate to a 2048-bit key"),
                    );
                } else if bits < DKIM_RECOMMENDED_BITS {
                    findings.push(Finding::new(
                        kind,
                        Severity::Warn,
                        format!(
                            "RSA key is roughly {bits} bits, below the recommended \
                             {DKIM_RECOMMENDED_BITS}"
                        ),
                    ));
                }
            }
        }
        "ed25519" => {}
        other => findings.push(Finding::new(
            kind,
            Severity::Warn,
            format!("unrecognized key type `{other}`"),
        )),
    }

    findings
}

fn check_bimi(
    kind: RecordKind,
    outcome: &RecordOutcome,
    _selector: Option<&str>,
    ctx: &DomainContext,
) -> Vec<Finding> {
    let record = match outcome {
        RecordOutcome::Absent => {
            return vec![Finding::new(
                kind,
                Severity::Info,
                "no BIMI record (optional)",
            )]
        }
        RecordOutcome::Parsed(ParsedRecord::Bimi(record)) => record,
        _ => return Vec::new(),
    };

    let mut findings = Vec::new();

    // BIMI's trust model depends on DMARC enforcement, so the DMARC outcome
    // for the same domain is cross-referenced from the context (DMARC is
    // always evaluated earlier in the fixed sequence).
    match ctx.outcome(RecordKind::Dmarc) {
        Some(RecordOutcome::Failed(failure)) => findings.push(Finding::new(
            kind,
            Severity::Info,
            format!("dependent check skipped: DMARC unavailable ({failure})"),
        )),
        None => findings.push(Finding::new(
            kind,
            Severity::Info,
            "dependent check skipped: DMARC was not evaluated",
        )),
        Some(RecordOutcome::Parsed(ParsedRecord::Dmarc(dmarc))) if dmarc.policy.is_enforcing() => {}
        Some(_) => findings.push(
            Finding::new(
                kind,
                Severity::Warn,
                "BIMI requires an enforced DMARC policy (quarantine or reject)",
            )
            .with_remediation("Mailbox providers ignore BIMI without DMARC enforcement"),
        ),
    }

    if record.logo_uri.is_none() {
        findings.push(Finding::new(kind, Severity::Warn, "missing l= logo URI"));
    }
    if record.evidence_uri.is_none() {
        findings.push(Finding::new(
            kind,
            Severity::Warn,
            "missing a= evidence (VMC certificate) URI",
        ));
    }

    findings
}

fn check_mx(
    kind: RecordKind,
    outcome: &RecordOutcome,
    _selector: Option<&str>,
    _ctx: &DomainContext,
) -> Vec<Finding> {
    let exchanges = match outcome {
        RecordOutcome::Absent => {
            return vec![Finding::new(
                kind,
                Severity::Warn,
                "no mail exchanger published",
            )]
        }
        RecordOutcome::Parsed(ParsedRecord::Mx(exchanges)) => exchanges,
        _ => return Vec::new(),
    };

    let mut findings = Vec::new();

    if exchanges.len() > 1 {
        let first = exchanges[0].priority;
        if exchanges.iter().all(|mx| mx.priority == first) {
            findings.push(Finding::new(
                kind,
                Severity::Warn,
                format!(
                    "all {} exchangers share priority {first}; no failover ordering",
                    exchanges.len()
                ),
            ));
        }
    }

    findings
}

fn check_addresses(
    kind: RecordKind,
    outcome: &RecordOutcome,
    _selector: Option<&str>,
    _ctx: &DomainContext,
) -> Vec<Finding> {
    let addresses = match outcome {
        RecordOutcome::Parsed(ParsedRecord::Addresses(addresses)) => addresses,
        _ => return Vec::new(),
    };

    addresses
        .iter()
        .filter(|addr| is_private(addr))
        .map(|addr| {
            Finding::new(
                kind,
                Severity::Warn,
                format!("{addr} is a private or non-routable address"),
            )
        })
        .collect()
}

fn check_ns(
    kind: RecordKind,
    outcome: &RecordOutcome,
    _selector: Option<&str>,
    ctx: &DomainContext,
) -> Vec<Finding> {
    let mut findings = Vec::new();

    let count = match outcome {
        RecordOutcome::Absent => 0,
        RecordOutcome::Parsed(ParsedRecord::Hosts(hosts)) => hosts.len(),
        _ => return Vec::new(),
    };

    if count < 2 {
        findings.push(Finding::new(
            kind,
            Severity::Warn,
            format!("only {count} nameserver(s) configured; no redundancy"),
        ));
    }

    // Best-effort: silent unless every auxiliary lookup of the probe landed
    if ctx.ns_probe_complete && !ctx.lame_ns_hosts.is_empty() {
        findings.push(Finding::new(
            kind,
            Severity::Info,
            format!(
                "possible lame delegation: {} resolve(s) to no address",
                ctx.lame_ns_hosts.join(", ")
            ),
        ));
    }

    findings
}

fn is_private(addr: &IpAddr) -> bool {
    match addr {
        IpAddr::V4(v4) => v4.is_private() || v4.is_loopback() || v4.is_link_local(),
        // Loopback or unique-local (fc00::/7)
        IpAddr::V6(v6) => v6.is_loopback() || (v6.segments()[0] & 0xfe00) == 0xfc00,
    }
}

//! Classification of raw answers into per-kind outcomes.

use crate::resolver::{RawAnswer, ResolveFailure};

use super::bimi::BimiRecord;
use super::dkim::DkimRecord;
use super::dmarc::DmarcRecord;
use super::host::{parse_addresses, parse_hosts, parse_mx, parse_soa, MxExchange, SoaRecord};
use super::kind::RecordKind;
use super::spf::SpfRecord;

/// A successfully parsed record, tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedRecord {
    /// A / AAAA
    Addresses(Vec<std::net::IpAddr>),
    /// NS / CNAME
    Hosts(Vec<String>),
    Mx(Vec<MxExchange>),
    Txt(Vec<String>),
    Spf(SpfRecord),
    Dmarc(DmarcRecord),
    Dkim(DkimRecord),
    Bimi(BimiRecord),
    Soa(SoaRecord),
    /// CAA answers kept in presentation form; no rules evaluate them.
    Caa(Vec<String>),
}

/// The outcome of resolving and parsing one (domain, kind[, selector]).
///
/// Absent, malformed, ambiguous and resolver-failure are distinct variants
/// because the rule evaluator reacts differently to each; collapsing any two
/// would produce false findings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Parsed(ParsedRecord),
    /// The query succeeded but no matching record is published.
    Absent,
    /// A record is present but its text does not parse.
    Malformed { raw: String, reason: String },
    /// More than one answer carries the kind's version tag; per RFC the
    /// record set is invalid and no single answer may be silently picked.
    Ambiguous { answers: Vec<String> },
    /// The resolver could not produce an answer at all.
    Failed(ResolveFailure),
}

impl RecordOutcome {
    /// Turns a raw resolution result into the outcome for `kind`.
    ///
    /// Never panics; every malformation is captured as a variant.
    pub fn classify(kind: RecordKind, raw: &RawAnswer) -> RecordOutcome {
        let answers = match raw {
            RawAnswer::Failed(failure) => return RecordOutcome::Failed(*failure),
            RawAnswer::Answers(list) => list,
        };

        // TXT-overlay kinds select their answers by version tag; more than
        // one match is an ambiguous record, zero is absence even when other
        // TXT strings exist at the name.
        if let Some(tag) = kind.version_tag() {
            let matches: Vec<&String> = answers
                .iter()
                .filter(|a| {
                    let t = a.trim().as_bytes();
                    t.len() >= tag.len() && t[..tag.len()].eq_ignore_ascii_case(tag.as_bytes())
                })
                .collect();
            return match matches.len() {
                0 => RecordOutcome::Absent,
                1 => Self::parse_one(kind, matches[0]),
                _ => RecordOutcome::Ambiguous {
                    answers: matches.into_iter().cloned().collect(),
                },
            };
        }

        if answers.is_empty() {
            return RecordOutcome::Absent;
        }

        match kind {
            RecordKind::A | RecordKind::Aaaa => wrap(
                parse_addresses(answers).map(ParsedRecord::Addresses),
                answers,
            ),
            RecordKind::Ns | RecordKind::Cname => {
                RecordOutcome::Parsed(ParsedRecord::Hosts(parse_hosts(answers)))
            }
            RecordKind::Mx => wrap(parse_mx(answers).map(ParsedRecord::Mx), answers),
            RecordKind::Txt => RecordOutcome::Parsed(ParsedRecord::Txt(answers.clone())),
            RecordKind::Soa => wrap(parse_soa(answers).map(ParsedRecord::Soa), answers),
            RecordKind::Caa => RecordOutcome::Parsed(ParsedRecord::Caa(answers.clone())),
            RecordKind::Dkim => {
                let mut record = match DkimRecord::parse(&answers[0]) {
                    Ok(r) => r,
                    Err(reason) => {
                        return RecordOutcome::Malformed {
                            raw: answers[0].clone(),
                            reason,
                        }
                    }
                };
                record.duplicates = answers.len() - 1;
                RecordOutcome::Parsed(ParsedRecord::Dkim(record))
            }
            // Version-tagged kinds were handled above; keep a non-panicking
            // fallback anyway
            RecordKind::Spf | RecordKind::Dmarc | RecordKind::Bimi => {
                Self::parse_one(kind, &answers[0])
            }
        }
    }

    fn parse_one(kind: RecordKind, text: &str) -> RecordOutcome {
        let parsed = match kind {
            RecordKind::Spf => SpfRecord::parse(text).map(ParsedRecord::Spf),
            RecordKind::Dmarc => DmarcRecord::parse(text).map(ParsedRecord::Dmarc),
            RecordKind::Bimi => BimiRecord::parse(text).map(ParsedRecord::Bimi),
            _ => Err(format!("no single-answer parser for {kind}")),
        };
        match parsed {
            Ok(record) => RecordOutcome::Parsed(record),
            Err(reason) => RecordOutcome::Malformed {
                raw: text.to_string(),
                reason,
            },
        }
    }

    /// Whether the outcome is a resolver failure (as opposed to a definite
    /// answer about the record's presence or shape).
    pub fn is_failure(&self) -> bool {
        matches!(self, RecordOutcome::Failed(_))
    }
}

fn wrap(result: Result<ParsedRecord, String>, answers: &[String]) -> RecordOutcome {
    match result {
        Ok(record) => RecordOutcome::Parsed(record),
        Err(reason) => RecordOutcome::Malformed {
            raw: answers.join(" | "),
            reason,
        },
    }
}

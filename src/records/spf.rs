//! SPF record parser (RFC 7208 presentation syntax, audit-oriented).
//!
//! The parser keeps every term in order, counts DNS-lookup mechanisms
//! (include/a/mx/ptr/exists plus the redirect modifier, the quantities that
//! count toward the 10-lookup limit) and preserves unknown modifiers
//! verbatim so they can be reported without being evaluated.

/// Qualifier prefix on a directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Qualifier {
    /// `+` (also the default when no qualifier is written)
    Pass,
    /// `-`
    Fail,
    /// `~`
    SoftFail,
    /// `?`
    Neutral,
}

impl Qualifier {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Qualifier::Pass),
            '-' => Some(Qualifier::Fail),
            '~' => Some(Qualifier::SoftFail),
            '?' => Some(Qualifier::Neutral),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Qualifier::Pass => '+',
            Qualifier::Fail => '-',
            Qualifier::SoftFail => '~',
            Qualifier::Neutral => '?',
        }
    }
}

/// SPF mechanism variants. CIDR suffixes are kept as part of the argument
/// text; the audit rules only care about mechanism identity and ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mechanism {
    All,
    Include { domain: String },
    A { domain: Option<String> },
    Mx { domain: Option<String> },
    Ptr { domain: Option<String> },
    Ip4 { network: String },
    Ip6 { network: String },
    Exists { domain: String },
}

impl Mechanism {
    /// Whether evaluating this mechanism costs a DNS lookup (the quantities
    /// bounded by the RFC 7208 10-lookup limit).
    pub fn requires_lookup(&self) -> bool {
        matches!(
            self,
            Mechanism::Include { .. }
                | Mechanism::A { .. }
                | Mechanism::Mx { .. }
                | Mechanism::Ptr { .. }
                | Mechanism::Exists { .. }
        )
    }
}

/// A qualifier + mechanism pair, in record order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpfTerm {
    pub qualifier: Qualifier,
    pub mechanism: Mechanism,
}

/// Parsed SPF record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpfRecord {
    pub terms: Vec<SpfTerm>,
    pub redirect: Option<String>,
    pub explanation: Option<String>,
    /// Modifiers the parser does not understand, preserved verbatim.
    pub unknown_modifiers: Vec<(String, String)>,
    /// The original TXT string, kept for length checks and reporting.
    pub raw: String,
}

impl SpfRecord {
    /// Parses a TXT string that has already been identified as SPF
    /// (starts with `v=spf1`).
    ///
    /// Unknown modifiers (`name=value`) are tolerated and preserved; an
    /// unrecognized bare term makes the record malformed.
    pub fn parse(text: &str) -> Result<SpfRecord, String> {
        let trimmed = text.trim();
        let valid_prefix = trimmed.len() >= 6
            && trimmed.as_bytes()[..6].eq_ignore_ascii_case(b"v=spf1")
            && trimmed.as_bytes().get(6).map_or(true, |b| b.is_ascii_whitespace());
        if !valid_prefix {
            return Err("missing v=spf1 version tag".to_string());
        }
        let rest = &trimmed[6..];

        let mut record = SpfRecord {
            terms: Vec::new(),
            redirect: None,
            explanation: None,
            unknown_modifiers: Vec::new(),
            raw: trimmed.to_string(),
        };

        for token in rest.split_whitespace() {
            // Modifiers use '=', mechanisms use ':' (or nothing)
            if let Some((name, value)) = split_modifier(token) {
                match name.as_str() {
                    "redirect" => record.redirect = Some(value),
                    "exp" => record.explanation = Some(value),
                    _ => record.unknown_modifiers.push((name, value)),
                }
                continue;
            }

            let (qualifier, body) = match token.chars().next().and_then(Qualifier::from_char) {
                Some(q) => (q, &token[1..]),
                None => (Qualifier::Pass, token),
            };
            if body.is_empty() {
                return Err(format!("dangling qualifier `{token}`"));
            }

            let (name, arg) = match body.split_once(':') {
                Some((n, a)) => (n, Some(a)),
                None => {
                    // Strip a CIDR suffix so "a/24" still names mechanism "a"
                    let n = body.split('/').next().unwrap_or(body);
                    (n, None)
                }
            };

            let mechanism = match (name.to_ascii_lowercase().as_str(), arg) {
                ("all", None) => Mechanism::All,
                ("include", Some(d)) if !d.is_empty() => Mechanism::Include {
                    domain: d.to_string(),
                },
                ("a", d) => Mechanism::A {
                    domain: d.map(str::to_string),
                },
                ("mx", d) => Mechanism::Mx {
                    domain: d.map(str::to_string),
                },
                ("ptr", d) => Mechanism::Ptr {
                    domain: d.map(str::to_string),
                },
                ("ip4", Some(n)) if !n.is_empty() => Mechanism::Ip4 {
                    network: n.to_string(),
                },
                ("ip6", Some(n)) if !n.is_empty() => Mechanism::Ip6 {
                    network: n.to_string(),
                },
                ("exists", Some(d)) if !d.is_empty() => Mechanism::Exists {
                    domain: d.to_string(),
                },
                _ => return Err(format!("unrecognized term `{token}`")),
            };

            record.terms.push(SpfTerm {
                qualifier,
                mechanism,
            });
        }

        Ok(record)
    }

    /// Number of terms that cost a DNS lookup, plus one for a redirect
    /// modifier. More than 10 causes a PermError at verifiers.
    pub fn lookup_mechanisms(&self) -> usize {
        let terms = self
            .terms
            .iter()
            .filter(|t| t.mechanism.requires_lookup())
            .count();
        terms + usize::from(self.redirect.is_some())
    }

    /// Qualifier of the terminal `all` mechanism, if the record has one.
    pub fn terminal_all(&self) -> Option<Qualifier> {
        match self.terms.last() {
            Some(SpfTerm {
                qualifier,
                mechanism: Mechanism::All,
            }) => Some(*qualifier),
            _ => None,
        }
    }

    /// Whether any term is an `all` mechanism, terminal or not.
    pub fn has_all(&self) -> bool {
        self.terms
            .iter()
            .any(|t| matches!(t.mechanism, Mechanism::All))
    }
}

/// Splits a modifier token (`name=value` where name is alphanumeric).
/// Returns `None` for mechanism tokens, including ip4/ip6 whose arguments
/// follow a `:`.
fn split_modifier(token: &str) -> Option<(String, String)> {
    let (name, value) = token.split_once('=')?;
    if name.is_empty()
        || !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
    {
        return None;
    }
    Some((name.to_ascii_lowercase(), value.to_string()))
}

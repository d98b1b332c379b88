//! DMARC record parser.

use std::str::FromStr;

use super::tags::{find_tag, parse_tag_list, Tag};

/// The three DMARC dispositions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DmarcPolicy {
    None,
    Quarantine,
    Reject,
}

impl DmarcPolicy {
    /// Whether receivers are instructed to act on failures.
    pub fn is_enforcing(self) -> bool {
        matches!(self, DmarcPolicy::Quarantine | DmarcPolicy::Reject)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DmarcPolicy::None => "none",
            DmarcPolicy::Quarantine => "quarantine",
            DmarcPolicy::Reject => "reject",
        }
    }
}

impl FromStr for DmarcPolicy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(DmarcPolicy::None),
            "quarantine" => Ok(DmarcPolicy::Quarantine),
            "reject" => Ok(DmarcPolicy::Reject),
            _ => Err(()),
        }
    }
}

/// Parsed DMARC record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DmarcRecord {
    pub policy: DmarcPolicy,
    pub subdomain_policy: Option<DmarcPolicy>,
    /// Percentage of failing mail the policy applies to. Defaults to 100;
    /// invalid values are ignored (tag dropped), matching receiver behavior.
    pub pct: u8,
    /// Aggregate report URIs (`rua=`), comma-split.
    pub rua: Vec<String>,
    /// Forensic report URIs (`ruf=`), comma-split.
    pub ruf: Vec<String>,
    /// Tags the parser does not understand, preserved but never evaluated.
    pub unknown_tags: Vec<Tag>,
}

impl DmarcRecord {
    /// Parses a TXT string already identified as DMARC.
    ///
    /// `v=DMARC1` must be the first tag and `p=` must be present with a
    /// valid disposition; anything else is a malformed record.
    pub fn parse(text: &str) -> Result<DmarcRecord, String> {
        let tags = parse_tag_list(text);

        match tags.first() {
            Some(tag) if tag.name == "v" && tag.value.eq_ignore_ascii_case("DMARC1") => {}
            _ => return Err("first tag must be v=DMARC1".to_string()),
        }

        let policy = match find_tag(&tags, "p") {
            Some(tag) => tag
                .value
                .parse::<DmarcPolicy>()
                .map_err(|()| format!("invalid policy `p={}`", tag.value))?,
            None => return Err("missing required p= tag".to_string()),
        };

        let subdomain_policy =
            find_tag(&tags, "sp").and_then(|tag| tag.value.parse::<DmarcPolicy>().ok());

        let pct = find_tag(&tags, "pct")
            .and_then(|tag| tag.value.parse::<u8>().ok())
            .filter(|p| *p <= 100)
            .unwrap_or(100);

        let rua = find_tag(&tags, "rua").map(uri_list).unwrap_or_default();
        let ruf = find_tag(&tags, "ruf").map(uri_list).unwrap_or_default();

        let unknown_tags = tags
            .into_iter()
            .filter(|t| !matches!(t.name.as_str(), "v" | "p" | "sp" | "pct" | "rua" | "ruf"))
            .collect();

        Ok(DmarcRecord {
            policy,
            subdomain_policy,
            pct,
            rua,
            ruf,
            unknown_tags,
        })
    }
}

fn uri_list(tag: &Tag) -> Vec<String> {
    tag.value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

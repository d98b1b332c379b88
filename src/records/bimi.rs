//! BIMI record parser.

use super::tags::{find_tag, parse_tag_list, Tag};

/// Parsed BIMI record.
///
/// BIMI publishes a brand logo reference whose trust model depends on an
/// enforced DMARC policy; that cross-record rule lives in the evaluator, not
/// here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BimiRecord {
    /// `l=` logo URI (SVG). An empty value is "declined to participate".
    pub logo_uri: Option<String>,
    /// `a=` evidence authority URI (VMC certificate).
    pub evidence_uri: Option<String>,
    pub unknown_tags: Vec<Tag>,
}

impl BimiRecord {
    /// Parses a TXT string already identified as BIMI (`v=BIMI1` first).
    pub fn parse(text: &str) -> Result<BimiRecord, String> {
        let tags = parse_tag_list(text);

        match tags.first() {
            Some(tag) if tag.name == "v" && tag.value.eq_ignore_ascii_case("BIMI1") => {}
            _ => return Err("first tag must be v=BIMI1".to_string()),
        }

        let logo_uri = find_tag(&tags, "l")
            .map(|t| t.value.clone())
            .filter(|v| !v.is_empty());
        let evidence_uri = find_tag(&tags, "a")
            .map(|t| t.value.clone())
            .filter(|v| !v.is_empty());

        let unknown_tags = tags
            .into_iter()
            .filter(|t| !matches!(t.name.as_str(), "v" | "l" | "a"))
            .collect();

        Ok(BimiRecord {
            logo_uri,
            evidence_uri,
            unknown_tags,
        })
    }
}

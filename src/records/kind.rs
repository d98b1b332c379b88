//! Record kind enumeration and the fixed evaluation order.

use hickory_resolver::proto::rr::RecordType;
use strum_macros::{Display, EnumIter, EnumString};

/// The logical record kinds this auditor understands.
///
/// SPF, DMARC, DKIM and BIMI are logical kinds layered over TXT queries at
/// well-known names; the rest map one-to-one onto wire record types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter, EnumString)]
#[strum(ascii_case_insensitive, serialize_all = "UPPERCASE")]
pub enum RecordKind {
    A,
    Aaaa,
    Mx,
    Ns,
    Cname,
    Txt,
    Spf,
    Dmarc,
    Dkim,
    Bimi,
    Soa,
    Caa,
}

/// Fixed per-domain evaluation sequence.
///
/// DMARC is evaluated before BIMI because the BIMI rule cross-references the
/// DMARC result for the same domain. Output ordering of entries and findings
/// follows this sequence, which keeps reports deterministic and diffable.
pub const EVALUATION_ORDER: [RecordKind; 12] = [
    RecordKind::Ns,
    RecordKind::A,
    RecordKind::Aaaa,
    RecordKind::Mx,
    RecordKind::Spf,
    RecordKind::Dmarc,
    RecordKind::Dkim,
    RecordKind::Bimi,
    RecordKind::Soa,
    RecordKind::Caa,
    RecordKind::Cname,
    RecordKind::Txt,
];

impl RecordKind {
    /// The wire record type queried for this logical kind.
    pub fn wire_type(self) -> RecordType {
        match self {
            RecordKind::A => RecordType::A,
            RecordKind::Aaaa => RecordType::AAAA,
            RecordKind::Mx => RecordType::MX,
            RecordKind::Ns => RecordType::NS,
            RecordKind::Cname => RecordType::CNAME,
            RecordKind::Soa => RecordType::SOA,
            RecordKind::Caa => RecordType::CAA,
            // The email-authentication kinds all live in TXT records
            RecordKind::Txt
            | RecordKind::Spf
            | RecordKind::Dmarc
            | RecordKind::Dkim
            | RecordKind::Bimi => RecordType::TXT,
        }
    }

    /// The DNS name to query for this kind.
    ///
    /// `selector` is only meaningful for DKIM, where the record lives at
    /// `<selector>._domainkey.<domain>`.
    pub fn query_name(self, domain: &str, selector: Option<&str>) -> String {
        match self {
            RecordKind::Dmarc => format!("_dmarc.{domain}"),
            RecordKind::Bimi => format!("default._bimi.{domain}"),
            RecordKind::Dkim => match selector {
                Some(sel) => format!("{sel}._domainkey.{domain}"),
                None => domain.to_string(),
            },
            _ => domain.to_string(),
        }
    }

    /// The `v=` tag value that identifies this kind inside a TXT answer set,
    /// if any. Used both to select the right TXT string and to detect
    /// ambiguous (duplicate) records.
    pub fn version_tag(self) -> Option<&'static str> {
        match self {
            RecordKind::Spf => Some("v=spf1"),
            RecordKind::Dmarc => Some("v=dmarc1"),
            RecordKind::Bimi => Some("v=bimi1"),
            _ => None,
        }
    }

    /// Whether this kind is probed once per configured DKIM selector.
    pub fn is_selector_scoped(self) -> bool {
        self == RecordKind::Dkim
    }
}

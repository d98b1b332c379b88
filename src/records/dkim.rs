//! DKIM key record parser (selector-scoped TXT records).

use super::tags::{find_tag, parse_tag_list, Tag};

/// Parsed DKIM public-key record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DkimRecord {
    /// `v=` tag if present (`DKIM1` is optional in published records).
    pub version: Option<String>,
    /// `k=` tag, lower-cased; defaults to `rsa` per RFC 6376.
    pub key_type: String,
    /// Base64 key material from `p=`. `None` means the tag was present but
    /// empty, which is the documented way to revoke a selector.
    pub public_key: Option<String>,
    /// Extra TXT answers seen at the same selector beyond the first.
    pub duplicates: usize,
    pub unknown_tags: Vec<Tag>,
}

impl DkimRecord {
    /// Parses a TXT string published at `<selector>._domainkey.<domain>`.
    ///
    /// A `p=` tag is required (an empty value is a revoked key, still a
    /// valid record); a record without `p=` is malformed.
    pub fn parse(text: &str) -> Result<DkimRecord, String> {
        let tags = parse_tag_list(text);

        let p = find_tag(&tags, "p").ok_or_else(|| "missing required p= tag".to_string())?;
        let key_material: String = p.value.chars().filter(|c| !c.is_whitespace()).collect();
        let public_key = if key_material.is_empty() {
            None
        } else {
            Some(key_material)
        };

        let version = find_tag(&tags, "v").map(|t| t.value.clone());
        let key_type = find_tag(&tags, "k")
            .map(|t| t.value.to_ascii_lowercase())
            .unwrap_or_else(|| "rsa".to_string());

        let unknown_tags = tags
            .into_iter()
            .filter(|t| {
                !matches!(t.name.as_str(), "v" | "k" | "p" | "h" | "s" | "t" | "n" | "g")
            })
            .collect();

        Ok(DkimRecord {
            version,
            key_type,
            public_key,
            duplicates: 0,
            unknown_tags,
        })
    }

    /// Best-effort RSA modulus size estimated from the base64 length of the
    /// key material.
    ///
    /// The `p=` value is a base64 DER `SubjectPublicKeyInfo`; for RSA the
    /// DER is the modulus plus roughly 36 bytes of structure, so
    /// `bits ~= (len * 6 / 8 - 36) * 8`. A 1024-bit key encodes to ~216
    /// characters and a 2048-bit key to ~392. Only derivable for RSA keys;
    /// returns `None` for other key types or revoked keys.
    pub fn estimated_key_bits(&self) -> Option<u32> {
        if self.key_type != "rsa" {
            return None;
        }
        let len = self.public_key.as_ref()?.len() as u32;
        let der_bytes = len * 6 / 8;
        Some(der_bytes.saturating_sub(36) * 8)
    }
}

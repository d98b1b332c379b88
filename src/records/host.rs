//! Parsers for host-shaped records: addresses, hostnames, MX and SOA.
//!
//! These arrive from the resolver adapter in presentation format, one answer
//! per string. Any answer that fails to parse makes the whole outcome
//! malformed, carrying the offending text.

use std::net::IpAddr;

/// One mail exchanger: `"<priority> <host>"` in presentation form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MxExchange {
    pub priority: u16,
    pub host: String,
}

/// SOA fields in presentation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoaRecord {
    pub mname: String,
    pub rname: String,
    pub serial: u32,
    pub refresh: i32,
    pub retry: i32,
    pub expire: i32,
    pub minimum: u32,
}

/// Parses A/AAAA answers into IP addresses.
pub fn parse_addresses(answers: &[String]) -> Result<Vec<IpAddr>, String> {
    answers
        .iter()
        .map(|text| {
            text.trim()
                .parse::<IpAddr>()
                .map_err(|_| format!("not an IP address: `{text}`"))
        })
        .collect()
}

/// Normalizes NS/CNAME answers: trims, drops the trailing dot, lower-cases.
pub fn parse_hosts(answers: &[String]) -> Vec<String> {
    answers
        .iter()
        .map(|h| normalize_host(h))
        .filter(|h| !h.is_empty())
        .collect()
}

/// Parses MX answers of the form `"10 mail.example.com."`.
pub fn parse_mx(answers: &[String]) -> Result<Vec<MxExchange>, String> {
    answers
        .iter()
        .map(|text| {
            let mut parts = text.split_whitespace();
            let priority = parts
                .next()
                .and_then(|p| p.parse::<u16>().ok())
                .ok_or_else(|| format!("MX answer missing priority: `{text}`"))?;
            let host = parts
                .next()
                .map(normalize_host)
                .filter(|h| !h.is_empty())
                .ok_or_else(|| format!("MX answer missing exchange host: `{text}`"))?;
            Ok(MxExchange { priority, host })
        })
        .collect()
}

/// Parses an SOA answer: seven whitespace-separated fields.
pub fn parse_soa(answers: &[String]) -> Result<SoaRecord, String> {
    let text = answers
        .first()
        .ok_or_else(|| "empty SOA answer set".to_string())?;
    let fields: Vec<&str> = text.split_whitespace().collect();
    if fields.len() != 7 {
        return Err(format!("SOA answer must have 7 fields: `{text}`"));
    }
    let num = |i: usize| -> Result<i64, String> {
        fields[i]
            .parse::<i64>()
            .map_err(|_| format!("non-numeric SOA field `{}`", fields[i]))
    };
    Ok(SoaRecord {
        mname: normalize_host(fields[0]),
        rname: normalize_host(fields[1]),
        serial: num(2)? as u32,
        refresh: num(3)? as i32,
        retry: num(4)? as i32,
        expire: num(5)? as i32,
        minimum: num(6)? as u32,
    })
}

fn normalize_host(host: &str) -> String {
    host.trim().trim_end_matches('.').to_ascii_lowercase()
}

//! Production resolver adapter backed by hickory-resolver.

use std::sync::Arc;

use async_trait::async_trait;
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::lookup::Lookup;
use hickory_resolver::proto::op::ResponseCode;
use hickory_resolver::proto::rr::RData;
use hickory_resolver::TokioAsyncResolver;

use crate::records::RecordKind;

use super::{RawAnswer, RecordResolver, ResolveFailure};

/// Adapter from the engine's [`RecordResolver`] contract to hickory.
///
/// Builds the query name for logical kinds (`_dmarc.<domain>`,
/// `<selector>._domainkey.<domain>`, `default._bimi.<domain>`), issues one
/// lookup per call and renders answers to presentation text. Timeouts and
/// retry attempts are owned by the underlying resolver configuration; this
/// adapter adds no retry policy of its own.
pub struct HickoryResolver {
    resolver: Arc<TokioAsyncResolver>,
}

impl HickoryResolver {
    pub fn new(resolver: Arc<TokioAsyncResolver>) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl RecordResolver for HickoryResolver {
    async fn resolve(&self, domain: &str, kind: RecordKind, selector: Option<&str>) -> RawAnswer {
        let name = kind.query_name(domain, selector);
        match self.resolver.lookup(name.as_str(), kind.wire_type()).await {
            Ok(lookup) => RawAnswer::Answers(render_answers(kind, &lookup)),
            Err(e) => {
                let answer = classify_error(&e);
                if let RawAnswer::Failed(failure) = &answer {
                    log::debug!("{kind} lookup for {name} failed: {failure}");
                }
                answer
            }
        }
    }
}

/// Renders the answer section to presentation strings.
fn render_answers(kind: RecordKind, lookup: &Lookup) -> Vec<String> {
    lookup
        .iter()
        .filter_map(|rdata| match rdata {
            RData::A(a) => Some(a.to_string()),
            RData::AAAA(a) => Some(a.to_string()),
            RData::NS(ns) => Some(ns.to_utf8()),
            // CNAME-chain entries ride along in lookups of other types; only
            // surface them when CNAME was the requested kind
            RData::CNAME(cname) if kind == RecordKind::Cname => Some(cname.to_utf8()),
            RData::MX(mx) => Some(format!("{} {}", mx.preference(), mx.exchange().to_utf8())),
            RData::TXT(txt) => {
                // TXT records can contain multiple character-strings - join them
                Some(
                    txt.iter()
                        .map(|bytes| String::from_utf8_lossy(bytes).to_string())
                        .collect::<Vec<String>>()
                        .join(""),
                )
            }
            RData::SOA(soa) => Some(format!(
                "{} {} {} {} {} {} {}",
                soa.mname().to_utf8(),
                soa.rname().to_utf8(),
                soa.serial(),
                soa.refresh(),
                soa.retry(),
                soa.expire(),
                soa.minimum()
            )),
            RData::CAA(caa) => Some(caa.to_string()),
            _ => None,
        })
        .collect()
}

/// Maps hickory errors onto the adapter contract.
///
/// An empty answer with NOERROR is not a failure: the name exists but
/// publishes no record of this type, which callers must see as absence.
fn classify_error(error: &ResolveError) -> RawAnswer {
    match error.kind() {
        ResolveErrorKind::NoRecordsFound { response_code, .. } => match *response_code {
            ResponseCode::NXDomain => RawAnswer::Failed(ResolveFailure::NxDomain),
            ResponseCode::ServFail => RawAnswer::Failed(ResolveFailure::ServFail),
            _ => RawAnswer::Answers(Vec::new()),
        },
        ResolveErrorKind::Timeout => RawAnswer::Failed(ResolveFailure::Timeout),
        _ => RawAnswer::Failed(ResolveFailure::NoAnswer),
    }
}

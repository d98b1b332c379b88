//! The resolver adapter boundary.
//!
//! The analysis engine never performs network I/O itself; it consumes raw
//! answers through the [`RecordResolver`] trait. The production
//! implementation is [`HickoryResolver`]; tests substitute fixture-backed
//! mocks. Expected failure modes (NXDOMAIN, timeout, SERVFAIL) are returned
//! as data, not errors, because they are per-record outcomes that must be
//! reported rather than aborting a batch.

mod hickory;

pub use hickory::HickoryResolver;

use async_trait::async_trait;
use strum_macros::{Display, EnumIter};

use crate::records::RecordKind;

/// Typed failure tags for a resolution that produced no usable answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum ResolveFailure {
    /// The domain itself does not exist.
    #[strum(serialize = "NXDOMAIN")]
    NxDomain,
    /// The query timed out (per-query timeout owned by the adapter).
    #[strum(serialize = "timeout")]
    Timeout,
    /// The upstream server answered SERVFAIL.
    #[strum(serialize = "SERVFAIL")]
    ServFail,
    /// The query concluded without an answer or a definitive error.
    #[strum(serialize = "no answer")]
    NoAnswer,
}

/// One record type's resolution result for one domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawAnswer {
    /// Raw answer strings in presentation format. An empty list means the
    /// name resolved but publishes no record of this type.
    Answers(Vec<String>),
    /// The resolver could not answer.
    Failed(ResolveFailure),
}

impl RawAnswer {
    pub fn failure(&self) -> Option<ResolveFailure> {
        match self {
            RawAnswer::Failed(f) => Some(*f),
            RawAnswer::Answers(_) => None,
        }
    }
}

/// Abstract resolver consumed by the engine.
///
/// Each call is independent per (domain, kind[, selector]); implementations
/// must return a failure tag rather than raising for expected DNS failure
/// modes, and must not retry beyond their own documented policy.
#[async_trait]
pub trait RecordResolver: Send + Sync {
    async fn resolve(&self, domain: &str, kind: RecordKind, selector: Option<&str>) -> RawAnswer;
}

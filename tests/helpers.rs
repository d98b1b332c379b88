// Shared test helpers: a fixture-backed resolver for exercising the engine
// through the public API without network access.

use std::collections::HashMap;

use async_trait::async_trait;
use dns_audit::{RawAnswer, RecordKind, RecordResolver, ResolveFailure};

/// Resolver whose answers come from a fixture map keyed by
/// (domain, kind, selector). Anything unlisted resolves to an empty answer
/// set, which the engine treats as absence.
#[derive(Default)]
pub struct FixtureResolver {
    answers: HashMap<(String, RecordKind, Option<String>), RawAnswer>,
}

#[allow(dead_code)] // Used by other test files
impl FixtureResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answers(mut self, domain: &str, kind: RecordKind, records: &[&str]) -> Self {
        self.answers.insert(
            (domain.to_string(), kind, None),
            RawAnswer::Answers(records.iter().map(|s| s.to_string()).collect()),
        );
        self
    }

    pub fn dkim(mut self, domain: &str, selector: &str, records: &[&str]) -> Self {
        self.answers.insert(
            (domain.to_string(), RecordKind::Dkim, Some(selector.to_string())),
            RawAnswer::Answers(records.iter().map(|s| s.to_string()).collect()),
        );
        self
    }

    pub fn failing(mut self, domain: &str, kind: RecordKind, failure: ResolveFailure) -> Self {
        self.answers
            .insert((domain.to_string(), kind, None), RawAnswer::Failed(failure));
        self
    }
}

#[async_trait]
impl RecordResolver for FixtureResolver {
    async fn resolve(&self, domain: &str, kind: RecordKind, selector: Option<&str>) -> RawAnswer {
        self.answers
            .get(&(domain.to_string(), kind, selector.map(str::to_string)))
            .cloned()
            .unwrap_or(RawAnswer::Answers(Vec::new()))
    }
}

/// A strong test key: ~392 base64 characters reads as a 2048-bit RSA key.
#[allow(dead_code)]
pub fn strong_dkim_record() -> String {
    format!("v=DKIM1; k=rsa; p={}", "A".repeat(392))
}

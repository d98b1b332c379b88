use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::SetLoggerError;
use strum::IntoEnumIterator;
use thiserror::Error;

use crate::resolver::ResolveFailure;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the DNS resolver.
    #[error("DNS resolver initialization error: {0}")]
    DnsResolverError(String),
}

/// Configuration problems that abort a run before any resolution starts.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("no domains to audit; pass --domain or --input")]
    EmptyDomainList,

    /// A target with an empty record-kind list would yield zero entries.
    #[error("no record types requested for {0}")]
    NoRecordKinds(String),

    #[error("unsupported record type `{0}`")]
    UnsupportedRecordType(String),

    #[error("cannot read domain list {path}: {source}")]
    InputFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Thread-safe resolution-failure counters.
///
/// Tracks how many lookups ended in each [`ResolveFailure`] tag using atomic
/// counters, allowing concurrent access from multiple tasks. All tags are
/// initialized to zero on creation. Share across tasks with `Arc`.
pub struct ResolveStats {
    failures: HashMap<ResolveFailure, AtomicUsize>,
}

impl ResolveStats {
    pub fn new() -> Self {
        let mut failures = HashMap::new();
        for failure in ResolveFailure::iter() {
            failures.insert(failure, AtomicUsize::new(0));
        }
        ResolveStats { failures }
    }

    pub fn increment(&self, failure: ResolveFailure) {
        // All ResolveFailure tags are initialized in new(), so unwrap() is safe
        self.failures
            .get(&failure)
            .unwrap()
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn count(&self, failure: ResolveFailure) -> usize {
        // All ResolveFailure tags are initialized in new(), so unwrap() is safe
        self.failures.get(&failure).unwrap().load(Ordering::SeqCst)
    }

    pub fn total(&self) -> usize {
        ResolveFailure::iter().map(|f| self.count(f)).sum()
    }

    /// Logs one summary line per non-zero counter.
    pub fn log_summary(&self) {
        for failure in ResolveFailure::iter() {
            let count = self.count(failure);
            if count > 0 {
                log::info!("lookups ending in {failure}: {count}");
            }
        }
    }
}

impl Default for ResolveStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_stats_initialization() {
        let stats = ResolveStats::new();
        // All failure tags should be initialized to 0
        for failure in ResolveFailure::iter() {
            assert_eq!(stats.count(failure), 0);
        }
        assert_eq!(stats.total(), 0);
    }

    #[test]
    fn test_resolve_stats_increment() {
        let stats = ResolveStats::new();
        stats.increment(ResolveFailure::Timeout);
        assert_eq!(stats.count(ResolveFailure::Timeout), 1);
        assert_eq!(stats.count(ResolveFailure::NxDomain), 0);
    }

    #[test]
    fn test_resolve_stats_total() {
        let stats = ResolveStats::new();
        stats.increment(ResolveFailure::Timeout);
        stats.increment(ResolveFailure::Timeout);
        stats.increment(ResolveFailure::ServFail);
        assert_eq!(stats.total(), 3);
    }
}

//! The record analysis engine.
//!
//! Consumes resolved raw answers per domain and record type through the
//! resolver adapter, parses them, optionally runs the best-practice rule
//! set and assembles one [`DomainResult`] per input domain.
//!
//! Domains are independent units of work: resolution scatters across record
//! types within a domain (`join_all`) and across domains up to the
//! concurrency limit (`buffer_unordered`), while rule evaluation runs once
//! per domain after all of its record types have landed, in the fixed
//! sequence that keeps cross-record rules (DMARC before BIMI) and report
//! ordering deterministic.

mod result;
mod target;

pub use result::{DomainResult, RecordEntry};
pub use target::DomainTarget;

use std::sync::Arc;

use futures::future;
use futures::StreamExt;
use tokio_util::sync::CancellationToken;

use crate::error_handling::{ConfigError, ResolveStats};
use crate::records::{ParsedRecord, RecordKind, RecordOutcome, EVALUATION_ORDER};
use crate::resolver::{RawAnswer, RecordResolver, ResolveFailure};
use crate::rules::{self, DomainContext};


use crate::config::DEFAULT_MAX_CONCURRENCY;

/// Batch auditor over an abstract resolver.
pub struct Analyzer<R> {
    resolver: Arc<R>,
    best_practices: bool,
    max_concurrency: usize,
    stats: Arc<ResolveStats>,
}

impl<R: RecordResolver> Analyzer<R> {
    pub fn new(resolver: R) -> Self {
        Analyzer {
            resolver: Arc::new(resolver),
            best_practices: false,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            stats: Arc::new(ResolveStats::new()),
        }
    }

    /// Enables or disables best-practice rule evaluation. When disabled the
    /// engine still parses and reports raw values; findings lists are
    /// empty, not omitted.
    pub fn with_best_practices(mut self, enabled: bool) -> Self {
        self.best_practices = enabled;
        self
    }

    pub fn with_max_concurrency(mut self, limit: usize) -> Self {
        self.max_concurrency = limit.max(1);
        self
    }

    /// Resolution-failure counters accumulated across runs.
    pub fn stats(&self) -> Arc<ResolveStats> {
        Arc::clone(&self.stats)
    }

    /// Audits every target, returning one result per input domain in input
    /// order.
    ///
    /// # Errors
    ///
    /// Only configuration problems abort the run, before any resolution
    /// starts; per-record and per-domain failures are captured as data in
    /// the results.
    pub async fn analyze(
        &self,
        targets: &[DomainTarget],
    ) -> Result<Vec<DomainResult>, ConfigError> {
        self.analyze_with_cancellation(targets, &CancellationToken::new())
            .await
    }

    /// Like [`Self::analyze`], but abandons outstanding domains when
    /// `token` is cancelled. Cancelled domains are omitted entirely, never
    /// half-populated, while already-completed domains are kept.
    pub async fn analyze_with_cancellation(
        &self,
        targets: &[DomainTarget],
        token: &CancellationToken,
    ) -> Result<Vec<DomainResult>, ConfigError> {
        if targets.is_empty() {
            return Err(ConfigError::EmptyDomainList);
        }
        for target in targets {
            if target.record_kinds.is_empty() {
                return Err(ConfigError::NoRecordKinds(target.domain.clone()));
            }
        }

        // Results land out of order; index-stable slots restore input order
        let mut slots: Vec<Option<DomainResult>> = targets.iter().map(|_| None).collect();
        {
            let mut completed = futures::stream::iter(targets.iter().enumerate())
                .map(|(idx, target)| {
                    let token = token.clone();
                    async move {
                        tokio::select! {
                            // Cancellation wins ties so an already-cancelled
                            // token never starts new work
                            biased;
                            _ = token.cancelled() => (idx, None),
                            result = self.audit_domain(target) => (idx, Some(result)),
                        }
                    }
                })
                .buffer_unordered(self.max_concurrency);
            while let Some((idx, result)) = completed.next().await {
                slots[idx] = result;
            }
        }
        Ok(slots.into_iter().flatten().collect())
    }

    /// Resolves, parses and evaluates every requested record type for one
    /// domain. No shared mutable state: everything here is local to the
    /// domain.
    async fn audit_domain(&self, target: &DomainTarget) -> DomainResult {
        // One probe per requested kind, plus one per DKIM selector, already
        // in the fixed evaluation sequence
        let mut probes: Vec<(RecordKind, Option<String>)> = Vec::new();
        for kind in EVALUATION_ORDER {
            if !target.record_kinds.contains(&kind) {
                continue;
            }
            if kind.is_selector_scoped() {
                if target.dkim_selectors.is_empty() {
                    // Nothing to query; becomes an explicit absent entry so
                    // the report row count stays predictable
                    probes.push((kind, None));
                } else {
                    for selector in &target.dkim_selectors {
                        probes.push((kind, Some(selector.clone())));
                    }
                }
            } else {
                probes.push((kind, None));
            }
        }

        // Scatter: independent resolutions run concurrently
        let fetches = probes.iter().map(|(kind, selector)| async move {
            if kind.is_selector_scoped() && selector.is_none() {
                return RawAnswer::Answers(Vec::new());
            }
            self.resolver
                .resolve(&target.domain, *kind, selector.as_deref())
                .await
        });
        let answers: Vec<RawAnswer> = future::join_all(fetches).await;

        // Gather: classify in order, caching outcomes for cross-record rules
        let mut ctx = DomainContext::new();
        let mut staged = Vec::with_capacity(probes.len());
        for ((kind, selector), answer) in probes.into_iter().zip(answers) {
            if let Some(failure) = answer.failure() {
                self.stats.increment(failure);
            }
            let outcome = RecordOutcome::classify(kind, &answer);
            ctx.record(kind, &outcome);
            let raw = match answer {
                RawAnswer::Answers(list) => list,
                RawAnswer::Failed(_) => Vec::new(),
            };
            staged.push((kind, selector, raw, outcome));
        }

        if self.best_practices {
            self.probe_delegation(&mut ctx).await;
        }

        let entries = staged
            .into_iter()
            .map(|(kind, selector, raw, outcome)| {
                let findings = if self.best_practices {
                    rules::evaluate(kind, selector.as_deref(), &outcome, &ctx)
                } else {
                    Vec::new()
                };
                RecordEntry {
                    kind,
                    selector,
                    raw,
                    outcome,
                    findings,
                }
            })
            .collect();

        log::debug!("completed audit of {}", target.domain);
        DomainResult {
            domain: target.domain.clone(),
            entries,
        }
    }

    /// Best-effort lame-delegation probe: one A lookup per NS host through
    /// the same adapter. NXDOMAIN means the host definitely resolves to
    /// nothing; any other failure leaves the probe incomplete and the rule
    /// silent.
    async fn probe_delegation(&self, ctx: &mut DomainContext) {
        let hosts = match ctx.outcome(RecordKind::Ns) {
            Some(RecordOutcome::Parsed(ParsedRecord::Hosts(hosts))) => hosts.clone(),
            _ => return,
        };
        if hosts.is_empty() {
            return;
        }

        let lookups = hosts
            .iter()
            .map(|host| self.resolver.resolve(host, RecordKind::A, None));
        let answers = future::join_all(lookups).await;

        let mut complete = true;
        let mut lame = Vec::new();
        for (host, answer) in hosts.into_iter().zip(answers) {
            match answer {
                RawAnswer::Answers(list) if list.is_empty() => lame.push(host),
                RawAnswer::Answers(_) => {}
                RawAnswer::Failed(ResolveFailure::NxDomain) => lame.push(host),
                RawAnswer::Failed(_) => complete = false,
            }
        }
        ctx.lame_ns_hosts = lame;
        ctx.ns_probe_complete = complete;
    }
}

/// One-shot convenience over [`Analyzer`]: audits `targets` with the given
/// best-practice flag and default concurrency.
pub async fn analyze<R: RecordResolver>(
    resolver: R,
    targets: &[DomainTarget],
    best_practices: bool,
) -> Result<Vec<DomainResult>, ConfigError> {
    Analyzer::new(resolver)
        .with_best_practices(best_practices)
        .analyze(targets)
        .await
}

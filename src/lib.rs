//! dns_audit library: batch DNS resolution and best-practice auditing
//!
//! This library resolves a configurable set of DNS record types for a list
//! of domains, parses the email-authentication records (SPF, DMARC, DKIM,
//! BIMI) into structured form and evaluates a fixed rule catalogue that
//! produces severity-tagged findings with remediation hints.
//!
//! # Example
//!
//! ```no_run
//! use dns_audit::{analyze, DomainTarget, HickoryResolver};
//! use dns_audit::initialization::init_resolver;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let resolver = HickoryResolver::new(init_resolver(10)?);
//! let targets = vec![DomainTarget::new("example.com").with_selectors(["s1"])];
//!
//! let results = analyze(resolver, &targets, true).await?;
//! for finding in results[0].findings() {
//!     println!("[{}] {}: {}", finding.severity, finding.kind, finding.message);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or call library functions within an async context.

pub mod config;
mod engine;
mod error_handling;
pub mod export;
pub mod initialization;
mod records;
mod resolver;
mod rules;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use engine::{analyze, Analyzer, DomainResult, DomainTarget, RecordEntry};
pub use error_handling::{ConfigError, InitializationError, ResolveStats};
pub use records::{
    BimiRecord, DkimRecord, DmarcPolicy, DmarcRecord, Mechanism, MxExchange, ParsedRecord,
    Qualifier, RecordKind, RecordOutcome, SoaRecord, SpfRecord, SpfTerm, Tag, EVALUATION_ORDER,
};
pub use resolver::{HickoryResolver, RawAnswer, RecordResolver, ResolveFailure};
pub use rules::{Finding, Severity};
pub use run::{run_audit, AuditReport};

// Internal run module (ties config, engine and export together)
mod run {
    use std::time::Instant;

    use anyhow::{bail, Context, Result};
    use log::info;

    use crate::config::{Config, BEST_PRACTICE_KINDS};
    use crate::engine::{Analyzer, DomainTarget};
    use crate::error_handling::ConfigError;
    use crate::export::{export_csv, export_jsonl, flatten_results, print_table, ExportFormat};
    use crate::initialization::init_resolver;
    use crate::records::{RecordKind, EVALUATION_ORDER};
    use crate::resolver::HickoryResolver;
    use crate::rules::Severity;

    /// Results of an audit run.
    #[derive(Debug, Clone)]
    pub struct AuditReport {
        /// Number of domains audited
        pub domains: usize,
        /// Number of report rows produced
        pub entries: usize,
        /// Finding counts by severity
        pub info: usize,
        pub warn: usize,
        pub critical: usize,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    /// Runs an audit with the provided configuration.
    ///
    /// This is the main entry point for the CLI. It collects domains from
    /// the flags and the optional input file, resolves and evaluates them,
    /// and writes the report to the configured output (or prints a table).
    pub async fn run_audit(config: Config) -> Result<AuditReport> {
        let started = Instant::now();

        let domains = collect_domains(&config)?;
        if domains.is_empty() {
            bail!(ConfigError::EmptyDomainList);
        }

        // Validate the output path up front: a bad extension must abort
        // before any resolution starts, not after the audit has run
        let format = match config.output.as_ref() {
            Some(path) => match ExportFormat::from_path(path) {
                Some(format) => Some(format),
                None => bail!(
                    "unrecognized output extension on {} (expected .csv, .jsonl or .json)",
                    path.display()
                ),
            },
            None => None,
        };

        let kinds: Vec<RecordKind> = if !config.record_types.is_empty() {
            config.record_types.clone()
        } else if config.best_practices {
            BEST_PRACTICE_KINDS.to_vec()
        } else {
            EVALUATION_ORDER.to_vec()
        };

        let targets: Vec<DomainTarget> = domains
            .iter()
            .map(|domain| {
                DomainTarget::new(domain)
                    .with_kinds(kinds.iter().copied())
                    .with_selectors(config.selectors.iter().cloned())
            })
            .collect();

        info!(
            "auditing {} domain(s), {} record type(s)",
            targets.len(),
            kinds.len()
        );

        let resolver = HickoryResolver::new(
            init_resolver(config.timeout_seconds).context("Failed to initialize DNS resolver")?,
        );
        let analyzer = Analyzer::new(resolver)
            .with_best_practices(config.best_practices)
            .with_max_concurrency(config.max_concurrency);

        let results = analyzer.analyze(&targets).await?;
        analyzer.stats().log_summary();

        let rows = flatten_results(&results);
        match format {
            Some(ExportFormat::Csv) => {
                export_csv(&rows, config.output.as_ref())?;
            }
            Some(ExportFormat::Jsonl) => {
                export_jsonl(&rows, config.output.as_ref())?;
            }
            None => print_table(&rows),
        }

        let mut info = 0;
        let mut warn = 0;
        let mut critical = 0;
        for finding in results.iter().flat_map(|r| r.findings()) {
            match finding.severity {
                Severity::Info => info += 1,
                Severity::Warn => warn += 1,
                Severity::Critical => critical += 1,
            }
        }

        Ok(AuditReport {
            domains: results.len(),
            entries: rows.len(),
            info,
            warn,
            critical,
            elapsed_seconds: started.elapsed().as_secs_f64(),
        })
    }

    /// Collects domains from `--domain` flags and the optional input file,
    /// preserving order and dropping duplicates. Blank lines and `#`
    /// comments in the file are ignored.
    fn collect_domains(config: &Config) -> Result<Vec<String>, ConfigError> {
        let mut domains: Vec<String> = Vec::new();
        let mut push = |raw: &str| {
            let domain = raw.trim().trim_end_matches('.').to_ascii_lowercase();
            if !domain.is_empty() && !domains.contains(&domain) {
                domains.push(domain);
            }
        };

        for domain in &config.domains {
            push(domain);
        }

        if let Some(path) = &config.input {
            let contents = std::fs::read_to_string(path).map_err(|source| {
                ConfigError::InputFile {
                    path: path.clone(),
                    source,
                }
            })?;
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                push(line);
            }
        }

        Ok(domains)
    }
}

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, ValueEnum};

use crate::error_handling::ConfigError;
use crate::records::RecordKind;

// constants (used as defaults)
/// DNS query timeout in seconds.
/// 10s rather than 5s reduces timeout errors on TXT/NS/MX lookups.
pub const DNS_TIMEOUT_SECS: u64 = 10;
/// Default bound on concurrently audited domains.
pub const DEFAULT_MAX_CONCURRENCY: usize = 20;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace). Used with the `--log-level` CLI option.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    Plain,
    Json,
}

/// Command-line options and configuration.
///
/// This struct is automatically generated by `clap` from the field attributes.
///
/// # Examples
///
/// ```bash
/// # Audit one domain with the best-practice rules
/// dns_audit -d example.com --best-practices
///
/// # Audit a list, only the email-authentication surface, to CSV
/// dns_audit --input domains.txt --record-types spf,dmarc,dkim -s s1 -o report.csv
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "dns_audit",
    about = "Resolves DNS records for a list of domains and audits them against \
             email-authentication and infrastructure best practices."
)]
pub struct Config {
    /// Domain to audit (repeatable)
    #[arg(short = 'd', long = "domain")]
    pub domains: Vec<String>,

    /// File with one domain per line (blank lines and # comments ignored)
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// DKIM selector to probe (repeatable, applies to every domain)
    #[arg(short = 's', long = "selector")]
    pub selectors: Vec<String>,

    /// Evaluate the best-practice rule set and report findings
    #[arg(short = 'b', long)]
    pub best_practices: bool,

    /// Record types to resolve, comma separated (e.g. spf,dmarc,mx).
    /// Defaults to all supported types, or to the email-authentication set
    /// when --best-practices is given.
    #[arg(long, value_delimiter = ',', value_parser = parse_record_kind)]
    pub record_types: Vec<RecordKind>,

    /// Output file; .csv and .jsonl/.json pick the format. Without this the
    /// report is printed as a table.
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Maximum number of domains audited concurrently
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENCY)]
    pub max_concurrency: usize,

    /// Per-query DNS timeout in seconds
    #[arg(long, default_value_t = DNS_TIMEOUT_SECS)]
    pub timeout_seconds: u64,
}

/// Record kinds audited when `--best-practices` is given without an explicit
/// `--record-types` list: the email-authentication surface plus the
/// infrastructure records the rules inspect.
pub const BEST_PRACTICE_KINDS: [RecordKind; 8] = [
    RecordKind::Spf,
    RecordKind::Dmarc,
    RecordKind::Dkim,
    RecordKind::Bimi,
    RecordKind::Mx,
    RecordKind::A,
    RecordKind::Aaaa,
    RecordKind::Ns,
];

fn parse_record_kind(value: &str) -> Result<RecordKind, ConfigError> {
    RecordKind::from_str(value.trim())
        .map_err(|_| ConfigError::UnsupportedRecordType(value.to_string()))
}

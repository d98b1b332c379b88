//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `dns_audit` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use dns_audit::initialization::init_logger_with;
use dns_audit::{run_audit, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    match run_audit(config).await {
        Ok(report) => {
            eprintln!(
                "Audited {} domain{} ({} entries) in {:.1}s: {} critical, {} warning{}, {} info",
                report.domains,
                if report.domains == 1 { "" } else { "s" },
                report.entries,
                report.elapsed_seconds,
                report.critical,
                report.warn,
                if report.warn == 1 { "" } else { "s" },
                report.info
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("dns_audit error: {:#}", e);
            process::exit(1);
        }
    }
}

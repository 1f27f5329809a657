//! Check command implementation.
//!
//! Ingests a chart, runs every rule check for its tier and prints the
//! violations. Returns whether any error-severity violation was found so the
//! caller can set the exit status.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use rcheck_core::report::{format_report_console, format_report_summary, write_report_json};
use rcheck_core::{Analyzer, Violation};
use tracing::{info, warn};

use crate::cli_utils::{load_catalog, load_chart};
use crate::commands::parse_tier;

pub struct CheckOptions {
    pub tier: Option<String>,
    pub rules: Option<PathBuf>,
    pub json: bool,
    pub output: Option<PathBuf>,
    pub errors_only: bool,
    pub parallel: bool,
}

/// Run the check command
pub fn run(source: &str, options: &CheckOptions) -> Result<bool> {
    // An unknown declared tier means no rules apply, not a failure
    let (declared, unknown_tier) = match options.tier.as_deref().map(parse_tier) {
        Some(Ok(tier)) => (Some(tier), false),
        Some(Err(e)) => {
            warn!("{}, no rules apply", e);
            (None, true)
        }
        None => (None, false),
    };

    let chart = load_chart(source, declared)?;
    let analyzer = Analyzer::with_catalog(load_catalog(options.rules.as_deref())?);

    let mut violations: Vec<Violation> = if unknown_tier {
        Vec::new()
    } else if options.parallel {
        analyzer.check_parallel(&chart)
    } else {
        analyzer.check(&chart)
    };

    if options.errors_only {
        violations.retain(Violation::is_error);
    }

    info!("{}", format_report_summary(&chart, &violations));

    let mut writer: Box<dyn Write> = match &options.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    if options.json {
        write_report_json(&mut writer, &chart, &violations)?;
    } else {
        writeln!(writer, "{}", format_report_console(&chart, &violations))?;
    }
    writer.flush()?;

    Ok(violations.iter().any(Violation::is_error))
}

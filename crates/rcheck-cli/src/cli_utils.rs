//! Common CLI utility functions shared across commands.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result, bail};
use rcheck_core::{Chart, RuleCatalog, Tier, ingest, ingest_with_tier};

/// Read chart text from a path, or stdin for "-".
pub fn read_chart_text(source: &str) -> Result<String> {
    if source == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read chart from stdin")?;
        return Ok(text);
    }

    let path = Path::new(source);
    if !path.exists() {
        bail!("Chart not found: {}", source);
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read chart {}", source))
}

/// Read and ingest a chart, honoring a declared tier.
pub fn load_chart(source: &str, tier: Option<Tier>) -> Result<Chart> {
    let text = read_chart_text(source)?;
    let chart = match tier {
        Some(tier) => ingest_with_tier(&text, tier),
        None => ingest(&text),
    }
    .with_context(|| format!("Failed to ingest {}", source))?;
    Ok(chart)
}

/// The rule catalog from `path`, or the built-in one.
pub fn load_catalog(path: Option<&Path>) -> Result<RuleCatalog> {
    match path {
        Some(path) => RuleCatalog::load(path)
            .with_context(|| format!("Failed to load rules from {}", path.display())),
        None => Ok(RuleCatalog::standard()),
    }
}

//! Rules command implementation.

use std::path::Path;

use anyhow::{Result, bail};
use rcheck_core::{ScaledRuleSet, scale_with_catalog};

use crate::cli_utils::load_catalog;
use crate::commands::parse_tier;

/// Run the rules command
pub fn run(tier: &str, bpm: f64, rules: Option<&Path>, json: bool) -> Result<()> {
    let tier = parse_tier(tier)?;
    let catalog = load_catalog(rules)?;

    let Some(scaled) = scale_with_catalog(&catalog, tier, bpm) else {
        bail!("No rules defined for {}", tier);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&scaled)?);
    } else {
        print!("{}", format_rules(&scaled));
    }
    Ok(())
}

fn format_rules(scaled: &ScaledRuleSet) -> String {
    let rules = &scaled.rules;
    let mut lines = vec![format!(
        "{} rules at {} BPM{}",
        scaled.tier,
        scaled.bpm,
        if scaled.scaling_applied {
            " (tempo-scaled)"
        } else {
            ""
        }
    )];

    let mut field = |name: &str, value: Option<String>| {
        lines.push(format!(
            "  {:<22} {}",
            name,
            value.unwrap_or_else(|| "-".to_string())
        ));
    };

    field("Density", rules.density_description.clone());
    field(
        "Consecutive",
        rules
            .consecutive
            .map(|c| format!("{} notes at {}", c.limit, c.snap)),
    );
    field("Snapping", rules.snapping_note.clone());
    field("LN minimum", rules.long_note_min.map(|s| s.to_string()));
    field("LN gap", rules.long_note_gap.map(|s| s.to_string()));
    field("Anchor limit", rules.anchor_limit.map(|v| v.to_string()));
    field("HP cap", rules.hp_cap.map(|v| v.to_string()));
    field("OD cap", rules.od_cap.map(|v| v.to_string()));
    field("Trill limit", rules.trill_limit.map(|v| v.to_string()));
    field(
        "Split jumptrill limit",
        rules.split_jumptrill_limit.map(|v| v.to_string()),
    );

    let mut output = lines.join("\n");
    output.push('\n');
    output
}

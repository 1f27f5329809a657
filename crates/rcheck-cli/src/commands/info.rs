//! Info command implementation.

use anyhow::Result;
use serde_json::json;

use crate::cli_utils::load_chart;

/// Run the info command
pub fn run(source: &str, json: bool) -> Result<()> {
    let chart = load_chart(source, None)?;

    if json {
        let summary = json!({
            "name": chart.name,
            "tier": chart.tier,
            "bpm": chart.bpm,
            "columns": chart.columns,
            "hp": chart.hp,
            "od": chart.od,
            "notes": chart.notes.len(),
            "long_notes": chart.long_note_count(),
            "duration_ms": chart.duration_ms(),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Name     : {}", chart.name);
    println!("Tier     : {}", chart.tier);
    println!("BPM      : {}", chart.bpm);
    println!("Keys     : {}", chart.columns);
    println!("HP / OD  : {} / {}", chart.hp, chart.od);
    println!(
        "Notes    : {} ({} long)",
        chart.notes.len(),
        chart.long_note_count()
    );
    println!(
        "Length   : {}",
        rcheck_core::report::format_time(chart.duration_ms())
    );
    Ok(())
}

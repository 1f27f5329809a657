use std::io::Write;

use serde_json::{Value as JsonValue, json};

use crate::chart::Chart;
use crate::error::Result;
use crate::report::count_by_severity;
use crate::violation::Violation;

/// Analysis result as a JSON document.
pub fn format_report_json(chart: &Chart, violations: &[Violation]) -> JsonValue {
    let (errors, warnings) = count_by_severity(violations);
    json!({
        "chart": {
            "name": chart.name,
            "tier": chart.tier,
            "bpm": chart.bpm,
            "columns": chart.columns,
            "notes": chart.notes.len(),
        },
        "summary": {
            "errors": errors,
            "warnings": warnings,
        },
        "violations": violations,
    })
}

/// Write the JSON report, pretty-printed, followed by a newline.
pub fn write_report_json<W: Write>(writer: &mut W, chart: &Chart, violations: &[Violation]) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, &format_report_json(chart, violations))?;
    writeln!(writer)?;
    Ok(())
}

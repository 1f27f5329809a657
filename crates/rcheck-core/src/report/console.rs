//! Console output formatting with colored display

use std::fmt::Write as _;

use owo_colors::OwoColorize;

use crate::chart::{Chart, Tier};
use crate::report::{count_by_severity, format_time};
use crate::violation::{Severity, Violation};

/// Format an analysis result for the terminal.
///
/// Returns a multi-line string: a header with the chart summary, one line
/// per violation, and a footer with counts.
pub fn format_report_console(chart: &Chart, violations: &[Violation]) -> String {
    let mut output = String::new();

    let title = format!(
        "  {} [{} {}K {} BPM]",
        chart.name.bold(),
        format_colored_tier(&chart.tier),
        chart.columns,
        chart.bpm
    );
    let border_width = (chart.name.len() + 24).max(50);
    let border: String = "━".repeat(border_width);
    let border_dim = border.dimmed();

    let _ = writeln!(output, "{}", border_dim);
    let _ = writeln!(output, "{}", title);
    let _ = writeln!(output, "{}", border_dim);

    if violations.is_empty() {
        let _ = writeln!(output, "  {}", "No violations found".green());
    }
    for violation in violations {
        let _ = writeln!(output, "{}", format_violation_line(violation));
    }

    let (errors, warnings) = count_by_severity(violations);
    let _ = writeln!(output, "{}", border_dim);
    let _ = write!(
        output,
        "  {} error(s), {} warning(s)",
        errors.red(),
        warnings.yellow()
    );

    output
}

/// One violation as `  [time] SEVERITY kind: message`.
pub fn format_violation_line(violation: &Violation) -> String {
    let time = match violation.time {
        Some(ms) => format_time(ms),
        None => "--:--.---".to_string(),
    };
    format!(
        "  {} {} {}: {}",
        time.dimmed(),
        format_colored_severity(&violation.severity),
        violation.kind.bold(),
        violation.message
    )
}

fn format_colored_severity(severity: &Severity) -> String {
    let label = format!("{:<7}", severity.as_str().to_uppercase());
    match severity {
        Severity::Error => label.red().to_string(),
        Severity::Warning => label.yellow().to_string(),
    }
}

fn format_colored_tier(tier: &Tier) -> String {
    let name = tier.name();
    match tier {
        Tier::Easy => name.green().to_string(),
        Tier::Normal => name.blue().to_string(),
        Tier::Hard => name.yellow().to_string(),
        Tier::Insane => name.red().to_string(),
        Tier::Expert => name.purple().to_string(),
    }
}

/// Plain one-line summary for logging.
pub fn format_report_summary(chart: &Chart, violations: &[Violation]) -> String {
    let (errors, warnings) = count_by_severity(violations);
    format!(
        "{} [{}] {} notes: {} error(s), {} warning(s)",
        chart.name,
        chart.tier,
        chart.notes.len(),
        errors,
        warnings
    )
}

//! Rendering of analysis results.

mod console;
mod json;

pub use console::*;
pub use json::*;

use crate::violation::Violation;

/// Format milliseconds as `mm:ss.mmm`; negative offsets keep a sign.
pub fn format_time(ms: i64) -> String {
    let sign = if ms < 0 { "-" } else { "" };
    let ms = ms.unsigned_abs();
    format!(
        "{}{:02}:{:02}.{:03}",
        sign,
        ms / 60_000,
        (ms / 1000) % 60,
        ms % 1000
    )
}

/// `(errors, warnings)` counts.
pub fn count_by_severity(violations: &[Violation]) -> (usize, usize) {
    let errors = violations.iter().filter(|v| v.is_error()).count();
    (errors, violations.len() - errors)
}

use crate::chart::{Note, Tier};
use crate::check::util::{key, plural, round_ms};
use crate::check::{Check, CheckContext};
use crate::config::tolerance::HOLD_EPSILON_MS;
use crate::violation::{Severity, Violation, ViolationKind};

/// Notes starting strictly inside `hold`'s window, past the edge guards.
fn inside_hold<'a>(
    notes: &'a [Note],
    index: usize,
    mut wanted: impl FnMut(&Note) -> bool + 'a,
) -> impl Iterator<Item = &'a Note> + 'a {
    let hold = notes[index];
    let end = hold.end_time.unwrap_or(hold.time) as f64;
    let open = hold.time as f64 + HOLD_EPSILON_MS;
    let close = end - HOLD_EPSILON_MS;

    notes[index + 1..]
        .iter()
        .take_while(move |n| (n.time as f64) < close)
        .filter(move |n| (n.time as f64) > open && !n.is_long() && wanted(*n))
}

/// Long notes shorter than the tier's minimum.
pub struct LnLengthCheck;

impl Check for LnLengthCheck {
    fn name(&self) -> &'static str {
        "ln_length"
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Vec<Violation> {
        let Some(snap) = ctx.entry().long_note_min else {
            return Vec::new();
        };
        let Some(min_ms) = ctx.threshold(snap) else {
            return Vec::new();
        };

        let short: Vec<Note> = ctx
            .notes()
            .iter()
            .filter(|n| n.is_long() && (n.length() as f64) < min_ms - HOLD_EPSILON_MS)
            .copied()
            .collect();

        // Same-time offenders are one violation
        short
            .chunk_by(|a, b| a.time == b.time)
            .map(|group| {
                let shortest = group.iter().map(Note::length).min().unwrap_or(0);
                let subject = if group.len() == 1 {
                    format!("Long note of {}ms is", shortest)
                } else {
                    format!(
                        "{} as short as {}ms are",
                        plural(group.len(), "long note"),
                        shortest
                    )
                };
                Violation::new(
                    ViolationKind::LnLength,
                    Severity::Warning,
                    format!(
                        "{} shorter than the {} minimum of {}ms",
                        subject,
                        snap,
                        round_ms(min_ms)
                    ),
                    format!("Long notes on {} must be at least {} long", ctx.tier(), snap),
                )
                .at_notes(group)
            })
            .collect()
    }
}

/// Too little rest between a release and the next note in its column.
pub struct LnGapCheck;

impl Check for LnGapCheck {
    fn name(&self) -> &'static str {
        "ln_gap"
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Vec<Violation> {
        let Some(snap) = ctx.entry().long_note_gap else {
            return Vec::new();
        };
        let Some(min_gap) = ctx.threshold(snap) else {
            return Vec::new();
        };

        let notes = ctx.notes();
        let mut violations = Vec::new();

        for (index, hold) in notes.iter().enumerate() {
            let Some(end) = hold.end_time else {
                continue;
            };
            let Some(next) = notes[index + 1..].iter().find(|n| n.column == hold.column) else {
                continue;
            };
            // Notes inside the hold are shields, not release gaps
            if next.time < end {
                continue;
            }

            let gap = next.time - end;
            if (gap as f64) < min_gap - HOLD_EPSILON_MS {
                violations.push(
                    Violation::new(
                        ViolationKind::LnGap,
                        Severity::Warning,
                        format!(
                            "Gap of {}ms after release in column {} is shorter than the {} minimum of {}ms",
                            gap,
                            key(hold.column),
                            snap,
                            round_ms(min_gap)
                        ),
                        format!(
                            "Leave at least {} after a long note release on {}",
                            snap,
                            ctx.tier()
                        ),
                    )
                    .at_notes(&[*hold, *next]),
                );
            }
        }

        violations
    }
}

/// Taps in other columns while a short hold is down.
pub struct HoldThroughCheck;

impl Check for HoldThroughCheck {
    fn name(&self) -> &'static str {
        "hold_through"
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Vec<Violation> {
        if !matches!(ctx.tier(), Tier::Easy | Tier::Normal) || ctx.entry().long_note_min.is_none()
        {
            return Vec::new();
        }
        let Some(beat) = ctx.beat_ms() else {
            return Vec::new();
        };

        let notes = ctx.notes();
        let mut violations = Vec::new();

        for (index, hold) in notes.iter().enumerate() {
            if !hold.is_long() || hold.length() as f64 > beat {
                continue;
            }

            let column = hold.column;
            let during: Vec<Note> = inside_hold(notes, index, move |n| n.column != column)
                .copied()
                .collect();
            if during.is_empty() {
                continue;
            }

            let mut referenced = vec![*hold];
            referenced.extend(during.iter().copied());
            violations.push(
                Violation::new(
                    ViolationKind::LnHoldThrough,
                    Severity::Warning,
                    format!(
                        "{} during a {}ms hold in column {}",
                        plural(during.len(), "note"),
                        hold.length(),
                        key(column)
                    ),
                    format!(
                        "Avoid notes in other columns during holds of one beat or less on {}",
                        ctx.tier()
                    ),
                )
                .at_notes(&referenced),
            );
        }

        violations
    }
}

/// Taps in a column while that same column is held.
pub struct ShieldCheck;

impl Check for ShieldCheck {
    fn name(&self) -> &'static str {
        "shield"
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Vec<Violation> {
        let notes = ctx.notes();
        let mut violations = Vec::new();

        for (index, hold) in notes.iter().enumerate() {
            let Some(end) = hold.end_time else {
                continue;
            };

            let column = hold.column;
            let shields: Vec<Note> = inside_hold(notes, index, move |n| n.column == column)
                .copied()
                .collect();
            if shields.is_empty() {
                continue;
            }

            let mut referenced = vec![*hold];
            referenced.extend(shields.iter().copied());
            violations.push(
                Violation::new(
                    ViolationKind::Shield,
                    Severity::Error,
                    format!(
                        "{} in column {} inside the hold from {}ms to {}ms",
                        plural(shields.len(), "note"),
                        key(column),
                        hold.time,
                        end
                    ),
                    "Notes must not overlap a long note in the same column",
                )
                .at_notes(&referenced),
            );
        }

        violations
    }
}

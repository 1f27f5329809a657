use crate::chart::{Note, Tier};
use crate::check::util::{group_notes, group_ranges, key, plural, runs_where};
use crate::check::{Check, CheckContext};
use crate::config::{tolerance, window};
use crate::pattern::{Shape, chord_columns, chord_starts, chords, scan_spans};
use crate::rules::Snap;
use crate::violation::{Severity, Violation, ViolationKind};

/// Chords wider than the tier allows.
pub struct ChordSizeCheck;

impl ChordSizeCheck {
    fn limit(tier: Tier, columns: u8) -> Option<usize> {
        let wide = columns > 5;
        match (tier, wide) {
            (Tier::Easy, _) => Some(2),
            (Tier::Normal, false) => Some(2),
            (Tier::Normal, true) => Some(3),
            (Tier::Hard, false) => Some(3),
            (Tier::Hard, true) => Some(4),
            (Tier::Insane, false) => Some(4),
            (Tier::Insane, true) => Some(5),
            (Tier::Expert, _) => None,
        }
    }
}

impl Check for ChordSizeCheck {
    fn name(&self) -> &'static str {
        "chord_size"
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Vec<Violation> {
        let Some(limit) = Self::limit(ctx.tier(), ctx.chart.columns) else {
            return Vec::new();
        };

        let notes = ctx.notes();
        let groups = group_ranges(notes);
        let mut violations = Vec::new();
        let mut index = 0;

        // Consecutive oversized chords are reported together
        while index < groups.len() {
            if groups[index].len() <= limit {
                index += 1;
                continue;
            }
            let start = index;
            while index < groups.len() && groups[index].len() > limit {
                index += 1;
            }

            let run = &groups[start..index];
            let widest = run.iter().map(|g| g.len()).max().unwrap_or(0);
            let message = if run.len() == 1 {
                format!("Chord of {} notes exceeds the maximum of {}", widest, limit)
            } else {
                format!(
                    "{} in a row of up to {} notes exceed the maximum of {}",
                    plural(run.len(), "chord"),
                    widest,
                    limit
                )
            };

            violations.push(
                Violation::new(
                    ViolationKind::ChordSize,
                    Severity::Error,
                    message,
                    format!(
                        "Chords on {}K {} must not exceed {} notes",
                        ctx.chart.columns,
                        ctx.tier(),
                        limit
                    ),
                )
                .at_notes(group_notes(notes, run)),
            );
        }

        violations
    }
}

/// Fast two-column alternation.
pub struct TrillCheck;

impl Check for TrillCheck {
    fn name(&self) -> &'static str {
        "trill"
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Vec<Violation> {
        let Some(trill_limit) = ctx.entry().trill_limit else {
            return Vec::new();
        };
        let Some(threshold) = ctx.threshold(Snap::Quarter) else {
            return Vec::new();
        };

        let notes = ctx.notes();
        let max_gap = threshold * tolerance::SHAPE;

        scan_spans(notes, 0..notes.len(), window::TRILL, |slice, c| {
            (c.shape == Shape::Trill && c.avg_gap <= max_gap).then(|| column_pair(slice))
        })
        .into_iter()
        .filter(|span| span.len() > trill_limit as usize)
        .map(|span| {
            let (a, b) = span.key;
            Violation::new(
                ViolationKind::Trill,
                Severity::Warning,
                format!(
                    "Trill of {} notes on columns {} and {} exceeds the limit of {}",
                    span.len(),
                    key(a),
                    key(b),
                    trill_limit
                ),
                format!("Trills must not exceed {} notes", trill_limit),
            )
            .at_notes(span.notes(notes))
        })
        .collect()
    }
}

fn column_pair(slice: &[Note]) -> (u8, u8) {
    let low = slice.iter().map(|n| n.column).min().unwrap_or(0);
    let high = slice.iter().map(|n| n.column).max().unwrap_or(0);
    (low, high)
}

/// Two-note chords alternating between two column pairs.
pub struct SplitJumptrillCheck;

impl Check for SplitJumptrillCheck {
    fn name(&self) -> &'static str {
        "split_jumptrill"
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Vec<Violation> {
        let Some(chord_limit) = ctx.entry().split_jumptrill_limit else {
            return Vec::new();
        };
        let Some(threshold) = ctx.threshold(Snap::Quarter) else {
            return Vec::new();
        };

        let notes = ctx.notes();
        let max_gap = threshold * tolerance::SHAPE;

        let spans = scan_spans(
            notes,
            chord_starts(notes),
            window::SPLIT_JUMPTRILL,
            |slice, c| {
                if c.shape != Shape::SplitJumptrill {
                    return None;
                }
                let groups = chords(slice);
                let spread = slice[slice.len() - 1].time - slice[0].time;
                let chord_gap = spread as f64 / (groups.len() - 1) as f64;
                if chord_gap > max_gap {
                    return None;
                }
                let mut pairs = [chord_columns(groups[0]), chord_columns(groups[1])];
                pairs.sort();
                Some(pairs)
            },
        );

        spans
            .into_iter()
            .filter_map(|span| {
                let covered = span.notes(notes);
                let chord_count = chords(covered).len();
                (chord_count > chord_limit as usize).then(|| {
                    Violation::new(
                        ViolationKind::SplitJumptrill,
                        Severity::Warning,
                        format!(
                            "Split jumptrill of {} exceeds the limit of {}",
                            plural(chord_count, "chord"),
                            chord_limit
                        ),
                        format!("Split jumptrills must not exceed {} chords", chord_limit),
                    )
                    .at_notes(covered)
                })
            })
            .collect()
    }
}

/// Long runs of fast monotonic rolls.
pub struct LongRollCheck;

impl LongRollCheck {
    fn limit(tier: Tier) -> Option<usize> {
        match tier {
            Tier::Normal => Some(8),
            Tier::Hard => Some(16),
            _ => None,
        }
    }
}

impl Check for LongRollCheck {
    fn name(&self) -> &'static str {
        "long_roll"
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Vec<Violation> {
        let Some(roll_limit) = Self::limit(ctx.tier()) else {
            return Vec::new();
        };
        let Some(threshold) = ctx.threshold(Snap::Quarter) else {
            return Vec::new();
        };

        let notes = ctx.notes();
        let max_gap = threshold * tolerance::SHAPE;

        scan_spans(notes, 0..notes.len(), window::ROLL, |_, c| match c.shape {
            Shape::Roll { ascending } if c.avg_gap <= max_gap => Some(ascending),
            _ => None,
        })
        .into_iter()
        .filter(|span| span.len() > roll_limit)
        .map(|span| {
            let direction = if span.key { "ascending" } else { "descending" };
            Violation::new(
                ViolationKind::LongRoll,
                Severity::Warning,
                format!(
                    "{} roll of {} notes exceeds the limit of {}",
                    capitalize(direction),
                    span.len(),
                    roll_limit
                ),
                format!("Rolls on {} must not exceed {} notes", ctx.tier(), roll_limit),
            )
            .at_notes(span.notes(notes))
        })
        .collect()
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Runs of chords whose neighbours are at most `max_gap` apart.
pub(super) fn chord_runs(notes: &[Note], max_gap: f64) -> Vec<std::ops::Range<usize>> {
    let groups = group_ranges(notes);
    runs_where(&groups, |a, b| {
        (notes[b.start].time - notes[a.start].time) as f64 <= max_gap
    })
}

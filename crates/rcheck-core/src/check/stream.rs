use std::fmt;

use crate::chart::{Note, Tier};
use crate::check::shape::chord_runs;
use crate::check::util::{group_notes, group_ranges, plural, round_ms, runs_where};
use crate::check::{Check, CheckContext};
use crate::config::{tolerance, window};
use crate::pattern::{Shape, classify, scan_spans};
use crate::rules::Snap;
use crate::violation::{Severity, Violation, ViolationKind};

fn is_patterned(shape: Shape) -> bool {
    !matches!(shape, Shape::Jack | Shape::Unknown)
}

/// Sustained 1/8 streams.
pub struct EighthStreamCheck;

impl EighthStreamCheck {
    fn limit(tier: Tier) -> Option<usize> {
        match tier {
            Tier::Hard => Some(6),
            Tier::Insane => Some(16),
            _ => None,
        }
    }
}

impl Check for EighthStreamCheck {
    fn name(&self) -> &'static str {
        "eighth_stream"
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Vec<Violation> {
        let Some(stream_limit) = Self::limit(ctx.tier()) else {
            return Vec::new();
        };
        let Some(threshold) = ctx.threshold(Snap::Eighth) else {
            return Vec::new();
        };

        let notes = ctx.notes();
        let max_gap = threshold * tolerance::SHAPE;

        scan_spans(notes, 0..notes.len(), window::EIGHTH_STREAM, |_, c| {
            (is_patterned(c.shape) && c.avg_gap > 0.0 && c.avg_gap <= max_gap).then_some(())
        })
        .into_iter()
        .filter(|span| span.len() > stream_limit)
        .map(|span| {
            let covered = span.notes(notes);
            let duration = covered[covered.len() - 1].time - covered[0].time;
            Violation::new(
                ViolationKind::EighthStream,
                Severity::Warning,
                format!(
                    "1/8 stream of {} notes over {}ms exceeds the limit of {}",
                    span.len(),
                    duration,
                    stream_limit
                ),
                format!(
                    "1/8 streams on {} must not exceed {} notes",
                    ctx.tier(),
                    stream_limit
                ),
            )
            .at_notes(covered)
        })
        .collect()
    }
}

/// Fast runs made only of long notes.
pub struct LnStreamCheck;

impl LnStreamCheck {
    fn limit(tier: Tier) -> Option<usize> {
        match tier {
            Tier::Easy => Some(4),
            Tier::Normal => Some(6),
            Tier::Hard => Some(12),
            _ => None,
        }
    }
}

impl Check for LnStreamCheck {
    fn name(&self) -> &'static str {
        "ln_stream"
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Vec<Violation> {
        let Some(ln_limit) = Self::limit(ctx.tier()) else {
            return Vec::new();
        };
        let Some(threshold) = ctx.threshold(Snap::Quarter) else {
            return Vec::new();
        };

        let notes = ctx.notes();
        let max_gap = threshold * tolerance::SHAPE;

        scan_spans(notes, 0..notes.len(), window::LN_STREAM, |slice, c| {
            let holds = slice.iter().all(Note::is_long);
            (holds && is_patterned(c.shape) && c.avg_gap <= max_gap).then_some(())
        })
        .into_iter()
        .filter(|span| span.len() > ln_limit)
        .map(|span| {
            Violation::new(
                ViolationKind::LnStream,
                Severity::Warning,
                format!(
                    "LN stream of {} notes exceeds the limit of {}",
                    span.len(),
                    ln_limit
                ),
                format!(
                    "Long note streams on {} must not exceed {} notes",
                    ctx.tier(),
                    ln_limit
                ),
            )
            .at_notes(span.notes(notes))
        })
        .collect()
    }
}

/// Near-simultaneous notes a tiny gap apart.
pub struct GraceNoteCheck;

impl GraceNoteCheck {
    /// Longest allowed run of grace pairs.
    fn limit(tier: Tier) -> Option<usize> {
        match tier {
            Tier::Easy | Tier::Normal => Some(0),
            Tier::Hard => Some(2),
            _ => None,
        }
    }
}

impl Check for GraceNoteCheck {
    fn name(&self) -> &'static str {
        "grace_note"
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Vec<Violation> {
        let Some(grace_limit) = Self::limit(ctx.tier()) else {
            return Vec::new();
        };
        let Some(threshold) = ctx.threshold(Snap::Sixteenth) else {
            return Vec::new();
        };

        let notes = ctx.notes();
        let max_gap = threshold * tolerance::RUN;

        let is_grace: Vec<bool> = notes
            .windows(2)
            .map(|pair| {
                let gap = pair[1].time - pair[0].time;
                gap > 0 && gap as f64 <= max_gap && classify(pair).shape != Shape::Jack
            })
            .collect();

        let mut violations = Vec::new();
        let mut index = 0;
        while index < is_grace.len() {
            if !is_grace[index] {
                index += 1;
                continue;
            }
            let start = index;
            while index < is_grace.len() && is_grace[index] {
                index += 1;
            }

            let pairs = index - start;
            if pairs <= grace_limit {
                continue;
            }

            let covered = &notes[start..=index];
            let widest = covered
                .windows(2)
                .map(|w| w[1].time - w[0].time)
                .max()
                .unwrap_or(0);
            violations.push(
                Violation::new(
                    ViolationKind::GraceNote,
                    Severity::Warning,
                    format!(
                        "Run of {}, widest gap {}ms, exceeds the limit of {}",
                        plural(pairs, "grace note pair"),
                        widest,
                        grace_limit
                    ),
                    format!(
                        "Grace notes (gaps of {}ms or less) on {} are limited to {} in a row",
                        round_ms(threshold),
                        ctx.tier(),
                        grace_limit
                    ),
                )
                .at_notes(covered),
            );
        }

        violations
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Hand {
    Left,
    Right,
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
        }
    }
}

/// The hand every note of `slice` falls on, if it is a single one.
///
/// The middle column of an odd key count is shared by both hands.
fn single_hand(slice: &[Note], columns: u8) -> Option<Hand> {
    let half = columns / 2;
    let odd = columns % 2 == 1;
    let on_left = |c: u8| c < half || (odd && c == half);
    let on_right = |c: u8| c >= half;

    if slice.iter().all(|n| on_left(n.column)) {
        Some(Hand::Left)
    } else if slice.iter().all(|n| on_right(n.column)) {
        Some(Hand::Right)
    } else {
        None
    }
}

/// Dense passages that keep one hand busy while the other rests.
pub struct HandSpacingCheck;

impl HandSpacingCheck {
    fn limit(tier: Tier) -> Option<usize> {
        match tier {
            Tier::Normal => Some(12),
            Tier::Hard => Some(16),
            _ => None,
        }
    }
}

impl Check for HandSpacingCheck {
    fn name(&self) -> &'static str {
        "hand_spacing"
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Vec<Violation> {
        let Some(hand_limit) = Self::limit(ctx.tier()) else {
            return Vec::new();
        };
        let columns = ctx.chart.columns;
        if columns < 2 {
            return Vec::new();
        }
        let Some(threshold) = ctx.threshold(Snap::Quarter) else {
            return Vec::new();
        };

        let notes = ctx.notes();
        let max_gap = threshold * tolerance::SHAPE;

        scan_spans(notes, 0..notes.len(), window::HAND_SPACING, |slice, c| {
            if !is_patterned(c.shape) || c.avg_gap > max_gap {
                return None;
            }
            single_hand(slice, columns)
        })
        .into_iter()
        .filter(|span| span.len() > hand_limit)
        .map(|span| {
            Violation::new(
                ViolationKind::HandSpacing,
                Severity::Warning,
                format!(
                    "{} dense notes on the {} hand exceed the limit of {}",
                    span.len(),
                    span.key,
                    hand_limit
                ),
                format!(
                    "Dense passages on {} should not stay on one hand for more than {} notes",
                    ctx.tier(),
                    hand_limit
                ),
            )
            .at_notes(span.notes(notes))
        })
        .collect()
    }
}

/// Runs of two-note chords on adjacent columns.
pub struct BracketCheck;

impl BracketCheck {
    fn limit(tier: Tier) -> Option<usize> {
        match tier {
            Tier::Normal => Some(4),
            Tier::Hard => Some(8),
            _ => None,
        }
    }
}

fn is_bracket(chord: &[Note]) -> bool {
    chord.len() == 2 && chord[0].column.abs_diff(chord[1].column) == 1
}

impl Check for BracketCheck {
    fn name(&self) -> &'static str {
        "bracket"
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Vec<Violation> {
        let Some(bracket_limit) = Self::limit(ctx.tier()) else {
            return Vec::new();
        };
        let Some(threshold) = ctx.threshold(Snap::Half) else {
            return Vec::new();
        };

        let notes = ctx.notes();
        let groups = group_ranges(notes);
        let brackets: Vec<bool> = groups.iter().map(|g| is_bracket(&notes[g.clone()])).collect();
        let mut violations = Vec::new();

        for run in chord_runs(notes, threshold * tolerance::RUN) {
            // Split each chord run further at non-bracket chords
            let indices: Vec<usize> = run.collect();
            for sub in runs_where(&indices, |&a, &b| brackets[a] && brackets[b]) {
                let chord_count = sub.len();
                if chord_count <= bracket_limit {
                    continue;
                }
                let first = indices[sub.start];
                let last = indices[sub.end - 1];
                let covered = group_notes(notes, &groups[first..=last]);
                if classify(covered).shape == Shape::SplitJumptrill {
                    continue;
                }

                violations.push(
                    Violation::new(
                        ViolationKind::Bracket,
                        Severity::Warning,
                        format!(
                            "{} in a row exceed the limit of {}",
                            plural(chord_count, "bracket"),
                            bracket_limit
                        ),
                        format!(
                            "Bracket runs on {} must not exceed {} chords",
                            ctx.tier(),
                            bracket_limit
                        ),
                    )
                    .at_notes(covered),
                );
            }
        }

        violations
    }
}

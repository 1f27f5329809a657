use std::ops::Range;

use crate::chart::{Note, Tier};
use crate::check::util::{
    column_indices, group_notes, group_ranges, key, percent, plural, round_ms, runs_where,
};
use crate::check::{Check, CheckContext};
use crate::config::{tolerance, window};
use crate::rules::Snap;
use crate::violation::{Severity, Violation, ViolationKind};

/// Share of dense timestamps inside sliding beat windows.
pub struct DensityCheck;

impl DensityCheck {
    /// Snap counted as dense, and the highest allowed dense share.
    fn limits(tier: Tier) -> Option<(Snap, f64)> {
        match tier {
            Tier::Easy => Some((Snap::Half, 0.25)),
            Tier::Normal => Some((Snap::Quarter, 0.5)),
            Tier::Hard => Some((Snap::Eighth, 0.6)),
            Tier::Insane | Tier::Expert => None,
        }
    }
}

/// An offending window (or merged windows) over group indices.
struct DenseSpan {
    groups: Range<usize>,
    peak: f64,
}

impl Check for DensityCheck {
    fn name(&self) -> &'static str {
        "density"
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Vec<Violation> {
        let Some(description) = ctx.entry().density_description.as_deref() else {
            return Vec::new();
        };
        let Some((snap, max_ratio)) = Self::limits(ctx.tier()) else {
            return Vec::new();
        };
        let (Some(beat), Some(threshold)) = (ctx.beat_ms(), ctx.threshold(snap)) else {
            return Vec::new();
        };

        let notes = ctx.notes();
        let groups = group_ranges(notes);
        if groups.len() < window::DENSITY_MIN_TIMESTAMPS {
            return Vec::new();
        }

        let times: Vec<i64> = groups.iter().map(|g| notes[g.start].time).collect();
        let limit = threshold * tolerance::RUN;
        let dense: Vec<bool> = (0..times.len())
            .map(|i| i > 0 && (times[i] - times[i - 1]) as f64 <= limit)
            .collect();

        let window_ms = beat * window::DENSITY_BEATS;
        // Timestamps are whole milliseconds, so a window this narrow can
        // never hold enough distinct ones
        if window_ms <= (window::DENSITY_MIN_TIMESTAMPS - 1) as f64 {
            return Vec::new();
        }
        let first = times[0] as f64;
        let last = times[times.len() - 1] as f64;

        let mut spans: Vec<DenseSpan> = Vec::new();
        let (mut lo, mut hi) = (0usize, 0usize);
        let mut step = 0u64;

        loop {
            let window_start = first + step as f64 * beat;
            if window_start > last {
                break;
            }
            let window_end = window_start + window_ms;
            step += 1;

            while lo < times.len() && (times[lo] as f64) < window_start {
                lo += 1;
            }
            hi = hi.max(lo);
            while hi < times.len() && (times[hi] as f64) < window_end {
                hi += 1;
            }

            if hi - lo < window::DENSITY_MIN_TIMESTAMPS {
                // Later windows only lose timestamps until one reaches times[hi]
                if hi == times.len() {
                    break;
                }
                let reach = ((times[hi] as f64 - first - window_ms) / beat).floor() + 1.0;
                step = step.max(reach as u64);
                continue;
            }

            // The first timestamp's gap reaches outside the window
            let counted = hi - lo - 1;
            let dense_count = dense[lo + 1..hi].iter().filter(|&&d| d).count();
            let ratio = dense_count as f64 / counted as f64;
            if ratio <= max_ratio {
                continue;
            }

            match spans.last_mut() {
                Some(span) if lo <= span.groups.end => {
                    span.groups.end = span.groups.end.max(hi);
                    span.peak = span.peak.max(ratio);
                }
                _ => spans.push(DenseSpan {
                    groups: lo..hi,
                    peak: ratio,
                }),
            }
        }

        spans
            .into_iter()
            .map(|span| {
                let covered = group_notes(notes, &groups[span.groups.clone()]);
                let start = notes[groups[span.groups.start].start].time;
                let end = notes[groups[span.groups.end - 1].start].time;
                Violation::new(
                    ViolationKind::Density,
                    Severity::Warning,
                    format!(
                        "{}% of notes between {}ms and {}ms are {} or denser (max {}%)",
                        percent(span.peak),
                        start,
                        end,
                        snap,
                        percent(max_ratio)
                    ),
                    description,
                )
                .at_notes(covered)
            })
            .collect()
    }
}

/// Runs of distinct timestamps at the consecutive-rule snap or denser.
pub struct ConsecutiveCheck;

impl Check for ConsecutiveCheck {
    fn name(&self) -> &'static str {
        "consecutive"
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Vec<Violation> {
        let Some(rule) = ctx.entry().consecutive else {
            return Vec::new();
        };
        let Some(threshold) = ctx.threshold(rule.snap) else {
            return Vec::new();
        };

        let notes = ctx.notes();
        let groups = group_ranges(notes);
        let limit = threshold * tolerance::RUN;

        runs_where(&groups, |a, b| {
            (notes[b.start].time - notes[a.start].time) as f64 <= limit
        })
        .into_iter()
        .filter(|run| run.len() > rule.limit as usize)
        .map(|run| {
            let count = run.len();
            let covered = group_notes(notes, &groups[run]);
            Violation::new(
                ViolationKind::Consecutive,
                Severity::Warning,
                format!(
                    "{} consecutive {} notes exceed the limit of {}",
                    count, rule.snap, rule.limit
                ),
                format!(
                    "No more than {} consecutive {} notes",
                    rule.limit, rule.snap
                ),
            )
            .at_notes(covered)
        })
        .collect()
    }
}

/// Per-column repetition interleaved with other columns.
pub struct AnchorCheck;

impl Check for AnchorCheck {
    fn name(&self) -> &'static str {
        "anchor"
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Vec<Violation> {
        let Some(anchor_limit) = ctx.entry().anchor_limit else {
            return Vec::new();
        };
        let Some(threshold) = ctx.threshold(Snap::Half) else {
            return Vec::new();
        };

        let notes = ctx.notes();
        let limit = threshold * tolerance::RUN;
        let mut violations = Vec::new();

        for (column, indices) in column_indices(notes, ctx.chart.columns).iter().enumerate() {
            let runs = runs_where(indices, |&a, &b| {
                (notes[b].time - notes[a].time) as f64 <= limit && interleaved(notes, a, b)
            });

            for run in runs {
                if run.len() <= anchor_limit as usize {
                    continue;
                }
                let anchored: Vec<Note> = indices[run].iter().map(|&i| notes[i]).collect();
                violations.push(
                    Violation::new(
                        ViolationKind::Anchor,
                        Severity::Warning,
                        format!(
                            "Anchor of {} in column {} exceeds the limit of {}",
                            plural(anchored.len(), "note"),
                            key(column as u8),
                            anchor_limit
                        ),
                        format!("Anchors must not exceed {} notes", anchor_limit),
                    )
                    .at_notes(&anchored),
                );
            }
        }

        violations
    }
}

/// Whether a note from another column lies strictly between `a` and `b`.
fn interleaved(notes: &[Note], a: usize, b: usize) -> bool {
    let column = notes[a].column;
    let (start, end) = (notes[a].time, notes[b].time);
    notes[a + 1..b]
        .iter()
        .any(|n| n.column != column && n.time > start && n.time < end)
}

/// Same-column runs at 1/4 or denser.
pub struct QuarterJackCheck;

impl QuarterJackCheck {
    fn limit(tier: Tier) -> Option<usize> {
        match tier {
            Tier::Normal => Some(2),
            Tier::Hard => Some(4),
            Tier::Insane => Some(8),
            Tier::Easy | Tier::Expert => None,
        }
    }
}

impl Check for QuarterJackCheck {
    fn name(&self) -> &'static str {
        "quarter_jack"
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Vec<Violation> {
        let Some(jack_limit) = Self::limit(ctx.tier()) else {
            return Vec::new();
        };
        let Some(threshold) = ctx.threshold(Snap::Quarter) else {
            return Vec::new();
        };

        let notes = ctx.notes();
        let limit = threshold * tolerance::RUN;
        let mut violations = Vec::new();

        for (column, indices) in column_indices(notes, ctx.chart.columns).iter().enumerate() {
            let runs = runs_where(indices, |&a, &b| {
                let gap = notes[b].time - notes[a].time;
                gap > 0 && gap as f64 <= limit
            });

            for run in runs.into_iter().filter(|r| r.len() > jack_limit) {
                let jack: Vec<Note> = indices[run].iter().map(|&i| notes[i]).collect();
                let span = jack[jack.len() - 1].time - jack[0].time;
                violations.push(
                    Violation::new(
                        ViolationKind::QuarterJack,
                        Severity::Warning,
                        format!(
                            "1/4 jack of {} in column {} over {}ms exceeds the limit of {}",
                            plural(jack.len(), "note"),
                            key(column as u8),
                            span,
                            jack_limit
                        ),
                        format!(
                            "1/4 jacks on {} must not exceed {} notes (gap {}ms or less)",
                            ctx.tier(),
                            jack_limit,
                            round_ms(threshold)
                        ),
                    )
                    .at_notes(&jack),
                );
            }
        }

        violations
    }
}

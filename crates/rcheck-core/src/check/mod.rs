//! Violation checks and the analysis entry point.
//!
//! Checks are grouped by family:
//! - `settings` - HP/OD caps
//! - `density` - density windows, consecutive runs, anchors, 1/4 jacks
//! - `shape` - chord size, trills, split jumptrills, long rolls
//! - `stream` - 1/8 streams, LN streams, grace notes, hand spacing, brackets
//! - `long_note` - LN length, release gap, hold-through, shields

mod context;
mod density;
mod long_note;
mod settings;
mod shape;
mod stream;
mod util;

pub use context::CheckContext;
pub use density::{AnchorCheck, ConsecutiveCheck, DensityCheck, QuarterJackCheck};
pub use long_note::{HoldThroughCheck, LnGapCheck, LnLengthCheck, ShieldCheck};
pub use settings::SettingsCheck;
pub use shape::{ChordSizeCheck, LongRollCheck, SplitJumptrillCheck, TrillCheck};
pub use stream::{BracketCheck, EighthStreamCheck, GraceNoteCheck, HandSpacingCheck, LnStreamCheck};

use std::thread;

use tracing::debug;

use crate::chart::Chart;
use crate::rules::{RuleCatalog, ThresholdCache, scale_with_catalog};
use crate::violation::Violation;

/// A single independent rule check.
///
/// Implementations must return no violations when their governing rule is
/// absent or the chart's tier is not one they apply to.
pub trait Check: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    fn run(&self, ctx: &CheckContext<'_>) -> Vec<Violation>;
}

/// Every check, in the order their results are concatenated.
pub fn registry() -> Vec<Box<dyn Check>> {
    vec![
        Box::new(SettingsCheck),
        Box::new(DensityCheck),
        Box::new(ConsecutiveCheck),
        Box::new(AnchorCheck),
        Box::new(QuarterJackCheck),
        Box::new(ChordSizeCheck),
        Box::new(TrillCheck),
        Box::new(SplitJumptrillCheck),
        Box::new(LongRollCheck),
        Box::new(EighthStreamCheck),
        Box::new(LnStreamCheck),
        Box::new(GraceNoteCheck),
        Box::new(HandSpacingCheck),
        Box::new(BracketCheck),
        Box::new(LnLengthCheck),
        Box::new(LnGapCheck),
        Box::new(HoldThroughCheck),
        Box::new(ShieldCheck),
    ]
}

/// Runs the check registry against charts.
///
/// Holds the rule catalog and the threshold cache; neither is mutated in a
/// way that changes results, so one analyzer can be reused across charts.
pub struct Analyzer {
    catalog: RuleCatalog,
    cache: ThresholdCache,
    checks: Vec<Box<dyn Check>>,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer {
    pub fn new() -> Self {
        Self::with_catalog(RuleCatalog::standard())
    }

    pub fn with_catalog(catalog: RuleCatalog) -> Self {
        Self {
            catalog,
            cache: ThresholdCache::new(),
            checks: registry(),
        }
    }

    /// Replace the threshold cache, e.g. with a pre-warmed one.
    pub fn with_cache(mut self, cache: ThresholdCache) -> Self {
        self.cache = cache;
        self
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    pub fn cache(&self) -> &ThresholdCache {
        &self.cache
    }

    /// Analyze a chart, returning violations ordered by time.
    ///
    /// A tier missing from the catalog yields an empty list.
    pub fn check(&self, chart: &Chart) -> Vec<Violation> {
        let Some(rules) = scale_with_catalog(&self.catalog, chart.tier, chart.bpm) else {
            debug!("No rules for tier {}, skipping analysis", chart.tier);
            return Vec::new();
        };
        let ctx = CheckContext::new(chart, &rules, &self.cache);

        let mut violations = Vec::new();
        for check in &self.checks {
            let found = check.run(&ctx);
            debug!("{}: {} violation(s)", check.name(), found.len());
            violations.extend(found);
        }

        sort_by_time(&mut violations);
        violations
    }

    /// Same as [`Analyzer::check`], running each check on its own thread.
    pub fn check_parallel(&self, chart: &Chart) -> Vec<Violation> {
        let Some(rules) = scale_with_catalog(&self.catalog, chart.tier, chart.bpm) else {
            debug!("No rules for tier {}, skipping analysis", chart.tier);
            return Vec::new();
        };
        self.cache.warm(chart.bpm);
        let ctx = CheckContext::new(chart, &rules, &self.cache);

        let results: Vec<Vec<Violation>> = thread::scope(|scope| {
            let handles: Vec<_> = self
                .checks
                .iter()
                .map(|check| {
                    let ctx = &ctx;
                    scope.spawn(move || check.run(ctx))
                })
                .collect();

            handles
                .into_iter()
                .zip(&self.checks)
                .map(|(handle, check)| {
                    handle.join().unwrap_or_else(|_| {
                        tracing::error!("{} panicked, dropping its results", check.name());
                        Vec::new()
                    })
                })
                .collect()
        });

        let mut violations: Vec<Violation> = results.into_iter().flatten().collect();
        sort_by_time(&mut violations);
        violations
    }
}

/// Analyze a chart with the standard catalog and a fresh cache.
pub fn check(chart: &Chart) -> Vec<Violation> {
    Analyzer::new().check(chart)
}

/// Stable sort; chart-wide violations (no time) sort as time 0.
fn sort_by_time(violations: &mut [Violation]) {
    violations.sort_by_key(Violation::sort_time);
}

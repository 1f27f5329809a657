use crate::chart::{Chart, Note, Tier};
use crate::rules::{RuleEntry, ScaledRuleSet, Snap, ThresholdCache};

/// Everything a check reads: the chart, its scaled rules and the thresholds.
pub struct CheckContext<'a> {
    pub chart: &'a Chart,
    pub rules: &'a ScaledRuleSet,
    cache: &'a ThresholdCache,
}

impl<'a> CheckContext<'a> {
    pub fn new(chart: &'a Chart, rules: &'a ScaledRuleSet, cache: &'a ThresholdCache) -> Self {
        Self {
            chart,
            rules,
            cache,
        }
    }

    pub fn notes(&self) -> &'a [Note] {
        &self.chart.notes
    }

    pub fn tier(&self) -> Tier {
        self.rules.tier
    }

    pub fn entry(&self) -> &'a RuleEntry {
        &self.rules.rules
    }

    /// Gap in ms between notes at `snap` for this chart's tempo.
    pub fn threshold(&self, snap: Snap) -> Option<f64> {
        self.cache.threshold(self.chart.bpm, snap)
    }

    pub fn beat_ms(&self) -> Option<f64> {
        self.threshold(Snap::Whole)
    }
}

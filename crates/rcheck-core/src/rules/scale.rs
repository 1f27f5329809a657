use serde::Serialize;
use tracing::debug;

use crate::chart::Tier;
use crate::rules::{Consecutive, RuleCatalog, RuleEntry};

/// A BPM condition; tables are scanned in order and the first hit wins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Breakpoint {
    AtMost(f64),
    AtLeast(f64),
}

impl Breakpoint {
    pub fn matches(&self, bpm: f64) -> bool {
        match *self {
            Self::AtMost(limit) => bpm <= limit,
            Self::AtLeast(limit) => bpm >= limit,
        }
    }
}

/// Replacement density texts, slow breakpoints first.
pub const DENSITY_TEXTS: [(Breakpoint, &str); 7] = [
    (
        Breakpoint::AtMost(75.0),
        "Very slow tempo: 1/4 rhythms may stand in for 1/2",
    ),
    (
        Breakpoint::AtMost(90.0),
        "Slow tempo: 1/4 rhythms are acceptable in short phrases",
    ),
    (
        Breakpoint::AtMost(120.0),
        "Moderately slow tempo: density may step up one snap",
    ),
    (
        Breakpoint::AtLeast(330.0),
        "Extremely fast tempo: keep to 1/1 rhythms with sparse 1/2",
    ),
    (
        Breakpoint::AtLeast(300.0),
        "Very fast tempo: mostly 1/1 rhythms, 1/2 only in short phrases",
    ),
    (
        Breakpoint::AtLeast(270.0),
        "Fast tempo: mostly 1/2 rhythms, avoid sustained 1/4",
    ),
    (
        Breakpoint::AtLeast(240.0),
        "Fast tempo: density should step down one snap",
    ),
];

/// `(condition, factor, minimum)` for consecutive-note limits.
pub const CONSECUTIVE_FACTORS: [(Breakpoint, f64, u32); 9] = [
    (Breakpoint::AtMost(60.0), 3.0, 0),
    (Breakpoint::AtMost(75.0), 2.5, 0),
    (Breakpoint::AtMost(90.0), 2.0, 0),
    (Breakpoint::AtMost(120.0), 1.5, 0),
    (Breakpoint::AtLeast(360.0), 0.3, 1),
    (Breakpoint::AtLeast(330.0), 0.4, 1),
    (Breakpoint::AtLeast(300.0), 0.5, 2),
    (Breakpoint::AtLeast(270.0), 0.7, 2),
    (Breakpoint::AtLeast(240.0), 0.8, 2),
];

/// `(condition, delta)` for anchor limits.
pub const ANCHOR_DELTAS: [(Breakpoint, i64); 5] = [
    (Breakpoint::AtMost(90.0), 3),
    (Breakpoint::AtMost(120.0), 2),
    (Breakpoint::AtLeast(330.0), -3),
    (Breakpoint::AtLeast(300.0), -2),
    (Breakpoint::AtLeast(240.0), -1),
];

/// Anchor limits are never lowered below this.
pub const MIN_ANCHOR_LIMIT: i64 = 3;

/// A tier's rules adjusted to a chart's tempo.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaledRuleSet {
    pub tier: Tier,
    pub bpm: f64,
    /// Informational only; checks read `rules` directly.
    pub scaling_applied: bool,
    pub rules: RuleEntry,
}

/// Scale a tier's standard rules to `bpm`.
pub fn scale(tier: Tier, bpm: f64) -> Option<ScaledRuleSet> {
    scale_with_catalog(&RuleCatalog::standard(), tier, bpm)
}

/// Scale rules for a tier given by name; `None` when the name is not a tier.
pub fn scale_by_name(name: &str, bpm: f64) -> Option<ScaledRuleSet> {
    let tier = name.parse::<Tier>().ok()?;
    scale(tier, bpm)
}

/// Scale a tier's rules from `catalog`; `None` when the catalog lacks the tier.
pub fn scale_with_catalog(catalog: &RuleCatalog, tier: Tier, bpm: f64) -> Option<ScaledRuleSet> {
    let base = catalog.entry(tier)?;

    let rules = RuleEntry {
        density_description: scale_density(bpm, base.density_description.as_deref()),
        consecutive: base.consecutive.map(|c| Consecutive {
            snap: c.snap,
            limit: scale_consecutive_limit(bpm, c.limit),
        }),
        anchor_limit: base.anchor_limit.map(|a| scale_anchor_limit(bpm, a)),
        ..base.clone()
    };

    let scaling_applied = bpm < 120.0 || bpm > 240.0;
    debug!(
        "Scaled {} rules for {} BPM (scaling applied: {})",
        tier, bpm, scaling_applied
    );

    Some(ScaledRuleSet {
        tier,
        bpm,
        scaling_applied,
        rules,
    })
}

/// Swap the density description for a tempo-specific one.
pub fn scale_density(bpm: f64, base: Option<&str>) -> Option<String> {
    let base = base?;
    let text = DENSITY_TEXTS
        .iter()
        .find(|(bp, _)| bp.matches(bpm))
        .map_or(base, |(_, text)| *text);
    Some(text.to_string())
}

pub fn scale_consecutive_limit(bpm: f64, base: u32) -> u32 {
    match CONSECUTIVE_FACTORS.iter().find(|(bp, _, _)| bp.matches(bpm)) {
        Some(&(_, factor, minimum)) => {
            let scaled = (f64::from(base) * factor).floor() as u32;
            scaled.max(minimum)
        }
        None => base,
    }
}

pub fn scale_anchor_limit(bpm: f64, base: u32) -> u32 {
    match ANCHOR_DELTAS.iter().find(|(bp, _)| bp.matches(bpm)) {
        Some(&(_, delta)) if delta > 0 => base.saturating_add(delta as u32),
        Some(&(_, delta)) => (i64::from(base) + delta).max(MIN_ANCHOR_LIMIT) as u32,
        None => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consecutive_breakpoints() {
        assert_eq!(scale_consecutive_limit(90.0, 5), 10);
        assert_eq!(scale_consecutive_limit(300.0, 5), 2);
        assert_eq!(scale_consecutive_limit(180.0, 5), 5);
        assert_eq!(scale_consecutive_limit(60.0, 5), 15);
        assert_eq!(scale_consecutive_limit(75.0, 5), 12);
        assert_eq!(scale_consecutive_limit(120.0, 5), 7);
        assert_eq!(scale_consecutive_limit(240.0, 5), 4);
        assert_eq!(scale_consecutive_limit(270.0, 5), 3);
        assert_eq!(scale_consecutive_limit(330.0, 5), 2);
        assert_eq!(scale_consecutive_limit(400.0, 2), 1);
    }

    #[test]
    fn test_consecutive_fast_minimum() {
        // 4 * 0.5 = 2, 3 * 0.5 = 1 -> floored up to 2
        assert_eq!(scale_consecutive_limit(300.0, 3), 2);
        assert_eq!(scale_consecutive_limit(360.0, 1), 1);
    }

    #[test]
    fn test_anchor_breakpoints() {
        assert_eq!(scale_anchor_limit(80.0, 3), 6);
        assert_eq!(scale_anchor_limit(300.0, 3), 3);
        assert_eq!(scale_anchor_limit(110.0, 5), 7);
        assert_eq!(scale_anchor_limit(350.0, 7), 4);
        assert_eq!(scale_anchor_limit(250.0, 5), 4);
        assert_eq!(scale_anchor_limit(200.0, 5), 5);
    }

    #[test]
    fn test_density_breakpoint_order() {
        let base = Some("base");
        assert_eq!(scale_density(180.0, base).as_deref(), Some("base"));
        assert_eq!(scale_density(70.0, base).as_deref(), Some(DENSITY_TEXTS[0].1));
        assert_eq!(scale_density(90.0, base).as_deref(), Some(DENSITY_TEXTS[1].1));
        assert_eq!(scale_density(100.0, base).as_deref(), Some(DENSITY_TEXTS[2].1));
        assert_eq!(scale_density(340.0, base).as_deref(), Some(DENSITY_TEXTS[3].1));
        assert_eq!(scale_density(300.0, base).as_deref(), Some(DENSITY_TEXTS[4].1));
        assert_eq!(scale_density(280.0, base).as_deref(), Some(DENSITY_TEXTS[5].1));
        assert_eq!(scale_density(240.0, base).as_deref(), Some(DENSITY_TEXTS[6].1));
        assert_eq!(scale_density(70.0, None), None);
    }

    #[test]
    fn test_scale_tier() {
        let scaled = scale(Tier::Normal, 90.0).unwrap();
        assert!(scaled.scaling_applied);
        assert_eq!(scaled.rules.consecutive.unwrap().limit, 10);
        assert_eq!(scaled.rules.anchor_limit, Some(6));
        assert_eq!(scaled.rules.hp_cap, Some(7.5));

        let neutral = scale(Tier::Normal, 180.0).unwrap();
        assert!(!neutral.scaling_applied);
        assert_eq!(neutral.rules, *RuleCatalog::standard().entry(Tier::Normal).unwrap());
    }

    #[test]
    fn test_scale_is_deterministic() {
        assert_eq!(scale(Tier::Hard, 263.0), scale(Tier::Hard, 263.0));
    }

    #[test]
    fn test_scale_unknown_tier() {
        assert!(scale_by_name("Lunatic", 180.0).is_none());
        assert!(scale_by_name("insane", 180.0).is_some());

        let catalog = RuleCatalog::new();
        assert!(scale_with_catalog(&catalog, Tier::Hard, 180.0).is_none());
    }
}

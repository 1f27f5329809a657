//! Integration tests for rcheck-core
//!
//! These tests run whole charts through ingestion and analysis and verify
//! the properties callers rely on: ordering, determinism and rule gating.

use rcheck_core::check::registry;
use rcheck_core::{
    Analyzer, Chart, Note, RuleCatalog, RuleEntry, Severity, ThresholdCache, Tier, ViolationKind,
    check, ingest, scale,
};

fn chart_text(version: &str, hp: f64, bpm: f64, objects: &[(i64, u8, Option<i64>)]) -> String {
    let mut text = format!(
        "osu file format v14\n\n[Metadata]\nVersion:{}\n\n[Difficulty]\nHPDrainRate:{}\nCircleSize:4\nOverallDifficulty:7\n\n[TimingPoints]\n0,{},4,2,0,50,1,0\n\n[HitObjects]\n",
        version,
        hp,
        60_000.0 / bpm
    );
    for &(time, column, end) in objects {
        let x = u32::from(column) * 128 + 64;
        match end {
            Some(end) => text.push_str(&format!("{},192,{},128,0,{}:0:0:0:0:\n", x, time, end)),
            None => text.push_str(&format!("{},192,{},1,0,0:0:0:0:\n", x, time)),
        }
    }
    text
}

/// A busy 4K chart mixing streams, jacks, trills, chords and holds.
fn busy_chart(tier: Tier) -> Chart {
    let mut notes = Vec::new();
    for i in 0..64 {
        notes.push(Note::tap(0, i * 90, (i % 4) as u8));
    }
    for i in 0..10 {
        notes.push(Note::tap(0, 7000 + i * 95, 3));
    }
    for i in 0..20 {
        notes.push(Note::tap(0, 9000 + i * 80, (i % 2) as u8));
    }
    for i in 0..6 {
        notes.push(Note::tap(0, 12_000 + i * 150, 0));
        notes.push(Note::tap(0, 12_000 + i * 150, 1));
        notes.push(Note::tap(0, 12_000 + i * 150, 2));
    }
    notes.push(Note::long(0, 14_000, 2, 14_100));
    notes.push(Note::tap(0, 14_050, 2));
    notes.push(Note::tap(0, 14_050, 0));
    Chart::new("Busy", notes, 165.0, tier).with_stats(9.0, 9.0)
}

mod end_to_end {
    use super::*;

    #[test]
    fn test_hard_hp_over_cap() {
        let objects = [(1000, 0, None), (2000, 1, None), (3000, 2, None), (4000, 3, None)];
        let chart = ingest(&chart_text("Hard", 9.0, 180.0, &objects)).unwrap();
        assert_eq!(chart.tier, Tier::Hard);
        assert_eq!(chart.bpm, 180.0);

        let violations = check(&chart);
        let errors: Vec<_> = violations.iter().filter(|v| v.is_error()).collect();

        assert_eq!(errors.len(), 1);
        let v = errors[0];
        assert_eq!(v.kind, ViolationKind::HpDrainRate);
        assert_eq!(v.kind.as_str(), "HP Drain Rate");
        assert_eq!(v.time, None);
        assert!(v.message.contains('9'));
        assert!(v.message.contains('8'));
    }

    #[test]
    fn test_normal_seven_note_consecutive() {
        let objects: Vec<(i64, u8, Option<i64>)> =
            (0..7).map(|i| (1000 + i * 100, 0, None)).collect();
        let chart = ingest(&chart_text("Normal", 5.0, 150.0, &objects)).unwrap();
        assert_eq!(chart.tier, Tier::Normal);
        assert_eq!(chart.bpm, 150.0);

        let violations = check(&chart);
        let consecutive: Vec<_> = violations
            .iter()
            .filter(|v| v.kind == ViolationKind::Consecutive)
            .collect();

        assert_eq!(consecutive.len(), 1);
        assert_eq!(consecutive[0].severity, Severity::Warning);
        assert_eq!(consecutive[0].note_ids.len(), 7);
        assert_eq!(consecutive[0].time, Some(1000));
        assert_eq!(consecutive[0].end_time, Some(1600));
    }

    #[test]
    fn test_shield_from_ingested_hold() {
        let objects = [(1000, 1, Some(2000)), (1500, 1, None)];
        let chart = ingest(&chart_text("Insane", 5.0, 180.0, &objects)).unwrap();

        let shields: Vec<_> = check(&chart)
            .into_iter()
            .filter(|v| v.kind == ViolationKind::Shield)
            .collect();
        assert_eq!(shields.len(), 1);
        assert_eq!(shields[0].note_ids, vec![0, 1]);
    }
}

mod properties {
    use super::*;

    #[test]
    fn test_output_sorted_by_time() {
        for tier in [Tier::Easy, Tier::Normal, Tier::Hard, Tier::Insane, Tier::Expert] {
            let violations = check(&busy_chart(tier));
            assert!(
                violations
                    .windows(2)
                    .all(|w| w[0].sort_time() <= w[1].sort_time()),
                "unsorted output for {}",
                tier
            );
        }
    }

    #[test]
    fn test_check_is_idempotent() {
        let chart = busy_chart(Tier::Normal);
        let analyzer = Analyzer::new();
        let first = analyzer.check(&chart);
        let second = analyzer.check(&chart);
        assert!(!first.is_empty());
        assert_eq!(first, second);
        assert_eq!(first, check(&chart));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        for tier in [Tier::Easy, Tier::Normal, Tier::Hard, Tier::Insane] {
            let chart = busy_chart(tier);
            let analyzer = Analyzer::new();
            assert_eq!(analyzer.check(&chart), analyzer.check_parallel(&chart));
        }
    }

    #[test]
    fn test_warm_cache_matches_fresh_cache() {
        let chart = busy_chart(Tier::Hard);
        let warm = ThresholdCache::new();
        warm.warm(chart.bpm);

        let cached = Analyzer::new().with_cache(warm).check(&chart);
        let fresh = Analyzer::new().check(&chart);
        assert_eq!(cached, fresh);
    }

    #[test]
    fn test_scale_is_pure() {
        for bpm in [59.0, 90.0, 150.0, 241.0, 333.0] {
            assert_eq!(scale(Tier::Normal, bpm), scale(Tier::Normal, bpm));
        }
    }

    #[test]
    fn test_null_trill_rule_never_reports_trills() {
        let notes: Vec<Note> = (0..64).map(|i| Note::tap(0, i * 50, (i % 2) as u8)).collect();
        for tier in [Tier::Easy, Tier::Insane, Tier::Expert] {
            let chart = Chart::new("Trill", notes.clone(), 180.0, tier);
            assert!(
                check(&chart).iter().all(|v| v.kind != ViolationKind::Trill),
                "trill reported on {}",
                tier
            );
        }
    }

    #[test]
    fn test_expert_reports_only_shields() {
        let violations = check(&busy_chart(Tier::Expert));
        assert!(!violations.is_empty());
        assert!(violations.iter().all(|v| v.kind == ViolationKind::Shield));
    }

    #[test]
    fn test_zero_bpm_does_not_panic() {
        let mut chart = busy_chart(Tier::Normal);
        chart.bpm = 0.0;
        let violations = check(&chart);

        // Tempo-free checks still run
        assert!(violations.iter().any(|v| v.kind == ViolationKind::HpDrainRate));
        assert!(violations.iter().any(|v| v.kind == ViolationKind::Shield));
        assert!(violations.iter().all(|v| v.kind != ViolationKind::Consecutive));
    }

    #[test]
    fn test_every_check_skips_empty_rules() {
        let mut catalog = RuleCatalog::new();
        catalog.insert(Tier::Expert, RuleEntry::default());
        let chart = busy_chart(Tier::Expert);

        let kinds: Vec<ViolationKind> = Analyzer::with_catalog(catalog)
            .check(&chart)
            .iter()
            .map(|v| v.kind)
            .collect();
        assert!(kinds.iter().all(|&k| k == ViolationKind::Shield));
        assert_eq!(registry().len(), 18);
    }

    #[test]
    fn test_tiny_beat_length_finishes() {
        let mut text = String::from(
            "[Metadata]\nVersion:Hard\n\n[TimingPoints]\n0,1e-9,4,2,0,50,1,0\n\n[HitObjects]\n",
        );
        for i in 0..20 {
            text.push_str(&format!("{},192,{},1,0,0:0:0:0:\n", (i % 4) * 128 + 64, i * 1000));
        }
        let chart = ingest(&text).unwrap();
        assert_eq!(chart.bpm, 6e13);

        let analyzer = Analyzer::new();
        assert_eq!(analyzer.check(&chart), analyzer.check_parallel(&chart));
    }

    #[test]
    fn test_extreme_note_times_do_not_panic() {
        let text = "[Metadata]\nVersion:Normal\n\n[HitObjects]\n\
            64,192,-9223372036854775808,1,0\n\
            192,192,-9223372036854775808,1,0\n\
            320,192,0,128,0,9223372036854775807:0:0:0:0:\n\
            448,192,9223372036854775807,1,0\n\
            448,192,9223372036854775807,1,0\n";
        let chart = ingest(text).unwrap();
        assert_eq!(chart.tier, Tier::Normal);

        let violations = check(&chart);
        assert!(
            violations
                .windows(2)
                .all(|w| w[0].sort_time() <= w[1].sort_time())
        );
    }
}

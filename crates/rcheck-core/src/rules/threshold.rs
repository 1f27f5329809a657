use std::collections::HashMap;
use std::sync::RwLock;

use strum::IntoEnumIterator;

use crate::rules::Snap;

/// Memoized `(bpm, snap) -> ms` thresholds.
///
/// Entries are pure functions of their key, so concurrent callers may race
/// to insert the same value without harm. A poisoned lock falls back to
/// computing the value directly.
#[derive(Debug, Default)]
pub struct ThresholdCache {
    entries: RwLock<HashMap<(u64, Snap), f64>>,
}

impl ThresholdCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds between notes at `snap`, or `None` for unusable tempos.
    pub fn compute(bpm: f64, snap: Snap) -> Option<f64> {
        if !(bpm > 0.0 && bpm.is_finite()) {
            return None;
        }
        Some(60_000.0 / bpm / f64::from(snap.divisor()))
    }

    pub fn threshold(&self, bpm: f64, snap: Snap) -> Option<f64> {
        let key = (bpm.to_bits(), snap);

        if let Ok(entries) = self.entries.read()
            && let Some(&ms) = entries.get(&key)
        {
            return Some(ms);
        }

        let ms = Self::compute(bpm, snap)?;
        if let Ok(mut entries) = self.entries.write() {
            entries.entry(key).or_insert(ms);
        }
        Some(ms)
    }

    /// Fill the cache for every snap at `bpm` before fanning out.
    pub fn warm(&self, bpm: f64) {
        for snap in Snap::iter() {
            let _ = self.threshold(bpm, snap);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_threshold() {
        assert_eq!(ThresholdCache::compute(150.0, Snap::Quarter), Some(100.0));
        assert_eq!(ThresholdCache::compute(120.0, Snap::Whole), Some(500.0));
        assert_eq!(ThresholdCache::compute(0.0, Snap::Quarter), None);
        assert_eq!(ThresholdCache::compute(-120.0, Snap::Quarter), None);
        assert_eq!(ThresholdCache::compute(f64::NAN, Snap::Quarter), None);
    }

    #[test]
    fn test_cached_matches_uncached() {
        let cache = ThresholdCache::new();
        for bpm in [60.0, 133.0, 180.0, 222.5, 360.0] {
            let first = cache.threshold(bpm, Snap::Eighth);
            let second = cache.threshold(bpm, Snap::Eighth);
            assert_eq!(first, ThresholdCache::compute(bpm, Snap::Eighth));
            assert_eq!(first, second);
        }
        assert_eq!(cache.len(), 5);
    }

    #[test]
    fn test_invalid_bpm_not_cached() {
        let cache = ThresholdCache::new();
        assert_eq!(cache.threshold(0.0, Snap::Half), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_warm_fills_every_snap() {
        let cache = ThresholdCache::new();
        cache.warm(200.0);
        assert_eq!(cache.len(), 8);
    }
}

//! Analysis constants.
//!
//! This module groups the fixed values the ingestion and check stages share:
//! - Fallbacks used when a chart omits a field
//! - Tolerances applied to BPM-derived snap thresholds
//! - Window sizes used by the shape-based checks

/// Fallback values for fields missing from chart text.
pub mod defaults {
    /// Tempo used when no timing row has a positive beat length.
    pub const BPM: f64 = 180.0;

    /// HP drain rate used when `HPDrainRate` is absent.
    pub const HP: f64 = 5.0;

    /// Overall difficulty used when `OverallDifficulty` is absent.
    pub const OD: f64 = 5.0;

    /// Key count used when `CircleSize` is absent.
    pub const COLUMNS: u8 = 4;

    /// Valid key count range after flooring `CircleSize`.
    pub const MIN_COLUMNS: u8 = 1;
    pub const MAX_COLUMNS: u8 = 18;

    /// Horizontal playfield width that hit-object `x` positions span.
    pub const PLAYFIELD_WIDTH: f64 = 512.0;

    /// Note times are clamped to `[-MAX_TIME_MS, MAX_TIME_MS]` so gap
    /// arithmetic cannot overflow.
    pub const MAX_TIME_MS: i64 = 1 << 40;
}

/// Multipliers applied to snap thresholds.
///
/// A gap counts as "at least as dense as the snap" when it is at most
/// `threshold * tolerance`, which absorbs millisecond rounding in charts.
pub mod tolerance {
    /// Run-length and density scans.
    pub const RUN: f64 = 1.1;

    /// Classifier-based checks comparing a window's average gap.
    pub const SHAPE: f64 = 1.2;

    /// Edge guard (ms) for hold windows and long-note minimums.
    pub const HOLD_EPSILON_MS: f64 = 5.0;
}

/// Window sizes (in notes) for shape-based checks.
pub mod window {
    pub const TRILL: usize = 5;
    pub const SPLIT_JUMPTRILL: usize = 6;
    pub const ROLL: usize = 4;
    pub const EIGHTH_STREAM: usize = 8;
    pub const LN_STREAM: usize = 5;
    pub const HAND_SPACING: usize = 12;

    /// Density windows span this many beats and slide by one beat.
    pub const DENSITY_BEATS: f64 = 8.0;

    /// Density windows with fewer distinct timestamps are ignored.
    pub const DENSITY_MIN_TIMESTAMPS: usize = 8;
}

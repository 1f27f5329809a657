//! Violation records produced by the checks.

use serde::{Serialize, Serializer};
use strum::{Display, EnumIter, IntoStaticStr};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Display, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
pub enum ViolationKind {
    #[strum(serialize = "HP Drain Rate")]
    HpDrainRate,
    #[strum(serialize = "Overall Difficulty")]
    OverallDifficulty,
    Density,
    Consecutive,
    Anchor,
    #[strum(serialize = "1/4 Jack")]
    QuarterJack,
    #[strum(serialize = "Chord Size")]
    ChordSize,
    Trill,
    #[strum(serialize = "Split Jumptrill")]
    SplitJumptrill,
    #[strum(serialize = "Long Roll")]
    LongRoll,
    #[strum(serialize = "1/8 Stream")]
    EighthStream,
    #[strum(serialize = "LN Stream")]
    LnStream,
    #[strum(serialize = "Grace Note")]
    GraceNote,
    #[strum(serialize = "Hand Spacing")]
    HandSpacing,
    Bracket,
    #[strum(serialize = "LN Length")]
    LnLength,
    #[strum(serialize = "LN Gap")]
    LnGap,
    #[strum(serialize = "LN Hold-through")]
    LnHoldThrough,
    Shield,
}

impl ViolationKind {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

impl Serialize for ViolationKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One broken rule, located by time span and note ids.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    pub kind: ViolationKind,
    pub severity: Severity,
    pub message: String,
    /// `None` for chart-wide settings violations
    pub time: Option<i64>,
    pub end_time: Option<i64>,
    pub note_ids: Vec<u32>,
    pub rule: String,
}

impl Violation {
    pub fn new(
        kind: ViolationKind,
        severity: Severity,
        message: impl Into<String>,
        rule: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            severity,
            message: message.into(),
            time: None,
            end_time: None,
            note_ids: Vec::new(),
            rule: rule.into(),
        }
    }

    /// Locate the violation on the notes it refers to.
    ///
    /// `time` is the earliest note start, `end_time` the latest start or
    /// release among them.
    pub fn at_notes(mut self, notes: &[crate::chart::Note]) -> Self {
        self.time = notes.iter().map(|n| n.time).min();
        self.end_time = notes.iter().map(|n| n.end_time.unwrap_or(n.time)).max();
        self.note_ids = notes.iter().map(|n| n.id).collect();
        self
    }

    /// Sort key: chart-wide violations sort as time 0.
    pub fn sort_time(&self) -> i64 {
        self.time.unwrap_or(0)
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

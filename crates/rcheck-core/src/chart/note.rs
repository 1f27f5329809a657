use serde::{Deserialize, Serialize};

use crate::config::defaults;

/// A single tap or hold event.
///
/// `id` only identifies the note inside one analysis run; two notes with the
/// same timing and column but different ids are distinct objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: u32,
    /// Milliseconds from chart start
    pub time: i64,
    /// 0-based column index
    pub column: u8,
    /// Release time, present only for long notes
    pub end_time: Option<i64>,
}

impl Note {
    pub fn tap(id: u32, time: i64, column: u8) -> Self {
        Self {
            id,
            time,
            column,
            end_time: None,
        }
    }

    /// Create a long note. An `end_time` not after `time` yields a tap.
    pub fn long(id: u32, time: i64, column: u8, end_time: i64) -> Self {
        Self {
            id,
            time,
            column,
            end_time: (end_time > time).then_some(end_time),
        }
    }

    /// Copy with times clamped into the supported range and the column
    /// capped below `columns`.
    pub fn normalized(&self, columns: u8) -> Self {
        let time = clamp_time(self.time);
        Self {
            id: self.id,
            time,
            column: self.column.min(columns.saturating_sub(1)),
            end_time: self.end_time.map(clamp_time).filter(|&end| end > time),
        }
    }

    pub fn is_long(&self) -> bool {
        self.end_time.is_some()
    }

    /// Hold length in ms (0 for taps)
    pub fn length(&self) -> i64 {
        self.end_time.map_or(0, |end| end.saturating_sub(self.time))
    }
}

/// Clamp a time into `[-MAX_TIME_MS, MAX_TIME_MS]`.
pub fn clamp_time(ms: i64) -> i64 {
    ms.clamp(-defaults::MAX_TIME_MS, defaults::MAX_TIME_MS)
}

/// A fully ingested chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    /// Display name of the difficulty
    pub name: String,
    /// Notes sorted ascending by time; chords keep encounter order
    pub notes: Vec<Note>,
    pub bpm: f64,
    pub columns: u8,
    pub hp: f64,
    pub od: f64,
    pub tier: super::Tier,
}

impl Chart {
    /// Build a chart from raw notes.
    ///
    /// Notes are stably sorted by time and re-numbered by position so that
    /// ids are unique for this chart. The key count is the widest column
    /// used (at least the default), capped at `MAX_COLUMNS`; times and
    /// columns outside the supported range are clamped.
    pub fn new(name: impl Into<String>, notes: Vec<Note>, bpm: f64, tier: super::Tier) -> Self {
        let columns = notes
            .iter()
            .map(|n| n.column.saturating_add(1))
            .max()
            .unwrap_or(defaults::COLUMNS)
            .clamp(defaults::COLUMNS, defaults::MAX_COLUMNS);

        let mut notes: Vec<Note> = notes.iter().map(|n| n.normalized(columns)).collect();
        notes.sort_by_key(|n| n.time);
        for (index, note) in notes.iter_mut().enumerate() {
            note.id = index as u32;
        }

        Self {
            name: name.into(),
            notes,
            bpm,
            columns,
            hp: defaults::HP,
            od: defaults::OD,
            tier,
        }
    }

    pub fn with_columns(mut self, columns: u8) -> Self {
        self.columns = columns.clamp(defaults::MIN_COLUMNS, defaults::MAX_COLUMNS);
        self
    }

    pub fn with_stats(mut self, hp: f64, od: f64) -> Self {
        self.hp = hp;
        self.od = od;
        self
    }

    pub fn with_tier(mut self, tier: super::Tier) -> Self {
        self.tier = tier;
        self
    }

    /// Length of one beat in ms, or `None` when the tempo is unusable.
    pub fn beat_ms(&self) -> Option<f64> {
        (self.bpm > 0.0 && self.bpm.is_finite()).then(|| 60_000.0 / self.bpm)
    }

    pub fn long_note_count(&self) -> usize {
        self.notes.iter().filter(|n| n.is_long()).count()
    }

    /// Time of the last note event, counting hold releases.
    pub fn duration_ms(&self) -> i64 {
        self.notes
            .iter()
            .map(|n| n.end_time.unwrap_or(n.time))
            .max()
            .unwrap_or(0)
    }
}

use serde::Serialize;

use crate::chart::Note;
use crate::pattern::{chord_columns, chords};

/// Shape of a window of notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Shape {
    Unknown,
    Jack,
    Trill,
    Roll { ascending: bool },
    SplitJumptrill,
    Stream { columns: usize },
}

impl Shape {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Jack => "jack",
            Self::Trill => "trill",
            Self::Roll { .. } => "roll",
            Self::SplitJumptrill => "split jumptrill",
            Self::Stream { .. } => "stream",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Classification {
    pub shape: Shape,
    /// Mean gap between consecutive notes in ms (0 for fewer than 2 notes)
    pub avg_gap: f64,
}

type Rule = fn(&[Note]) -> Option<Shape>;

/// Classification rules in precedence order; the first to return a shape wins.
pub const RULES: [(&str, Rule); 6] = [
    ("too short", too_short),
    ("jack", jack),
    ("trill", trill),
    ("roll", roll),
    ("split jumptrill", split_jumptrill),
    ("stream", stream),
];

/// Minimum window length for a roll.
const MIN_ROLL_LEN: usize = 4;

/// Minimum chord count for a split jumptrill.
const MIN_JUMPTRILL_CHORDS: usize = 3;

pub fn classify(window: &[Note]) -> Classification {
    let shape = RULES
        .iter()
        .find_map(|(_, rule)| rule(window))
        .unwrap_or(Shape::Unknown);

    Classification {
        shape,
        avg_gap: average_gap(window),
    }
}

pub fn average_gap(window: &[Note]) -> f64 {
    if window.len() < 2 {
        return 0.0;
    }
    let total: i64 = window.windows(2).map(|w| w[1].time - w[0].time).sum();
    total as f64 / (window.len() - 1) as f64
}

fn distinct_columns(window: &[Note]) -> Vec<u8> {
    let mut columns: Vec<u8> = window.iter().map(|n| n.column).collect();
    columns.sort_unstable();
    columns.dedup();
    columns
}

fn too_short(window: &[Note]) -> Option<Shape> {
    (window.len() < 2).then_some(Shape::Unknown)
}

fn jack(window: &[Note]) -> Option<Shape> {
    let first = window.first()?.column;
    window
        .iter()
        .all(|n| n.column == first)
        .then_some(Shape::Jack)
}

fn trill(window: &[Note]) -> Option<Shape> {
    let alternates = window.windows(2).all(|w| w[0].column != w[1].column);
    (distinct_columns(window).len() == 2 && alternates).then_some(Shape::Trill)
}

fn roll(window: &[Note]) -> Option<Shape> {
    if window.len() < MIN_ROLL_LEN {
        return None;
    }
    let steps: Vec<i16> = window
        .windows(2)
        .map(|w| i16::from(w[1].column) - i16::from(w[0].column))
        .collect();

    if steps.iter().all(|&s| s == 1) {
        Some(Shape::Roll { ascending: true })
    } else if steps.iter().all(|&s| s == -1) {
        Some(Shape::Roll { ascending: false })
    } else {
        None
    }
}

fn split_jumptrill(window: &[Note]) -> Option<Shape> {
    let groups = chords(window);
    if groups.len() < MIN_JUMPTRILL_CHORDS || groups.iter().any(|c| c.len() != 2) {
        return None;
    }

    let pairs: Vec<Vec<u8>> = groups.iter().map(|c| chord_columns(c)).collect();
    if pairs.iter().any(|p| p.len() != 2) {
        return None;
    }

    let alternates = pairs.windows(2).all(|w| w[0] != w[1])
        && pairs.windows(3).all(|w| w[0] == w[2]);
    alternates.then_some(Shape::SplitJumptrill)
}

fn stream(window: &[Note]) -> Option<Shape> {
    Some(Shape::Stream {
        columns: distinct_columns(window).len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_notes(columns: &[u8], gap: i64) -> Vec<Note> {
        columns
            .iter()
            .enumerate()
            .map(|(i, &c)| Note::tap(i as u32, i as i64 * gap, c))
            .collect()
    }

    fn chord_notes(pairs: &[[u8; 2]], gap: i64) -> Vec<Note> {
        let mut notes = Vec::new();
        for (i, pair) in pairs.iter().enumerate() {
            for &column in pair {
                notes.push(Note::tap(notes.len() as u32, i as i64 * gap, column));
            }
        }
        notes
    }

    #[test]
    fn test_classify_jack() {
        let c = classify(&single_notes(&[0, 0, 0, 0, 0], 100));
        assert_eq!(c.shape, Shape::Jack);
        assert_eq!(c.avg_gap, 100.0);
    }

    #[test]
    fn test_classify_trill() {
        let c = classify(&single_notes(&[0, 1, 0, 1, 0], 80));
        assert_eq!(c.shape, Shape::Trill);
    }

    #[test]
    fn test_classify_roll() {
        let up = classify(&single_notes(&[0, 1, 2, 3], 50));
        assert_eq!(up.shape, Shape::Roll { ascending: true });

        let down = classify(&single_notes(&[3, 2, 1, 0], 50));
        assert_eq!(down.shape, Shape::Roll { ascending: false });

        // Three notes are too short for a roll
        let short = classify(&single_notes(&[0, 1, 2], 50));
        assert_eq!(short.shape, Shape::Stream { columns: 3 });
    }

    #[test]
    fn test_classify_split_jumptrill() {
        let notes = chord_notes(&[[0, 1], [2, 3], [0, 1]], 100);
        assert_eq!(notes.len(), 6);
        let c = classify(&notes);
        assert_eq!(c.shape, Shape::SplitJumptrill);
    }

    #[test]
    fn test_split_jumptrill_needs_alternation() {
        let notes = chord_notes(&[[0, 1], [2, 3], [1, 2]], 100);
        assert_eq!(classify(&notes).shape, Shape::Stream { columns: 4 });
    }

    #[test]
    fn test_classify_stream() {
        let c = classify(&single_notes(&[0, 2, 1, 3, 0, 2], 60));
        assert_eq!(c.shape, Shape::Stream { columns: 4 });
    }

    #[test]
    fn test_classify_short_window() {
        assert_eq!(classify(&[]).shape, Shape::Unknown);
        let one = classify(&single_notes(&[2], 100));
        assert_eq!(one.shape, Shape::Unknown);
        assert_eq!(one.avg_gap, 0.0);
    }

    #[test]
    fn test_rule_precedence() {
        // Two columns alternating is a trill before it can be a roll
        let c = classify(&single_notes(&[1, 2, 1, 2], 50));
        assert_eq!(c.shape, Shape::Trill);

        let names: Vec<&str> = RULES.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            ["too short", "jack", "trill", "roll", "split jumptrill", "stream"]
        );
    }
}

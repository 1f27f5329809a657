use std::ops::Range;

use crate::chart::Note;
use crate::pattern::chord_starts;

/// Round half away from zero to whole milliseconds.
pub fn round_ms(value: f64) -> i64 {
    value.round() as i64
}

/// Format a stat value without a trailing `.0` ("9", "7.5", "8.25").
pub fn fmt_num(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    let text = format!("{:.2}", rounded);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Ratio as a whole percentage.
pub fn percent(ratio: f64) -> i64 {
    (ratio * 100.0).round() as i64
}

pub fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}s", count, word)
    }
}

/// Note index ranges of each same-time group.
pub fn group_ranges(notes: &[Note]) -> Vec<Range<usize>> {
    let starts = chord_starts(notes);
    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| start..starts.get(i + 1).copied().unwrap_or(notes.len()))
        .collect()
}

/// Runs of consecutive items where `joins(prev, next)` holds for every
/// neighbouring pair. Only runs of two or more items are returned.
pub fn runs_where<T>(items: &[T], mut joins: impl FnMut(&T, &T) -> bool) -> Vec<Range<usize>> {
    let mut runs = Vec::new();
    let mut start = 0;

    for i in 1..=items.len() {
        let continues = i < items.len() && joins(&items[i - 1], &items[i]);
        if !continues {
            if i - start >= 2 {
                runs.push(start..i);
            }
            start = i;
        }
    }

    runs
}

/// Indices into `notes` of each column's notes, in time order.
pub fn column_indices(notes: &[Note], columns: u8) -> Vec<Vec<usize>> {
    let mut by_column = vec![Vec::new(); usize::from(columns.max(1))];
    for (index, note) in notes.iter().enumerate() {
        if let Some(list) = by_column.get_mut(usize::from(note.column)) {
            list.push(index);
        }
    }
    by_column
}

/// Notes of a run of group ranges, flattened.
pub fn group_notes<'a>(notes: &'a [Note], groups: &[Range<usize>]) -> &'a [Note] {
    match (groups.first(), groups.last()) {
        (Some(first), Some(last)) => &notes[first.start..last.end],
        _ => &[],
    }
}

/// Display a 0-based column as the 1-based key players see.
pub fn key(column: u8) -> u16 {
    u16::from(column) + 1
}

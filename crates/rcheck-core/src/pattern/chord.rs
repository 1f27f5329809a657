use crate::chart::Note;

/// Split a time-sorted note slice into runs of same-time notes.
pub fn chords(notes: &[Note]) -> Vec<&[Note]> {
    notes.chunk_by(|a, b| a.time == b.time).collect()
}

/// Index of the first note of every chord.
pub fn chord_starts(notes: &[Note]) -> Vec<usize> {
    let mut starts = Vec::new();
    for (index, note) in notes.iter().enumerate() {
        if index == 0 || notes[index - 1].time != note.time {
            starts.push(index);
        }
    }
    starts
}

/// Sorted column set of a chord.
pub fn chord_columns(chord: &[Note]) -> Vec<u8> {
    let mut columns: Vec<u8> = chord.iter().map(|n| n.column).collect();
    columns.sort_unstable();
    columns.dedup();
    columns
}

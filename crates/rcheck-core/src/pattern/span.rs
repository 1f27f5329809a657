use tracing::trace;

use crate::chart::Note;
use crate::pattern::{Classification, classify};

/// A contiguous run of notes `[start, end)` sharing one pattern key.
#[derive(Debug, Clone, PartialEq)]
pub struct Span<K> {
    pub start: usize,
    pub end: usize,
    pub key: K,
}

impl<K> Span<K> {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }

    pub fn notes<'a>(&self, notes: &'a [Note]) -> &'a [Note] {
        &notes[self.start..self.end]
    }
}

/// Slide a fixed-size window over `notes` and merge agreeing windows.
///
/// Each window starting at an index from `starts` is classified and passed
/// to `key_fn`. A `Some(key)` window extends the open span when the key is
/// equal and the window overlaps or touches it; otherwise the open span is
/// closed and a new one begins. `None` windows leave the open span as is.
pub fn scan_spans<K, I, F>(notes: &[Note], starts: I, window: usize, mut key_fn: F) -> Vec<Span<K>>
where
    K: PartialEq + std::fmt::Debug,
    I: IntoIterator<Item = usize>,
    F: FnMut(&[Note], &Classification) -> Option<K>,
{
    let mut spans = Vec::new();
    let mut current: Option<Span<K>> = None;

    if window == 0 {
        return spans;
    }

    for start in starts {
        let end = start + window;
        if end > notes.len() {
            break;
        }

        let slice = &notes[start..end];
        let classification = classify(slice);
        let Some(key) = key_fn(slice, &classification) else {
            continue;
        };

        match current.as_mut() {
            Some(span) if span.key == key && start <= span.end => {
                span.end = span.end.max(end);
            }
            _ => {
                if let Some(span) = current.take() {
                    trace!("Closed span {}..{} ({:?})", span.start, span.end, span.key);
                    spans.push(span);
                }
                current = Some(Span { start, end, key });
            }
        }
    }

    if let Some(span) = current {
        trace!("Closed span {}..{} ({:?})", span.start, span.end, span.key);
        spans.push(span);
    }

    spans
}

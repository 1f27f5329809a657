//! Pattern classification for windows of consecutive notes.
//!
//! - `classify` - labels a window (jack, trill, roll, split jumptrill, stream)
//! - `scan_spans` - merges agreeing windows into contiguous pattern spans
//! - `chords` - grouping of same-time notes

mod chord;
mod classify;
mod span;

pub use chord::*;
pub use classify::*;
pub use span::*;

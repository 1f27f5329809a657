//! Chart-related types and ingestion.
//!
//! This module contains types for representing a single chart difficulty:
//! - `Note` - a tap or hold event in one column
//! - `Chart` - the ordered note list plus tempo, key count and stats
//! - `Tier` - difficulty tiers (Easy, Normal, Hard, Insane, Expert)
//! - `ingest` - parsing of chart text into a `Chart`

mod ingest;
mod note;
mod tier;

pub use ingest::*;
pub use note::*;
pub use tier::*;

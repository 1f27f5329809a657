//! Authoring rules per difficulty tier.
//!
//! This module contains:
//! - `RuleCatalog`, `RuleEntry` - the sparse per-tier rule table
//! - `scale` - BPM-relative adjustment of a tier's rules
//! - `ThresholdCache` - memoized snap thresholds in milliseconds

mod catalog;
mod scale;
mod threshold;

pub use catalog::*;
pub use scale::*;
pub use threshold::*;

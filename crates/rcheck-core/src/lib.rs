//! # rcheck-core
//!
//! Ranking-criteria checker for vertical-scrolling key charts.
//!
//! This crate provides:
//! - Chart ingestion into a normalized note model
//! - A per-tier rule catalog and BPM-relative rule scaling
//! - A pattern classifier for windows of consecutive notes
//! - Eighteen violation checks merged by a single entry point
//! - Console and JSON rendering of the resulting violations

pub mod chart;
pub mod check;
pub mod config;
pub mod error;
pub mod pattern;
pub mod report;
pub mod rules;
pub mod violation;

// Re-export from chart module
pub use chart::{Chart, Note, Tier, detect_tier, ingest, ingest_with_tier};

// Re-export from check module
pub use check::{Analyzer, Check, CheckContext, check};

// Re-export from error module
pub use error::{Error, Result};

// Re-export from pattern module
pub use pattern::{Classification, Shape, classify};

// Re-export from rules module
pub use rules::{
    Consecutive, RuleCatalog, RuleEntry, ScaledRuleSet, Snap, ThresholdCache, scale,
    scale_by_name, scale_with_catalog,
};

// Re-export from violation module
pub use violation::{Severity, Violation, ViolationKind};

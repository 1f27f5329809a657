use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::chart::Tier;
use crate::error::Result;

/// Beat subdivision labels.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
pub enum Snap {
    #[serde(rename = "1/1")]
    #[strum(serialize = "1/1")]
    Whole,
    #[serde(rename = "1/2")]
    #[strum(serialize = "1/2")]
    Half,
    #[serde(rename = "1/3")]
    #[strum(serialize = "1/3")]
    Third,
    #[serde(rename = "1/4")]
    #[strum(serialize = "1/4")]
    Quarter,
    #[serde(rename = "1/6")]
    #[strum(serialize = "1/6")]
    Sixth,
    #[serde(rename = "1/8")]
    #[strum(serialize = "1/8")]
    Eighth,
    #[serde(rename = "1/12")]
    #[strum(serialize = "1/12")]
    Twelfth,
    #[serde(rename = "1/16")]
    #[strum(serialize = "1/16")]
    Sixteenth,
}

impl Snap {
    /// Notes per beat at this snap.
    pub fn divisor(&self) -> u32 {
        match self {
            Self::Whole => 1,
            Self::Half => 2,
            Self::Third => 3,
            Self::Quarter => 4,
            Self::Sixth => 6,
            Self::Eighth => 8,
            Self::Twelfth => 12,
            Self::Sixteenth => 16,
        }
    }

    pub fn label(&self) -> &'static str {
        self.into()
    }
}

/// Limit on notes in a row at a given snap or denser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consecutive {
    pub snap: Snap,
    pub limit: u32,
}

/// Rules for one tier. `None` means the tier has no rule for that dimension.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleEntry {
    pub density_description: Option<String>,
    pub consecutive: Option<Consecutive>,
    pub snapping_note: Option<String>,
    pub long_note_min: Option<Snap>,
    pub long_note_gap: Option<Snap>,
    pub anchor_limit: Option<u32>,
    pub hp_cap: Option<f64>,
    pub od_cap: Option<f64>,
    pub trill_limit: Option<u32>,
    pub split_jumptrill_limit: Option<u32>,
}

/// Sparse tier → rules table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleCatalog {
    tiers: BTreeMap<Tier, RuleEntry>,
}

impl RuleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in ranking criteria.
    pub fn standard() -> Self {
        let mut catalog = Self::new();

        catalog.insert(
            Tier::Easy,
            RuleEntry {
                density_description: Some("Mostly 1/1 rhythms with occasional 1/2".to_string()),
                consecutive: Some(Consecutive {
                    snap: Snap::Half,
                    limit: 4,
                }),
                snapping_note: Some("Avoid 1/4 and finer snaps".to_string()),
                long_note_min: Some(Snap::Whole),
                long_note_gap: Some(Snap::Whole),
                anchor_limit: None,
                hp_cap: Some(7.0),
                od_cap: Some(7.0),
                trill_limit: None,
                split_jumptrill_limit: None,
            },
        );

        catalog.insert(
            Tier::Normal,
            RuleEntry {
                density_description: Some(
                    "Mostly 1/2 rhythms with short 1/4 bursts".to_string(),
                ),
                consecutive: Some(Consecutive {
                    snap: Snap::Quarter,
                    limit: 5,
                }),
                snapping_note: Some("Avoid 1/6 and 1/8 snaps".to_string()),
                long_note_min: Some(Snap::Half),
                long_note_gap: Some(Snap::Half),
                anchor_limit: Some(3),
                hp_cap: Some(7.5),
                od_cap: Some(7.5),
                trill_limit: Some(8),
                split_jumptrill_limit: None,
            },
        );

        catalog.insert(
            Tier::Hard,
            RuleEntry {
                density_description: Some("1/4 rhythms with short 1/8 bursts".to_string()),
                consecutive: Some(Consecutive {
                    snap: Snap::Quarter,
                    limit: 12,
                }),
                snapping_note: Some("1/8 only as short bursts".to_string()),
                long_note_min: Some(Snap::Quarter),
                long_note_gap: Some(Snap::Quarter),
                anchor_limit: Some(5),
                hp_cap: Some(8.0),
                od_cap: Some(8.0),
                trill_limit: Some(16),
                split_jumptrill_limit: Some(4),
            },
        );

        catalog.insert(
            Tier::Insane,
            RuleEntry {
                long_note_min: Some(Snap::Eighth),
                anchor_limit: Some(7),
                split_jumptrill_limit: Some(8),
                ..Default::default()
            },
        );

        catalog.insert(Tier::Expert, RuleEntry::default());

        catalog
    }

    /// Load a catalog from a JSON file keyed by tier name.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn insert(&mut self, tier: Tier, entry: RuleEntry) {
        self.tiers.insert(tier, entry);
    }

    pub fn entry(&self, tier: Tier) -> Option<&RuleEntry> {
        self.tiers.get(&tier)
    }

    pub fn tiers(&self) -> impl Iterator<Item = (&Tier, &RuleEntry)> {
        self.tiers.iter()
    }
}

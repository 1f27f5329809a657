use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Tier {
    Easy,
    #[default]
    Normal,
    Hard,
    Insane,
    Expert,
}

impl Tier {
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

/// Keyword groups checked in order; the first group with a hit wins.
const TIER_KEYWORDS: [(Tier, &[&str]); 5] = [
    (
        Tier::Expert,
        &["expert", "extra", "extreme", "lunatic", "another", "shd", "sc"],
    ),
    (Tier::Insane, &["insane", "mx", "maximum", "crazy"]),
    (Tier::Hard, &["hard", "hd", "hyper", "advanced"]),
    (Tier::Normal, &["normal", "nm", "novice", "medium"]),
    (Tier::Easy, &["easy", "ez", "beginner", "basic"]),
];

/// Keywords this short only match whole tokens ("sc" must not hit "scary").
const SHORT_KEYWORD_LEN: usize = 3;

/// Detect the tier from a difficulty display name.
///
/// Falls back to `Hard` for names carrying a decimal star rating
/// (e.g. "4.25*") and to `Normal` otherwise.
pub fn detect_tier(name: &str) -> Tier {
    let lower = name.to_lowercase();
    let tokens: Vec<&str> = lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect();

    let matches = |keyword: &str| {
        if keyword.len() <= SHORT_KEYWORD_LEN {
            tokens.contains(&keyword)
        } else {
            lower.contains(keyword)
        }
    };

    for (tier, keywords) in TIER_KEYWORDS {
        if keywords.iter().any(|k| matches(k)) {
            return tier;
        }
    }

    if has_star_rating(&lower) {
        Tier::Hard
    } else {
        Tier::Normal
    }
}

fn has_star_rating(name: &str) -> bool {
    let chars: Vec<char> = name.chars().collect();
    chars
        .windows(3)
        .any(|w| w[0].is_ascii_digit() && w[1] == '.' && w[2].is_ascii_digit())
}

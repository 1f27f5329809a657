pub mod check;
pub mod info;
pub mod rules;

use rcheck_core::{Error, Tier};

/// Parse a tier name, mapping failure to [`Error::UnknownTier`].
pub fn parse_tier(name: &str) -> Result<Tier, Error> {
    name.parse::<Tier>()
        .map_err(|_| Error::UnknownTier(name.to_string()))
}

//! Optional TOML configuration; command-line flags take precedence.

use std::fs;
use std::path::{Path, PathBuf};

use rcheck_core::{Error, Result};
use serde::Deserialize;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Tier used instead of name-based detection
    pub tier: Option<String>,
    /// Rule catalog JSON replacing the built-in rules
    pub rules: Option<PathBuf>,
    pub json: bool,
    pub errors_only: bool,
}

impl CliConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::ConfigParse(e.to_string()))
    }

    /// Load the config file, falling back to defaults when it is missing or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => {
                debug!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("Failed to load config: {}, using defaults", e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let config = CliConfig::parse(
            r#"
tier = "Hard"
rules = "rules.json"
errors_only = true
"#,
        )
        .unwrap();

        assert_eq!(config.tier.as_deref(), Some("Hard"));
        assert_eq!(config.rules, Some(PathBuf::from("rules.json")));
        assert!(config.errors_only);
        assert!(!config.json);
    }

    #[test]
    fn test_parse_empty_config() {
        assert_eq!(CliConfig::parse("").unwrap(), CliConfig::default());
    }

    #[test]
    fn test_parse_invalid_config() {
        let result = CliConfig::parse("json = \"yes\"");
        assert!(matches!(result, Err(Error::ConfigParse(_))));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = CliConfig::load_or_default(&dir.path().join("missing.toml"));
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rcheck.toml");
        std::fs::write(&path, "json = true\n").unwrap();

        let config = CliConfig::load_or_default(&path);
        assert!(config.json);
    }
}

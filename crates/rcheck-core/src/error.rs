use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Malformed chart: {0}")]
    MalformedChart(String),

    #[error("Unknown tier: {0}")]
    UnknownTier(String),

    #[error("Config parse error: {0}")]
    ConfigParse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

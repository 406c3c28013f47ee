use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed response from {endpoint}: {reason}")]
    Api {
        endpoint: &'static str,
        reason: String,
    },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("store error: {0}")]
    Store(String),

    #[error("a sampling cycle is already running")]
    CycleInProgress,
}

impl Error {
    /// Whether the failure happened on the wire rather than in our own data.
    #[must_use]
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Http(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

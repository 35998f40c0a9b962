use thiserror::Error;

use crate::domain::{NormalizationError, VenueId};

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

/// Startup safety violations. These halt the process before any scan.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SafetyError {
    #[error("DRY_RUN must remain enabled (got '{value}'); this scanner is read-only")]
    DryRunDisabled { value: String },
}

/// Mapping table errors.
#[derive(Error, Debug)]
pub enum MappingError {
    #[error("failed to read mapping file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse mapping file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Safety(#[from] SafetyError),

    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error(transparent)]
    Normalization(#[from] NormalizationError),

    #[error("no fetcher configured for venue '{0}'")]
    UnknownVenue(VenueId),

    #[error("venue {venue} returned an unusable response: {message}")]
    Venue { venue: VenueId, message: String },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;

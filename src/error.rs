// src/error.rs
//
// Error types for substitution and configuration.
// The public analysis entry points never return these; they log and skip.

use std::path::PathBuf;
use thiserror::Error;

/// Failure while building or applying a substitution pattern
#[derive(Debug, Error)]
pub enum CorrectionError {
    #[error("invalid substitution pattern for '{original}': {source}")]
    Pattern {
        original: String,
        #[source]
        source: regex::Error,
    },

    #[error("nothing to substitute: original text is blank")]
    BlankOriginal,
}

/// Failure while loading or saving analyzer settings
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine the configuration directory")]
    NoConfigDir,

    #[error("failed to access config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

pub type Result<T, E = CorrectionError> = std::result::Result<T, E>;

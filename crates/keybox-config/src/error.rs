use std::io;
use std::path::Path;

use thiserror::Error;

/// Errors raised while locating, reading, or checking configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A config file exists but could not be read.
    #[error("cannot read config file {path}: {source}")]
    ReadError {
        /// File that could not be read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A config file is not valid TOML or has fields of the wrong type.
    #[error("invalid config in {path}: {source}")]
    ParseError {
        /// File (or `<embedded defaults>`) that failed to parse.
        path: String,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },

    /// A value parsed but is out of range.
    #[error("invalid value for '{field}': {message}")]
    ValidationError {
        /// Dotted field path, e.g. `crypto.cache_capacity`.
        field: String,
        /// What is wrong with it.
        message: String,
    },

    /// A `KEYBOX_*` variable could not be applied.
    #[error("environment variable {var_name}: {message}")]
    EnvError {
        /// Name of the environment variable.
        var_name: String,
        /// What is wrong with it.
        message: String,
    },

    /// No per-user config directory exists on this platform.
    #[error("could not determine the user config directory")]
    NoHomeDir,
}

impl ConfigError {
    pub(crate) fn read(path: &Path, source: io::Error) -> Self {
        Self::ReadError {
            path: path.display().to_string(),
            source,
        }
    }

    pub(crate) fn parse(path: impl Into<String>, source: toml::de::Error) -> Self {
        Self::ParseError {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn validation(field: &str, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.to_owned(),
            message: message.into(),
        }
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

//! Configuration struct definitions.
//!
//! Every section uses `#[serde(default)]`, so a file only needs the keys it
//! changes.

use serde::{Deserialize, Serialize};

/// Top-level Keybox configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Key conversion settings.
    pub crypto: CryptoSection,
    /// Logging level, format, and per-crate directives.
    pub logging: LoggingSection,
}

/// Key conversion settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CryptoSection {
    /// Maximum number of converted keys kept in memory. `0` disables the
    /// cache.
    pub cache_capacity: usize,
}

impl Default for CryptoSection {
    fn default() -> Self {
        Self {
            cache_capacity: 1024,
        }
    }
}

/// Logging and tracing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Global log level filter (`"trace"`, `"debug"`, `"info"`, `"warn"`,
    /// `"error"`).
    pub level: String,
    /// Output format: `"pretty"`, `"compact"`, `"json"`, or `"full"`.
    pub format: String,
    /// Per-crate tracing directives (e.g. `["keybox_crypto=debug"]`).
    pub directives: Vec<String>,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: "compact".to_owned(),
            directives: Vec::new(),
        }
    }
}

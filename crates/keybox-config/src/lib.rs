#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Layered configuration for the Keybox tools.
//!
//! # Usage
//!
//! ```rust,no_run
//! use keybox_config::Config;
//!
//! // defaults → user file → KEYBOX_* fallbacks
//! let resolved = Config::load(None).unwrap();
//! println!("cache capacity: {}", resolved.config.crypto.cache_capacity);
//! ```
//!
//! # Configuration Precedence
//!
//! From highest to lowest priority:
//!
//! 1. **File**: `--config <path>`, or `<config dir>/keybox/config.toml`
//! 2. **Environment variables** (`KEYBOX_*`), fallback only
//! 3. **Embedded defaults** (`defaults.toml` compiled into the binary)
//!
//! # Design
//!
//! This crate has no dependencies on other keybox crates. The CLI maps
//! these plain settings onto the crypto and telemetry builders.

/// Environment variable fallback resolution.
pub mod env;
/// Configuration error types.
pub mod error;
/// Configuration file discovery and loading.
pub mod loader;
/// Layered merging with per-field provenance.
pub mod merge;
/// Configuration struct definitions.
pub mod types;
/// Configuration validation rules.
pub mod validate;

pub use error::{ConfigError, ConfigResult};
pub use loader::{FileSource, ResolvedConfig};
pub use merge::ConfigLayer;
pub use types::{Config, CryptoSection, LoggingSection};

impl Config {
    /// Load configuration with the full precedence chain.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any config file is malformed or the final
    /// configuration fails validation.
    pub fn load(explicit: Option<&std::path::Path>) -> ConfigResult<ResolvedConfig> {
        loader::load(explicit)
    }

    /// Check this configuration against the accepted ranges.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError::ValidationError`] found.
    pub fn validate(&self) -> ConfigResult<()> {
        validate::validate(self)
    }
}

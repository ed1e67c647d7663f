//! Config file discovery and layered loading.
//!
//! 1. Parse the embedded `defaults.toml`
//! 2. Merge the user's file: an explicit path, or `<config dir>/keybox/config.toml`
//! 3. Apply `KEYBOX_*` fallbacks to fields the file left alone
//! 4. Deserialize into [`Config`] and validate

use std::collections::HashMap;
use std::hash::BuildHasher;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::env::{apply_env_fallbacks, collect_env_vars};
use crate::error::{ConfigError, ConfigResult};
use crate::merge::{ConfigLayer, FieldSources, merge_tracking, record_leaves};
use crate::types::Config;
use crate::validate;

/// Embedded default configuration.
const DEFAULTS_TOML: &str = include_str!("defaults.toml");

/// Maximum allowed config file size (1 MB).
const MAX_CONFIG_FILE_SIZE: usize = 1_048_576;

/// Where the user-level file comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    /// Passed explicitly; must exist.
    Explicit(PathBuf),
    /// Found by platform discovery; skipped when absent.
    Discovered(PathBuf),
    /// No file layer.
    None,
}

/// A loaded configuration with the provenance of each field.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// The validated configuration.
    pub config: Config,
    /// Which layer set each field.
    pub field_sources: FieldSources,
    /// Files that were actually read.
    pub loaded_files: Vec<String>,
}

impl ResolvedConfig {
    /// The layer that set `field` (a dotted path such as `logging.level`).
    #[must_use]
    pub fn source_of(&self, field: &str) -> Option<ConfigLayer> {
        self.field_sources.get(field).copied()
    }
}

/// Load configuration from the process environment.
///
/// `explicit` overrides file discovery and must point at a readable file.
///
/// # Errors
///
/// Returns a [`ConfigError`] if a file is unreadable or malformed, a
/// variable is mistyped, or the merged result fails validation.
pub fn load(explicit: Option<&Path>) -> ConfigResult<ResolvedConfig> {
    let source = match explicit {
        Some(path) => FileSource::Explicit(path.to_path_buf()),
        None => FileSource::Discovered(user_config_path()?),
    };
    load_with(&source, &collect_env_vars())
}

/// Load configuration from an explicit file source and variable set.
///
/// # Errors
///
/// Same as [`load`].
pub fn load_with<S: BuildHasher>(
    source: &FileSource,
    env_vars: &HashMap<String, String, S>,
) -> ConfigResult<ResolvedConfig> {
    let mut merged: toml::Value =
        toml::from_str(DEFAULTS_TOML).map_err(|e| ConfigError::parse("<embedded defaults>", e))?;

    let mut field_sources = FieldSources::new();
    let mut loaded_files = Vec::new();
    record_leaves(&merged, "", ConfigLayer::Defaults, &mut field_sources);

    let file = match source {
        FileSource::Explicit(path) => read_file(path, true)?.map(|v| (v, path)),
        FileSource::Discovered(path) => read_file(path, false)?.map(|v| (v, path)),
        FileSource::None => None,
    };

    if let Some((overlay, path)) = file {
        merge_tracking(
            &mut merged,
            &overlay,
            "",
            ConfigLayer::File,
            &mut field_sources,
        );
        loaded_files.push(path.display().to_string());
        info!(path = %path.display(), "loaded config file");
    }

    let env_count = apply_env_fallbacks(&mut merged, &mut field_sources, env_vars)?;
    if env_count > 0 {
        debug!(count = env_count, "applied environment variable fallbacks");
    }

    let config: Config = merged
        .try_into()
        .map_err(|e: toml::de::Error| ConfigError::parse("<merged config>", e))?;

    validate::validate(&config)?;

    Ok(ResolvedConfig {
        config,
        field_sources,
        loaded_files,
    })
}

/// The per-user config file location, e.g. `~/.config/keybox/config.toml`.
///
/// # Errors
///
/// Returns [`ConfigError::NoHomeDir`] if the platform has no config
/// directory for the current user.
pub fn user_config_path() -> ConfigResult<PathBuf> {
    directories::ProjectDirs::from("", "", "keybox")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .ok_or(ConfigError::NoHomeDir)
}

fn read_file(path: &Path, required: bool) -> ConfigResult<Option<toml::Value>> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound && !required => {
            debug!(path = %path.display(), "config file not found, skipping");
            return Ok(None);
        },
        Err(e) => return Err(ConfigError::read(path, e)),
    };

    if content.len() > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::validation(
            &path.display().to_string(),
            format!(
                "config file is {} bytes, exceeding the {MAX_CONFIG_FILE_SIZE} byte limit",
                content.len()
            ),
        ));
    }

    toml::from_str(&content)
        .map(Some)
        .map_err(|e| ConfigError::parse(path.display().to_string(), e))
}

//! Environment variable fallbacks.
//!
//! `KEYBOX_*` variables fill in fields that no config file set. A value in
//! the user's file always wins over the environment.

use std::collections::HashMap;
use std::hash::BuildHasher;

use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::merge::{ConfigLayer, FieldSources};

/// Prefix shared by every recognised variable.
pub const ENV_PREFIX: &str = "KEYBOX_";

#[derive(Clone, Copy)]
enum FieldKind {
    Integer,
    Text,
}

/// Mapping from environment variable name to config field path.
struct EnvMapping {
    var_name: &'static str,
    section: &'static str,
    key: &'static str,
    kind: FieldKind,
}

const ENV_MAPPINGS: &[EnvMapping] = &[
    EnvMapping {
        var_name: "KEYBOX_CACHE_CAPACITY",
        section: "crypto",
        key: "cache_capacity",
        kind: FieldKind::Integer,
    },
    EnvMapping {
        var_name: "KEYBOX_LOG_LEVEL",
        section: "logging",
        key: "level",
        kind: FieldKind::Text,
    },
    EnvMapping {
        var_name: "KEYBOX_LOG_FORMAT",
        section: "logging",
        key: "format",
        kind: FieldKind::Text,
    },
];

/// Snapshot the process environment, keeping only `KEYBOX_*` variables.
#[must_use]
pub fn collect_env_vars() -> HashMap<String, String> {
    std::env::vars()
        .filter(|(name, _)| name.starts_with(ENV_PREFIX))
        .collect()
}

/// Apply environment fallbacks to fields that only hold defaults.
///
/// Returns the number of variables applied.
///
/// # Errors
///
/// Returns [`ConfigError::EnvError`] if a numeric variable does not parse.
pub fn apply_env_fallbacks<S: BuildHasher>(
    merged: &mut toml::Value,
    sources: &mut FieldSources,
    env_vars: &HashMap<String, String, S>,
) -> ConfigResult<usize> {
    let mut count: usize = 0;

    for mapping in ENV_MAPPINGS {
        let path = format!("{}.{}", mapping.section, mapping.key);
        if sources
            .get(&path)
            .is_some_and(|layer| *layer != ConfigLayer::Defaults)
        {
            continue;
        }

        let Some(raw) = env_vars.get(mapping.var_name) else {
            continue;
        };

        let value = coerce(mapping, raw)?;
        let Some(root) = merged.as_table_mut() else {
            continue;
        };
        let section = root
            .entry(mapping.section)
            .or_insert_with(|| toml::Value::Table(toml::map::Map::new()));
        if let Some(table) = section.as_table_mut() {
            table.insert(mapping.key.to_owned(), value);
        }

        debug!(var = mapping.var_name, field = %path, "applying env var fallback");
        sources.insert(path, ConfigLayer::Environment);
        count = count.saturating_add(1);
    }

    Ok(count)
}

fn coerce(mapping: &EnvMapping, raw: &str) -> ConfigResult<toml::Value> {
    let trimmed = raw.trim();
    match mapping.kind {
        FieldKind::Integer => trimmed
            .parse::<i64>()
            .ok()
            .filter(|n| *n >= 0)
            .map(toml::Value::Integer)
            .ok_or_else(|| ConfigError::EnvError {
                var_name: mapping.var_name.to_owned(),
                message: format!("expected a non-negative integer, got '{raw}'"),
            }),
        FieldKind::Text => Ok(toml::Value::String(trimmed.to_ascii_lowercase())),
    }
}

//! Layered merging of TOML trees with per-field provenance.

use std::collections::HashMap;
use std::fmt;

/// Which configuration layer a value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLayer {
    /// Compiled-in defaults.
    Defaults,
    /// The user's config file, discovered or passed with `--config`.
    File,
    /// A `KEYBOX_*` environment variable.
    Environment,
}

impl fmt::Display for ConfigLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Defaults => f.write_str("defaults"),
            Self::File => f.write_str("config file"),
            Self::Environment => f.write_str("environment variable"),
        }
    }
}

/// Dotted field path → layer that last set it.
pub type FieldSources = HashMap<String, ConfigLayer>;

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_owned()
    } else {
        format!("{prefix}.{key}")
    }
}

/// Record every leaf of `val` as coming from `layer`.
pub fn record_leaves(val: &toml::Value, prefix: &str, layer: ConfigLayer, sources: &mut FieldSources) {
    if let toml::Value::Table(table) = val {
        for (key, child) in table {
            record_leaves(child, &join(prefix, key), layer, sources);
        }
    } else {
        sources.insert(prefix.to_owned(), layer);
    }
}

/// Merge `overlay` into `base`. Tables merge per key; scalars and arrays
/// replace. Every leaf the overlay touches is recorded under `layer`.
pub fn merge_tracking(
    base: &mut toml::Value,
    overlay: &toml::Value,
    prefix: &str,
    layer: ConfigLayer,
    sources: &mut FieldSources,
) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let path = join(prefix, key);
                let both_tables = overlay_val.is_table()
                    && base_table.get(key).is_some_and(toml::Value::is_table);

                if both_tables {
                    if let Some(base_val) = base_table.get_mut(key) {
                        merge_tracking(base_val, overlay_val, &path, layer, sources);
                    }
                } else {
                    base_table.insert(key.clone(), overlay_val.clone());
                    record_leaves(overlay_val, &path, layer, sources);
                }
            }
        },
        (base, overlay) => {
            *base = overlay.clone();
            record_leaves(overlay, prefix, layer, sources);
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> toml::Value {
        toml::from_str(text).unwrap()
    }

    #[test]
    fn test_overlay_replaces_scalars_only() {
        let mut base = parse(
            r#"
            [logging]
            level = "info"
            format = "compact"
        "#,
        );
        let overlay = parse(
            r#"
            [logging]
            level = "debug"
        "#,
        );

        let mut sources = FieldSources::new();
        record_leaves(&base, "", ConfigLayer::Defaults, &mut sources);
        merge_tracking(&mut base, &overlay, "", ConfigLayer::File, &mut sources);

        assert_eq!(base["logging"]["level"].as_str(), Some("debug"));
        assert_eq!(base["logging"]["format"].as_str(), Some("compact"));
        assert_eq!(sources.get("logging.level"), Some(&ConfigLayer::File));
        assert_eq!(sources.get("logging.format"), Some(&ConfigLayer::Defaults));
    }

    #[test]
    fn test_arrays_replace() {
        let mut base = parse(r#"directives = ["a=debug", "b=warn"]"#);
        let overlay = parse(r#"directives = ["c=trace"]"#);

        let mut sources = FieldSources::new();
        merge_tracking(&mut base, &overlay, "", ConfigLayer::File, &mut sources);

        let directives = base["directives"].as_array().unwrap();
        assert_eq!(directives.len(), 1);
        assert_eq!(sources.get("directives"), Some(&ConfigLayer::File));
    }

    #[test]
    fn test_new_tables_are_recorded() {
        let mut base = parse("");
        let overlay = parse(
            r"
            [crypto]
            cache_capacity = 8
        ",
        );

        let mut sources = FieldSources::new();
        merge_tracking(&mut base, &overlay, "", ConfigLayer::File, &mut sources);

        assert_eq!(base["crypto"]["cache_capacity"].as_integer(), Some(8));
        assert_eq!(
            sources.get("crypto.cache_capacity"),
            Some(&ConfigLayer::File)
        );
    }
}

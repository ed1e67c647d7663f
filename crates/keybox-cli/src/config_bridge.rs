//! Bridge from `keybox_config::Config` to the crypto and telemetry types.

use keybox_config::Config;
use keybox_crypto::IdentityCrypto;
use keybox_telemetry::{LogConfig, LogFormat};

/// Build the logging configuration, raising the level to `debug` when
/// `verbose` is set.
///
/// The format string has already been validated by the config crate, so an
/// unknown value cannot reach here; it falls back to the default anyway.
pub(crate) fn to_log_config(config: &Config, verbose: bool) -> LogConfig {
    let logging = &config.logging;
    let level = if verbose { "debug" } else { logging.level.as_str() };
    let format = logging.format.parse().unwrap_or(LogFormat::Compact);

    let mut log_config = LogConfig::new(level).with_format(format);
    for directive in &logging.directives {
        log_config = log_config.with_directive(directive.clone());
    }
    log_config
}

/// Build the crypto component with the configured cache capacity.
pub(crate) fn to_identity_crypto(config: &Config) -> IdentityCrypto {
    IdentityCrypto::builder()
        .cache_capacity(config.crypto.cache_capacity)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_config_from_defaults() {
        let log_config = to_log_config(&Config::default(), false);
        assert_eq!(log_config.level, "info");
        assert_eq!(log_config.format, LogFormat::Compact);
        assert!(log_config.directives.is_empty());
    }

    #[test]
    fn test_verbose_raises_level() {
        let mut config = Config::default();
        config.logging.level = "warn".to_owned();
        config.logging.format = "json".to_owned();
        config.logging.directives = vec!["keybox_crypto=trace".to_owned()];

        let log_config = to_log_config(&config, true);
        assert_eq!(log_config.level, "debug");
        assert_eq!(log_config.format, LogFormat::Json);
        assert_eq!(log_config.directives, vec!["keybox_crypto=trace"]);
    }

    #[test]
    fn test_cache_capacity_applied() {
        let mut config = Config::default();
        config.crypto.cache_capacity = 3;
        assert_eq!(to_identity_crypto(&config).cache_stats().capacity, 3);

        config.crypto.cache_capacity = 0;
        assert_eq!(to_identity_crypto(&config).cache_stats().capacity, 0);
    }
}

//! Keybox CLI - signing identities, sealed boxes and detached signatures.
//!
//! Every value on the command line is text: keys, ciphertext, nonces and
//! signatures are standard base64, messages are UTF-8. Results go to stdout;
//! logs and warnings go to stderr.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use keybox_config::{Config, ConfigError};
use tracing::debug;

mod commands;
mod config_bridge;
mod output;
mod theme;

use commands::{boxes, keys, signing};
use output::{OutputFormat, Printer};
use theme::Theme;

/// Exit code when `verify` rejects a signature.
const EXIT_NOT_VERIFIED: u8 = 1;
/// Exit code for any error.
const EXIT_ERROR: u8 = 2;

/// Keybox - Ed25519 identities with `NaCl` boxes and detached signatures
#[derive(Parser)]
#[command(name = "keybox")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a configuration file (overrides discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format: pretty (default) or json
    #[arg(long, global = true, default_value = "pretty")]
    format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new signing identity
    Keygen,

    /// Rebuild an identity from its secret key
    Restore {
        /// Base64 secret key (64 bytes)
        #[arg(long, env = "KEYBOX_SECRET_KEY", hide_env_values = true)]
        secret_key: String,
    },

    /// Encrypt a message for another identity
    Encrypt {
        /// Recipient's base64 public key
        #[arg(long)]
        to: String,

        /// Sender's base64 secret key
        #[arg(long, env = "KEYBOX_SECRET_KEY", hide_env_values = true)]
        secret_key: String,

        /// UTF-8 message to encrypt
        message: String,
    },

    /// Decrypt a message from another identity
    Decrypt {
        /// Sender's base64 public key
        #[arg(long)]
        from: String,

        /// Recipient's base64 secret key
        #[arg(long, env = "KEYBOX_SECRET_KEY", hide_env_values = true)]
        secret_key: String,

        /// Base64 nonce from the envelope
        #[arg(long)]
        nonce: String,

        /// Base64 ciphertext from the envelope
        data: String,
    },

    /// Produce a detached signature
    Sign {
        /// Signer's base64 secret key
        #[arg(long, env = "KEYBOX_SECRET_KEY", hide_env_values = true)]
        secret_key: String,

        /// UTF-8 message to sign
        message: String,
    },

    /// Check a detached signature (exit code 1 if it does not verify)
    Verify {
        /// Signer's base64 public key
        #[arg(long)]
        public_key: String,

        /// Base64 signature
        #[arg(long)]
        signature: String,

        /// UTF-8 message that was signed
        message: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}", Theme::error(&format!("{e:#}")));
            ExitCode::from(EXIT_ERROR)
        },
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = load_config(cli.config.as_deref())?;

    let log_config = config_bridge::to_log_config(&config, cli.verbose);
    if let Err(e) = keybox_telemetry::setup_logging(&log_config) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let printer = Printer::new(OutputFormat::parse(&cli.format)?);
    let crypto = config_bridge::to_identity_crypto(&config);
    debug!(cache_capacity = config.crypto.cache_capacity, "crypto ready");

    match cli.command {
        Commands::Keygen => keys::keygen(&crypto, &printer)?,
        Commands::Restore { secret_key } => keys::restore(&crypto, &printer, &secret_key)?,
        Commands::Encrypt {
            to,
            secret_key,
            message,
        } => boxes::encrypt(&crypto, &printer, &message, &to, &secret_key)?,
        Commands::Decrypt {
            from,
            secret_key,
            nonce,
            data,
        } => boxes::decrypt(&crypto, &printer, &data, &nonce, &from, &secret_key)?,
        Commands::Sign {
            secret_key,
            message,
        } => signing::sign(&crypto, &printer, &message, &secret_key)?,
        Commands::Verify {
            public_key,
            signature,
            message,
        } => {
            if !signing::verify(&crypto, &printer, &message, &signature, &public_key)? {
                return Ok(ExitCode::from(EXIT_NOT_VERIFIED));
            }
        },
    }

    Ok(ExitCode::SUCCESS)
}

/// Load configuration. Without a home directory and without `--config`,
/// fall back to the built-in defaults.
fn load_config(explicit: Option<&std::path::Path>) -> Result<Config> {
    match Config::load(explicit) {
        Ok(resolved) => Ok(resolved.config),
        Err(ConfigError::NoHomeDir) => {
            eprintln!(
                "{}",
                Theme::warning("No user config directory found; using defaults.")
            );
            Ok(Config::default())
        },
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_encrypt() {
        let cli = Cli::try_parse_from([
            "keybox",
            "--format",
            "json",
            "encrypt",
            "--to",
            "PUB",
            "--secret-key",
            "SEC",
            "hello",
        ])
        .unwrap();

        assert_eq!(cli.format, "json");
        match cli.command {
            Commands::Encrypt {
                to,
                secret_key,
                message,
            } => {
                assert_eq!(to, "PUB");
                assert_eq!(secret_key, "SEC");
                assert_eq!(message, "hello");
            },
            _ => panic!("expected encrypt"),
        }
    }

    #[test]
    fn test_parse_verify_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "keybox",
            "verify",
            "--public-key",
            "PUB",
            "--signature",
            "SIG",
            "msg",
            "-v",
            "--config",
            "/tmp/keybox.toml",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/keybox.toml")));
        assert!(matches!(cli.command, Commands::Verify { .. }));
    }

    #[test]
    fn test_decrypt_requires_nonce() {
        let result = Cli::try_parse_from([
            "keybox",
            "decrypt",
            "--from",
            "PUB",
            "--secret-key",
            "SEC",
            "DATA",
        ]);
        assert!(result.is_err());
    }
}

//! Keybox Telemetry - logging for the Keybox tools.
//!
//! Configures a global `tracing` subscriber that writes to stderr, so that
//! stdout stays free for machine-readable command output.
//!
//! # Example
//!
//! ```rust,no_run
//! use keybox_telemetry::{LogConfig, LogFormat, setup_logging};
//!
//! # fn main() -> Result<(), keybox_telemetry::TelemetryError> {
//! let config = LogConfig::new("info")
//!     .with_format(LogFormat::Json)
//!     .with_directive("keybox_crypto=debug");
//!
//! setup_logging(&config)?;
//! tracing::info!("ready");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod error;
mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{LogConfig, LogFormat, setup_default_logging, setup_logging};

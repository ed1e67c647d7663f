//! Prelude module - commonly used types for convenient import.
//!
//! Use `use keybox_telemetry::prelude::*;` to import all essential types.

pub use crate::{LogConfig, LogFormat, TelemetryError, TelemetryResult, setup_logging};

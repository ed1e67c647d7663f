//! Rendering command results for humans or machines.

use serde::Serialize;

use crate::theme::Theme;

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum OutputFormat {
    /// Labelled, colored text.
    #[default]
    Pretty,
    /// One JSON document per command.
    Json,
}

impl OutputFormat {
    pub(crate) fn parse(raw: &str) -> anyhow::Result<Self> {
        match raw {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => anyhow::bail!("unknown output format '{other}' (expected pretty or json)"),
        }
    }
}

/// Writes command results to stdout in the chosen format.
pub(crate) struct Printer {
    format: OutputFormat,
}

impl Printer {
    pub(crate) fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print `value` as JSON, or as a header followed by labelled fields.
    pub(crate) fn record<T: Serialize>(
        &self,
        value: &T,
        header: &str,
        fields: &[(&str, &str)],
    ) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
            OutputFormat::Pretty => {
                println!("{}", Theme::header(header));
                for (label, text) in fields {
                    println!("{}", Theme::field(label, text));
                }
            },
        }
        Ok(())
    }

    /// Print a single text result. JSON mode wraps it under `key`.
    pub(crate) fn text(&self, key: &str, text: &str) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => {
                let value = serde_json::json!({ key: text });
                println!("{}", serde_json::to_string(&value)?);
            },
            OutputFormat::Pretty => println!("{text}"),
        }
        Ok(())
    }

    /// Print a verification outcome.
    pub(crate) fn verdict(&self, verified: bool) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => {
                let value = serde_json::json!({ "verified": verified });
                println!("{}", serde_json::to_string(&value)?);
            },
            OutputFormat::Pretty => println!("{verified}"),
        }
        Ok(())
    }
}

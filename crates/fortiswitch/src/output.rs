//! Output shaping and rendering.
//!
//! Wraps reshaped telemetry in the envelope a consumer expects and renders
//! it as JSON or YAML.

use std::io::{self, Write};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use fortiswitch_api::{Enrichment, Identity, Operation, SerialKey, Telemetry};

use crate::error::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    #[default]
    JsonCompact,
    /// YAML
    Yaml,
}

/// Envelope around the telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    /// `{"<operation>": data}`, records tagged with `serial` and `hostname`
    #[default]
    Cli,
    /// Records tagged with `serial_number` and `hostname`; lists wrapped as
    /// `{"<operation>_list": [...]}`
    Telegraf,
    /// Reshaped telemetry as is
    None,
}

impl Shape {
    /// Whether this shape needs the switch identity.
    pub fn needs_identity(self) -> bool {
        !matches!(self, Self::None)
    }

    fn serial_key(self) -> SerialKey {
        match self {
            Self::Telegraf => SerialKey::SerialNumber,
            Self::Cli | Self::None => SerialKey::Serial,
        }
    }
}

/// Enrich and wrap telemetry for printing.
pub fn shape(
    shape: Shape,
    operation: Operation,
    mut telemetry: Telemetry,
    identity: Option<&Identity>,
) -> Value {
    if let (true, Some(identity)) = (shape.needs_identity(), identity) {
        Enrichment::new(shape.serial_key()).apply(&mut telemetry, identity);
    }

    match shape {
        Shape::None => telemetry.into_value(),
        Shape::Cli => wrap(operation.name().to_owned(), telemetry.into_value()),
        Shape::Telegraf if telemetry.is_list() => {
            wrap(format!("{}_list", operation.name()), telemetry.into_value())
        }
        Shape::Telegraf => telemetry.into_value(),
    }
}

fn wrap(key: String, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(key, value);
    Value::Object(map)
}

/// Render a value in the chosen format.
pub fn render(format: OutputFormat, data: &Value) -> Result<String, CliError> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(data)?,
        OutputFormat::JsonCompact => serde_json::to_string(data)?,
        OutputFormat::Yaml => serde_yaml::to_string(data)?,
    })
}

/// Print rendered output to stdout.
pub fn print_output(output: &str) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", output.trim_end())?;
    Ok(())
}

//
//  teamcity-cli
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Output Module
//!
//! Renders decoded configuration for the terminal or for other tools:
//!
//! - **Table format**: Human-readable tables for interactive terminal use
//! - **JSON format**: Machine-readable JSON for scripting and automation
//! - **YAML format**: Editable documents that `tcity encode` reads back
//!
//! ## Architecture
//!
//! - [`table`]: Table formatting utilities using `comfy_table`
//! - [`json`]: JSON serialization utilities using `serde_json`
//! - [`yaml`]: YAML serialization utilities using `serde_yaml`
//!
//! ## Core Components
//!
//! - [`OutputFormat`]: Enum representing the available output formats
//! - [`OutputWriter`]: Main entry point for writing formatted output
//! - [`TableOutput`]: Trait for types that can be rendered as tables

mod json;
mod table;
mod yaml;

pub use json::*;
pub use table::*;
pub use yaml::*;

use std::str::FromStr;

use anyhow::bail;
use serde::Serialize;

use crate::codec::{Polymorphic, PropertyBag, PropertyModel};

/// Output format options.
///
/// | Format | Use Case | Colors |
/// |--------|----------|--------|
/// | `Table` | Interactive terminal use | Yes |
/// | `Json` | Scripting, piping to `jq` | No |
/// | `Yaml` | Editing and re-encoding | No |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => bail!("Unknown output format '{}'. Use table, json or yaml", s),
        }
    }
}

/// Writes values in the configured format.
///
/// ```rust,ignore
/// let writer = OutputWriter::new(OutputFormat::Yaml);
/// writer.write(&options)?;
/// writer.write_success("Encoded 3 triggers");
/// ```
pub struct OutputWriter {
    format: OutputFormat,
    color: bool,
    pretty: bool,
}

impl OutputWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: console::colors_enabled(),
            pretty: true,
        }
    }

    pub fn json() -> Self {
        Self::new(OutputFormat::Json)
    }

    pub fn table() -> Self {
        Self::new(OutputFormat::Table)
    }

    /// Overrides terminal color detection.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Compact JSON when `false`.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn color_enabled(&self) -> bool {
        self.color
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn is_pretty(&self) -> bool {
        self.pretty
    }

    /// Serializes `value` for the machine-readable formats.
    fn write_serialized<T: Serialize + ?Sized>(&self, value: &T) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Yaml => write_yaml(value),
            _ if self.pretty => write_json(value),
            _ => write_json_compact(value),
        }
    }

    /// Writes a single value.
    pub fn write<T: Serialize + TableOutput>(&self, value: &T) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Table => {
                value.print_table(self.color);
                Ok(())
            }
            _ => self.write_serialized(value),
        }
    }

    /// Writes a typed configuration object; tables show its wire properties.
    pub fn write_model<M: Serialize + PropertyModel>(&self, model: &M) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Table => {
                model.to_properties().print_table(self.color);
                Ok(())
            }
            _ => self.write_serialized(model),
        }
    }

    /// Writes decoded resources; tables show a summary then each bag.
    pub fn write_resources<P: Serialize + Polymorphic>(&self, items: &[P]) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Table => {
                resource_summary_table(items, self.color).print();
                for item in items {
                    let envelope = item.to_envelope();
                    if envelope.properties.is_empty() {
                        continue;
                    }
                    println!();
                    print_header(&format!(
                        "{} ({})",
                        envelope.id.as_deref().unwrap_or("-"),
                        envelope.kind
                    ));
                    envelope.properties.print_table(self.color);
                }
                Ok(())
            }
            _ => self.write_serialized(items),
        }
    }

    /// Wire JSON text in this writer's layout. Wire payloads are always JSON.
    pub fn wire_text<T: Serialize + ?Sized>(&self, value: &T) -> anyhow::Result<String> {
        let text = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(text)
    }

    /// Status line on stderr so it never mixes with piped output.
    pub fn write_success(&self, msg: &str) {
        use console::style;
        if self.color {
            eprintln!("{} {}", style("✓").green().bold(), msg);
        } else {
            eprintln!("✓ {}", msg);
        }
    }
}

/// Types that can be rendered as a terminal table.
pub trait TableOutput {
    fn print_table(&self, color: bool);
}

impl TableOutput for PropertyBag {
    fn print_table(&self, color: bool) {
        property_table(self, color).print();
    }
}

pub fn print_header(text: &str) {
    use console::style;
    println!("{}", style(text).bold());
    println!("{}", "-".repeat(text.chars().count()));
}

pub fn print_field(key: &str, value: &str, color: bool) {
    use console::style;
    if color {
        println!("{}: {}", style(key).dim(), value);
    } else {
        println!("{}: {}", key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parse() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("yml".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert!("markdown".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_writer_settings() {
        let writer = OutputWriter::json().with_color(false).with_pretty(false);
        assert_eq!(writer.format(), OutputFormat::Json);
        assert!(!writer.color_enabled());
        assert!(!writer.is_pretty());
        assert_eq!(writer.wire_text(&serde_json::json!({"a": 1})).unwrap(), r#"{"a":1}"#);
        assert_eq!(OutputWriter::table().format(), OutputFormat::Table);
    }
}

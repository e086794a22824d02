//
//  teamcity-cli
//  cli/descriptor.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! `tcity descriptor`: parameter UI descriptors (`type.rawValue`).

use anyhow::{bail, Result};
use clap::{Args, Subcommand, ValueEnum};
use serde::Serialize;

use crate::codec::{ControlType, TypeDescriptor};
use crate::output::{print_field, TableOutput};

use super::GlobalOptions;

#[derive(Args, Debug)]
pub struct DescriptorCommand {
    #[command(subcommand)]
    pub command: DescriptorSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum DescriptorSubcommand {
    /// Parse a raw descriptor such as "password display='hidden'"
    Parse(ParseArgs),

    /// Render a descriptor from its parts
    Render(RenderArgs),
}

#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Raw descriptor text
    pub raw: String,
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    #[arg(long, value_enum)]
    pub control_type: Option<ControlArg>,

    #[arg(long)]
    pub display: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub read_only: Option<String>,

    #[arg(long)]
    pub label: Option<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum ControlArg {
    Checkbox,
    Password,
    Text,
    Select,
}

impl From<ControlArg> for ControlType {
    fn from(arg: ControlArg) -> Self {
        match arg {
            ControlArg::Checkbox => Self::Checkbox,
            ControlArg::Password => Self::Password,
            ControlArg::Text => Self::Text,
            ControlArg::Select => Self::Select,
        }
    }
}

impl RenderArgs {
    fn descriptor(&self) -> TypeDescriptor {
        TypeDescriptor {
            control_type: self.control_type.map(ControlType::from),
            display: self.display.clone().unwrap_or_default(),
            description: self.description.clone().unwrap_or_default(),
            read_only: self.read_only.clone().unwrap_or_default(),
            label: self.label.clone().unwrap_or_default(),
        }
    }
}

/// Parsed descriptor with its canonical rendering.
#[derive(Debug, Serialize)]
struct DescriptorView {
    #[serde(flatten)]
    descriptor: TypeDescriptor,
    #[serde(skip_serializing_if = "Option::is_none")]
    raw: Option<String>,
}

impl TableOutput for DescriptorView {
    fn print_table(&self, color: bool) {
        let d = &self.descriptor;
        let control = d.control_type.map(|c| c.to_string());
        for (key, value) in [
            ("Control", control.as_deref().unwrap_or("-")),
            ("Display", or_dash(&d.display)),
            ("Description", or_dash(&d.description)),
            ("Read only", or_dash(&d.read_only)),
            ("Label", or_dash(&d.label)),
            ("Raw", self.raw.as_deref().unwrap_or("-")),
        ] {
            print_field(key, value, color);
        }
    }
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

impl DescriptorCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            DescriptorSubcommand::Parse(args) => self.parse(args, global),
            DescriptorSubcommand::Render(args) => self.render(args, global),
        }
    }

    fn parse(&self, args: &ParseArgs, global: &GlobalOptions) -> Result<()> {
        let descriptor = TypeDescriptor::parse(&args.raw);
        let view = DescriptorView {
            raw: descriptor.render(),
            descriptor,
        };
        global.writer()?.write(&view)
    }

    fn render(&self, args: &RenderArgs, global: &GlobalOptions) -> Result<()> {
        let descriptor = args.descriptor();
        let Some(raw) = descriptor.render() else {
            bail!("Nothing to render. Pass at least one of --control-type, --display, --description, --read-only, --label");
        };
        let writer = global.writer()?;
        match writer.format() {
            crate::output::OutputFormat::Table => {
                println!("{}", raw);
                Ok(())
            }
            _ => writer.write(&DescriptorView {
                descriptor,
                raw: Some(raw),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_args() {
        let args = RenderArgs {
            control_type: Some(ControlArg::Password),
            display: Some("hidden".to_string()),
            description: None,
            read_only: None,
            label: Some("Token".to_string()),
        };
        assert_eq!(
            args.descriptor().render().as_deref(),
            Some("password display='hidden' label='Token'")
        );
    }

    #[test]
    fn test_view_serializes_flat() {
        let descriptor = TypeDescriptor::parse("checkbox label='Run'");
        let view = DescriptorView {
            raw: descriptor.render(),
            descriptor,
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["controlType"], "checkbox");
        assert_eq!(json["label"], "Run");
        assert_eq!(json["raw"], "checkbox label='Run'");
    }
}

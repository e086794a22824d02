//
//  teamcity-cli
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod config;
mod decode;
mod descriptor;
mod encode;

pub use config::ConfigCommand;
pub use decode::DecodeCommand;
pub use descriptor::DescriptorCommand;
pub use encode::EncodeCommand;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use crate::config::Config;
use crate::model::{BuildFeature, Dependency, ProjectFeature, Step, Trigger};
use crate::output::{OutputFormat, OutputWriter};

/// Translate TeamCity configuration between wire payloads and typed documents.
#[derive(Parser, Debug)]
#[command(
    name = "tcity",
    version,
    about = "Translate TeamCity configuration payloads",
    long_about = "tcity decodes TeamCity REST payloads (property bags, steps, triggers,\n\
                  features, dependencies) into typed documents and encodes them back.",
    propagate_version = true,
    after_help = "Use 'tcity <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Options accepted by every command.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Output JSON (shorthand for --output json)
    #[arg(long, global = true)]
    pub json: bool,

    /// Output format: table, json or yaml
    #[arg(long, short = 'o', global = true, env = "TCITY_OUTPUT")]
    pub output: Option<String>,

    /// Single-line JSON
    #[arg(long, global = true)]
    pub compact: bool,

    /// Disable colors
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,
}

impl GlobalOptions {
    /// Output format from flags, falling back to the config file.
    pub fn format(&self, config: &Config) -> Result<OutputFormat> {
        if self.json {
            return Ok(OutputFormat::Json);
        }
        match &self.output {
            Some(format) => format.parse(),
            None => config.core.output.parse(),
        }
    }

    /// Builds the writer for this invocation.
    pub fn writer(&self) -> Result<OutputWriter> {
        let config = Config::load()?;
        let color = match config.core.color.as_str() {
            _ if self.no_color => false,
            "always" => true,
            "never" => false,
            _ => console::colors_enabled(),
        };
        Ok(OutputWriter::new(self.format(&config)?)
            .with_color(color)
            .with_pretty(config.core.pretty && !self.compact))
    }
}

/// What a payload contains.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Build steps
    Step,
    /// Build triggers
    Trigger,
    /// Build features
    Feature,
    /// Project features
    ProjectFeature,
    /// Snapshot and artifact dependencies
    Dependency,
    /// Build configuration settings bag
    Options,
    /// Git VCS root (root object or its property bag)
    Git,
    /// Build parameters
    Parameters,
}

impl Kind {
    /// Collection item key used when encoding a list.
    pub fn item_key(&self) -> Option<&'static str> {
        match self {
            Self::Step => Some(Step::ITEM),
            Self::Trigger => Some(Trigger::ITEM),
            Self::Feature => Some(BuildFeature::ITEM),
            Self::ProjectFeature => Some(ProjectFeature::ITEM),
            Self::Dependency => Some(Dependency::SNAPSHOT_ITEM),
            Self::Options | Self::Git | Self::Parameters => None,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode a wire payload into typed form
    #[command(visible_alias = "d")]
    Decode(DecodeCommand),

    /// Encode a typed document into a wire payload
    #[command(visible_alias = "e")]
    Encode(EncodeCommand),

    /// Parse or render parameter UI descriptors
    Descriptor(DescriptorCommand),

    /// Manage CLI configuration
    Config(ConfigCommand),

    /// Show version information
    Version,
}

//
//  teamcity-cli
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # TeamCity Configuration Codec
//!
//! Typed access to the configuration payloads of the TeamCity REST API.
//!
//! ## Overview
//!
//! TeamCity describes nearly every piece of configuration as a flat bag of
//! string properties: build settings, VCS roots, build steps, triggers,
//! features and dependencies. This library translates between that wire
//! form and plain Rust types, and powers the `tcity` CLI tool.
//!
//! ## Features
//!
//! - **Property bags**: Ordered, duplicate-tolerant `{count, property}` lists
//! - **Declarative mapping**: One property table per type, with per-field
//!   omit-if-default and force rules
//! - **Parameters**: Plain, `system.` and `env.` namespaces plus UI descriptors
//! - **Polymorphic resources**: Typed variants selected by `type`, with a
//!   generic fallback that keeps unknown types intact
//!
//! ## Module Structure
//!
//! - [`codec`]: Property bags, descriptors, the mapper, parameters, dispatch
//! - [`model`]: Concrete configuration types and resource kinds
//! - [`transport`]: The boundary through which envelopes enter and leave
//! - [`config`]: Configuration file management
//! - [`output`]: Output formatting (Table, JSON, YAML)
//! - [`cli`]: Command-line interface definitions using clap
//!
//! ## Example Usage
//!
//! ```rust
//! use teamcity_cli::codec::{Envelope, Polymorphic, PropertyBag};
//! use teamcity_cli::model::Trigger;
//!
//! let json = r#"{"id": "T1", "type": "newFutureThing",
//!                "properties": {"count": 1, "property": [{"name": "x", "value": "1"}]}}"#;
//! let trigger = Trigger::from_envelope(Envelope::from_json(json).unwrap()).unwrap();
//! assert!(trigger.is_generic());
//! assert_eq!(trigger.to_envelope().properties.get("x"), Some("1"));
//! ```

/// Command-line interface definitions.
///
/// Contains all CLI commands, arguments, and subcommands defined using the clap derive API.
pub mod cli;

/// The configuration codec.
///
/// Wire shapes, the declarative mapper, namespaced parameters and
/// polymorphic dispatch. Performs no I/O.
pub mod codec;

/// Configuration file management.
///
/// Manages the CLI's configuration stored in platform-specific locations:
/// - Linux: `~/.config/tcity/config.toml`
/// - macOS: `~/Library/Application Support/tcity/config.toml`
/// - Windows: `%APPDATA%\tcity\config.toml`
pub mod config;

/// Concrete configuration types.
pub mod model;

/// Output formatting for different modes.
///
/// Provides formatters for:
/// - Table format: Human-readable tables for interactive use
/// - JSON format: Structured output for scripting and automation
/// - YAML format: Editable documents for `tcity encode`
pub mod output;

/// Envelope sources and sinks.
pub mod transport;

/// Re-export of the main CLI struct for convenient access.
///
/// # Example
///
/// ```rust,no_run
/// use clap::Parser;
/// use teamcity_cli::Cli;
///
/// let cli = Cli::parse();
/// ```
pub use cli::Cli;

/// Re-export of the codec error type.
pub use codec::CodecError;

/// Re-export of the configuration struct.
pub use config::Config;

/// Application name constant.
///
/// The name of the CLI binary, used for display purposes and configuration paths.
///
/// # Value
///
/// `"tcity"`
pub const APP_NAME: &str = "tcity";

/// Application version constant.
///
/// ```rust
/// use teamcity_cli::VERSION;
///
/// println!("tcity version {}", VERSION);
/// ```
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// Standardized exit codes following Unix conventions, allowing scripts
/// to programmatically detect the outcome of CLI operations.
///
/// # Example
///
/// ```rust,no_run
/// use teamcity_cli::exit_codes;
/// use std::process;
///
/// process::exit(exit_codes::DECODE_ERROR);
/// ```
pub mod exit_codes {
    /// Successful execution.
    ///
    /// # Value
    ///
    /// `0`
    pub const SUCCESS: i32 = 0;

    /// General error.
    ///
    /// An unspecified error occurred during execution.
    /// Check stderr for details.
    ///
    /// # Value
    ///
    /// `1`
    pub const ERROR: i32 = 1;

    /// Invalid usage or arguments.
    ///
    /// # Value
    ///
    /// `2`
    pub const USAGE: i32 = 2;

    /// Input is not well-formed JSON or YAML.
    ///
    /// # Value
    ///
    /// `3`
    pub const INPUT_ERROR: i32 = 3;

    /// A known resource type is missing a required property or carries an
    /// unparseable value.
    ///
    /// # Value
    ///
    /// `8`
    pub const DECODE_ERROR: i32 = 8;
}

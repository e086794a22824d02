//
//  teamcity-cli
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use teamcity_cli::cli::{Cli, Commands};
use teamcity_cli::codec::CodecError;
use teamcity_cli::exit_codes;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    init_logging();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Execute command
    let result = run(cli).await;

    // Handle result and exit
    match result {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_code(&e));
        }
    }
}

/// Initialize logging based on environment
fn init_logging() {
    let filter = EnvFilter::try_from_env("TCITY_DEBUG")
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Structural decode failures get their own exit code.
fn exit_code(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<CodecError>() {
        Some(CodecError::MissingProperty { .. } | CodecError::InvalidValue { .. }) => {
            exit_codes::DECODE_ERROR
        }
        Some(CodecError::Json(_) | CodecError::Yaml(_)) => exit_codes::INPUT_ERROR,
        _ => exit_codes::ERROR,
    }
}

/// Main command dispatcher
async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Decode(cmd) => cmd.run(&cli.global).await,
        Commands::Encode(cmd) => cmd.run(&cli.global).await,
        Commands::Descriptor(cmd) => cmd.run(&cli.global).await,
        Commands::Config(cmd) => cmd.run(&cli.global).await,
        Commands::Version => {
            println!("tcity version {}", teamcity_cli::VERSION);
            Ok(())
        }
    }
}

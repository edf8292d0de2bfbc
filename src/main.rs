//! # smbackup
//!
//! Export AWS Secrets Manager secrets to a portable JSON file and import
//! them back.
//!
//! ## Overview
//!
//! 1. **Export** - enumerates secrets (optionally regex-filtered and
//!    sorted by name), fetches each value, and writes a JSON array to a
//!    file or stdout
//! 2. **Import** - reads a JSON array from a file or stdin and performs an
//!    idempotent create-or-update per record
//!
//! Per-record failures are logged and skipped so one bad entry never
//! aborts the run; fatal conditions (unreadable input, unwritable output,
//! invalid filter regex) exit non-zero with the error chain logged.
//! Logs go to stderr so an export piped to stdout stays clean.

use anyhow::{Context, Result};
use clap::Parser;
use regex::Regex;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;
use tracing::info;

use secrets_manager_backup::aws::AwsSecretsManager;
use secrets_manager_backup::cli::{Cli, Commands};
use secrets_manager_backup::export::{export_secrets, ExportOptions};
use secrets_manager_backup::import::import_secrets;
use secrets_manager_backup::AwsConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; RUST_LOG takes precedence over --log-level
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_level.as_directive().into()),
        )
        .with_writer(io::stderr)
        .init();

    let aws_config = AwsConfig {
        region: cli.region.clone(),
        profile: cli.profile.clone(),
    };
    let store = AwsSecretsManager::new(&aws_config)
        .await
        .context("Failed to create AWS Secrets Manager client")?;

    match cli.command {
        Commands::Export { filter, sort, output } => {
            let filter = filter
                .map(|pattern| {
                    Regex::new(&pattern)
                        .with_context(|| format!("Invalid filter regex: {pattern}"))
                })
                .transpose()?;
            let options = ExportOptions { filter, sort };

            let mut writer = open_output(output.as_deref())?;
            export_secrets(&store, &options, writer.as_mut()).await?;
            writer.flush().context("Failed to flush output")?;
        }
        Commands::Import { input } => {
            let mut reader = open_input(input.as_deref())?;
            import_secrets(&store, reader.as_mut()).await?;
        }
    }

    Ok(())
}

/// Open the export destination, defaulting to stdout
fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            info!("Writing secrets to {}", path.display());
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(io::stdout())),
    }
}

/// Open the import source, defaulting to stdin
fn open_input(path: Option<&Path>) -> Result<Box<dyn Read>> {
    match path {
        Some(path) => {
            info!("Reading secrets from {}", path.display());
            let file = File::open(path)
                .with_context(|| format!("Failed to open input file {}", path.display()))?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(io::stdin())),
    }
}

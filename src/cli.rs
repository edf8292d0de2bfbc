//! # smbackup CLI
//!
//! Command-line interface for the Secrets Manager backup tool.
//!
//! ## Usage
//!
//! ```bash
//! # Dump every secret to stdout
//! smbackup export
//!
//! # Dump secrets matching a name pattern, sorted, into a file
//! smbackup export --filter '^prod/' --sort asc --output secrets.json
//!
//! # Restore from a backup file
//! smbackup import --input secrets.json
//!
//! # Use a named credentials profile and a region override
//! smbackup --profile backup --region eu-west-1 export
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Secrets Manager backup CLI
#[derive(Debug, Parser)]
#[command(name = "smbackup")]
#[command(
    about = "Export AWS Secrets Manager secrets to JSON and import them back",
    long_about = None,
    after_help = "\
Examples:
  smbackup export --output secrets.json
  smbackup export --filter '^prod/' --sort desc
  smbackup --profile backup --region eu-west-1 import --input secrets.json
"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Logging verbosity (RUST_LOG takes precedence when set)
    #[arg(short, long, global = true, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// AWS credentials profile (defaults to the SDK credential chain)
    #[arg(short, long, global = true, value_name = "PROFILE")]
    pub profile: Option<String>,

    /// AWS region override (defaults to the SDK region chain)
    #[arg(short, long, global = true, value_name = "REGION")]
    pub region: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Export all secrets as a JSON array
    Export {
        /// Only export secrets whose name matches this regex
        #[arg(short, long, value_name = "REGEX")]
        filter: Option<String>,

        /// Sort exported records by name
        #[arg(short, long, value_enum, value_name = "ORDER")]
        sort: Option<SortOrder>,

        /// Output file (defaults to stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Import secrets from a JSON array, creating or updating each one
    Import {
        /// Input file (defaults to stdin)
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,
    },
}

/// Sort order for exported records
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortOrder {
    /// Ascending by secret name
    #[value(name = "asc", alias = "ascending")]
    Ascending,
    /// Descending by secret name
    #[value(name = "desc", alias = "descending")]
    Descending,
}

/// Logging verbosity for the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// EnvFilter directive used when RUST_LOG is not set
    pub fn as_directive(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

// Display is what clap renders for the default value in --help
impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_directive())
    }
}

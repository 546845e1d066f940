//! CLI argument definitions for sfnorm.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "sfnorm",
    version,
    about = "Normalize record tables for REST, SOAP, Bulk and Metadata requests",
    long_about = "Normalize caller data into record tables before a request is built,\n\
                  negotiate per-dialect request headers, and repair parsed responses\n\
                  whose relationship columns differ between dialects."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Configuration file (default: ./sfnorm.toml when present).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Coerce JSON input into a record table and resolve its identifier column.
    Prepare(PrepareArgs),

    /// Print the headers negotiated for a dialect as JSON.
    Headers(HeadersArgs),

    /// Remove null relationship columns from a parsed response table.
    Repair(RepairArgs),

    /// List every known header with its dialects and defaults.
    Catalog,
}

#[derive(Parser)]
pub struct PrepareArgs {
    /// JSON file holding a scalar, array, object or array of objects.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Operation the table is prepared for (e.g. delete, retrieve, describeSObjects).
    #[arg(long = "operation", short = 'o')]
    pub operation: String,

    /// Write the table as CSV instead of printing it.
    #[arg(long = "output", value_name = "CSV")]
    pub output: Option<PathBuf>,

    /// Maximum rows to print.
    #[arg(long = "limit", default_value_t = 20)]
    pub limit: usize,
}

#[derive(Parser)]
pub struct HeadersArgs {
    /// Target dialect (REST, SOAP, Bulk1, Bulk2, Metadata).
    #[arg(long = "dialect", short = 'd')]
    pub dialect: String,

    /// Override one header field, e.g. QueryOptions.batchSize=1000.
    #[arg(long = "set", value_name = "HEADER.FIELD=VALUE")]
    pub set: Vec<String>,
}

#[derive(Parser)]
pub struct RepairArgs {
    /// CSV file holding the parsed response table.
    #[arg(value_name = "RESPONSE")]
    pub input: PathBuf,

    /// Dialect the response was received over (REST or SOAP).
    #[arg(long = "dialect", short = 'd')]
    pub dialect: String,

    /// Write the repaired table as CSV instead of printing it.
    #[arg(long = "output", value_name = "CSV")]
    pub output: Option<PathBuf>,

    /// Maximum rows to print.
    #[arg(long = "limit", default_value_t = 20)]
    pub limit: usize,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

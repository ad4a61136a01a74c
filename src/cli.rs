//! CLI argument parsing for lychee-verdict

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Log location used when neither the CLI nor a config file names one
pub const DEFAULT_LOG_PATH: &str = "log.json";

/// Report format written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text report (default)
    Text,
    /// JSON verdict for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "lychee-verdict")]
#[command(version)]
#[command(
    about = "Evaluates whether the problems reported by the lychee link checker are actual site or server problems",
    long_about = None
)]
pub struct Cli {
    /// Error codes that trigger failure: integers or inclusive ranges (e.g. 503 400..404 999)
    #[arg(value_name = "ERROR_CODES")]
    pub error_codes: Vec<String>,

    /// Increase log verbosity
    #[arg(short, long)]
    pub verbose: bool,

    /// Ignore timeouts
    #[arg(short = 't', long = "ignore-timeouts")]
    pub ignore_timeouts: bool,

    /// Ignore network errors without status codes
    #[arg(short = 'n', long = "ignore-nocode-net-err")]
    pub ignore_nocode_net_err: bool,

    /// Path to the lychee JSON log file [default: log.json]
    #[arg(short = 'l', long = "log-path", value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Load error codes and flags from a TOML file
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Write a Markdown job summary (e.g. $GITHUB_STEP_SUMMARY)
    #[arg(long = "job-summary", value_name = "PATH")]
    pub job_summary: Option<PathBuf>,
}

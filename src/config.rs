//! Optional TOML configuration file
//!
//! # Example lychee-verdict.toml
//!
//! ```toml
//! # Client errors worth failing the build on
//! error_codes = ["404..407", "409..417", "421..428", "431", "451"]
//! ignore_timeouts = true
//! ignore_nocode_net_err = false
//! log_path = "lychee/out.json"
//! ```

use crate::classify::EvaluationPolicy;
use crate::cli::Cli;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Contents of a configuration file
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct VerdictConfig {
    /// Error-code spec tokens
    pub error_codes: Vec<String>,
    pub ignore_timeouts: bool,
    pub ignore_nocode_net_err: bool,
    /// Lychee log location, relative to the working directory
    pub log_path: Option<PathBuf>,
}

impl VerdictConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    /// Load configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML")
    }
}

/// Run settings after merging the config file with the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub error_codes: Vec<String>,
    pub policy: EvaluationPolicy,
    pub log_path: PathBuf,
}

impl Settings {
    /// Merge CLI arguments over an optional config file
    ///
    /// Spec tokens given on the command line replace the file's list, flags
    /// are OR-ed, and an explicit `--log-path` wins.
    pub fn resolve(cli: &Cli, config: Option<VerdictConfig>) -> Self {
        let config = config.unwrap_or_default();

        let error_codes = if cli.error_codes.is_empty() {
            config.error_codes
        } else {
            cli.error_codes.clone()
        };

        let log_path = cli
            .log_path
            .clone()
            .or(config.log_path)
            .unwrap_or_else(|| PathBuf::from(crate::cli::DEFAULT_LOG_PATH));

        Self {
            error_codes,
            policy: EvaluationPolicy {
                ignore_timeouts: cli.ignore_timeouts || config.ignore_timeouts,
                ignore_nocode_net_err: cli.ignore_nocode_net_err || config.ignore_nocode_net_err,
            },
            log_path,
        }
    }
}

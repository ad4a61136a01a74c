use anyhow::{bail, Result};
use clap::Parser;
use lychee_verdict::{
    classify::{self, Verdict},
    cli::{Cli, OutputFormat},
    config::{Settings, VerdictConfig},
    error_codes::ErrorCodeSpec,
    exit_codes,
    lychee_log::LycheeLog,
    report,
};
use std::io::IsTerminal;
use std::process;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber; `--verbose` lowers the level to DEBUG
fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();
}

/// Load inputs, evaluate, and emit the report
fn run(args: &Cli) -> Result<Verdict> {
    let config = match &args.config {
        Some(path) => Some(VerdictConfig::from_file(path)?),
        None => None,
    };
    let settings = Settings::resolve(args, config);

    if settings.error_codes.is_empty() {
        bail!("No error codes given. Pass them as arguments (e.g. 503 400..404) or via --config");
    }

    let spec = ErrorCodeSpec::parse(&settings.error_codes)?;
    debug!(error_codes = %spec, "parsed error code spec");
    debug!(log_path = %settings.log_path.display(), "lychee log path");

    let log = LycheeLog::from_file(&settings.log_path)?;
    let verdict = classify::evaluate(&spec, &settings.policy, &log.records);

    let tally = verdict.tally;
    if verdict.failed {
        error!(
            broken = tally.matched,
            excluded = tally.excluded,
            ignored = tally.unmatched,
            "Broken links found!"
        );
    } else {
        info!(
            excluded = tally.excluded,
            ignored = tally.unmatched,
            "No links broken."
        );
    }

    match args.format {
        OutputFormat::Text => print!("{}", report::render_text(&verdict)),
        OutputFormat::Json => println!("{}", report::render_json(&verdict)?),
    }

    if let Some(path) = &args.job_summary {
        report::write_job_summary(&verdict, path)?;
    }

    Ok(verdict)
}

fn main() {
    let args = Cli::parse();

    init_tracing(args.verbose);

    match run(&args) {
        Ok(verdict) => process::exit(exit_codes::for_verdict(verdict.failed)),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            process::exit(exit_codes::USAGE_ERROR);
        }
    }
}

//! lychee-verdict - decide whether a lychee link-check run really failed
//!
//! This library reads the JSON log written by the lychee link checker,
//! screens every reported failure against a user-supplied list of status
//! codes and ranges, and produces a pass/fail verdict together with the
//! records responsible for a failure.

pub mod classify;
pub mod cli;
pub mod config;
pub mod error_codes;
pub mod exit_codes;
pub mod lychee_log;
pub mod record;
pub mod report;

//! Classification of failure records into a run verdict
//!
//! Every record goes through the same ordered rule chain; the first rule
//! that applies decides:
//!
//! ```text
//! 1. Timeout            + ignore_timeouts        → excluded
//! 2. NetworkError, no code + ignore_nocode_net_err → excluded
//! 3. code in spec                                 → matched
//! 4. no code                                      → matched (cannot be screened)
//! 5. otherwise                                    → not matched
//! ```
//!
//! Exclusion flags take precedence over spec matching.

use crate::error_codes::ErrorCodeSpec;
use crate::record::{FailureKind, FailureRecord};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Exclusion switches for classes of failures
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationPolicy {
    /// Ignore timed-out requests
    pub ignore_timeouts: bool,
    /// Ignore network errors that carry no status code
    pub ignore_nocode_net_err: bool,
}

/// Why a record was excluded from the verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    Timeout,
    NoCodeNetworkError,
}

/// Why a record counts as a real failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchReason {
    /// Status code is covered by the spec
    StatusInSpec(u16),
    /// No status code to screen against
    Uncoded,
}

/// Outcome of the rule chain for one record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Excluded(Exclusion),
    Matched(MatchReason),
    /// Status code present but not in the spec
    Unmatched(u16),
}

impl Decision {
    pub fn is_match(&self) -> bool {
        matches!(self, Decision::Matched(_))
    }
}

/// Apply the rule chain to a single record
pub fn classify_record(
    spec: &ErrorCodeSpec,
    policy: &EvaluationPolicy,
    record: &FailureRecord,
) -> Decision {
    if record.kind == FailureKind::Timeout && policy.ignore_timeouts {
        return Decision::Excluded(Exclusion::Timeout);
    }

    if record.kind == FailureKind::NetworkError
        && record.status.is_none()
        && policy.ignore_nocode_net_err
    {
        return Decision::Excluded(Exclusion::NoCodeNetworkError);
    }

    match record.status {
        Some(code) if spec.contains(code) => Decision::Matched(MatchReason::StatusInSpec(code)),
        Some(code) => Decision::Unmatched(code),
        None => Decision::Matched(MatchReason::Uncoded),
    }
}

/// Per-decision counters for one evaluation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub total: usize,
    pub matched: usize,
    pub excluded: usize,
    pub unmatched: usize,
}

impl Tally {
    fn record(&mut self, decision: &Decision) {
        self.total += 1;
        match decision {
            Decision::Excluded(_) => self.excluded += 1,
            Decision::Matched(_) => self.matched += 1,
            Decision::Unmatched(_) => self.unmatched += 1,
        }
    }
}

/// Run-level result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// True iff at least one record matched
    pub failed: bool,
    /// Records that count as real failures, in log order
    pub matched_records: Vec<FailureRecord>,
    pub tally: Tally,
}

impl Verdict {
    pub fn passed(&self) -> bool {
        !self.failed
    }
}

/// Evaluate a whole log against a spec and policy
///
/// # Example
///
/// ```
/// use lychee_verdict::classify::{evaluate, EvaluationPolicy};
/// use lychee_verdict::error_codes::ErrorCodeSpec;
/// use lychee_verdict::record::{FailureKind, FailureRecord};
///
/// let spec = ErrorCodeSpec::parse(["503", "400..404"]).unwrap();
/// let log = vec![FailureRecord::new("https://example.com", Some(503), FailureKind::HttpStatus)];
///
/// let verdict = evaluate(&spec, &EvaluationPolicy::default(), &log);
/// assert!(verdict.failed);
/// assert_eq!(verdict.matched_records.len(), 1);
/// ```
pub fn evaluate(
    spec: &ErrorCodeSpec,
    policy: &EvaluationPolicy,
    log: &[FailureRecord],
) -> Verdict {
    let mut tally = Tally::default();
    let mut matched_records = Vec::new();

    for record in log {
        let decision = classify_record(spec, policy, record);
        debug!(
            url = %record.url,
            status = ?record.status,
            kind = %record.kind,
            ?decision,
            "classified"
        );

        tally.record(&decision);
        if decision.is_match() {
            matched_records.push(record.clone());
        }
    }

    Verdict {
        failed: !matched_records.is_empty(),
        matched_records,
        tally,
    }
}

//! Property-based tests for the spec parser and classification engine
//!
//! Core properties tested:
//! 1. Membership of single codes and their neighbours
//! 2. Inclusive range endpoints and midpoints
//! 3. Idempotence of duplicate tokens
//! 4. Stable, order-preserving filtering
//! 5. Verdict consistency with the matched set

use lychee_verdict::classify::{classify_record, evaluate, EvaluationPolicy};
use lychee_verdict::error_codes::{ErrorCodeSpec, SpecError};
use lychee_verdict::record::{FailureKind, FailureRecord};
use proptest::prelude::*;

fn kind_strategy() -> impl Strategy<Value = FailureKind> {
    prop_oneof![
        Just(FailureKind::Timeout),
        Just(FailureKind::NetworkError),
        Just(FailureKind::HttpStatus),
        Just(FailureKind::Other),
    ]
}

fn record_strategy() -> impl Strategy<Value = FailureRecord> {
    (
        "[a-z]{1,8}",
        prop::option::of(100u16..600),
        kind_strategy(),
    )
        .prop_map(|(host, status, kind)| {
            FailureRecord::new(format!("https://{}.example/", host), status, kind)
        })
}

fn policy_strategy() -> impl Strategy<Value = EvaluationPolicy> {
    (any::<bool>(), any::<bool>()).prop_map(|(ignore_timeouts, ignore_nocode_net_err)| {
        EvaluationPolicy {
            ignore_timeouts,
            ignore_nocode_net_err,
        }
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_single_code_membership(code in 1u16..u16::MAX) {
        let spec = ErrorCodeSpec::parse([code.to_string()]).unwrap();
        prop_assert!(spec.contains(code));
        prop_assert!(!spec.contains(code - 1));
        prop_assert!(!spec.contains(code + 1));
    }

    #[test]
    fn prop_range_membership(a in 1u16..1000, len in 0u16..1000) {
        let b = a + len;
        let spec = ErrorCodeSpec::parse([format!("{}..{}", a, b)]).unwrap();
        prop_assert!(spec.contains(a));
        prop_assert!(spec.contains(b));
        prop_assert!(spec.contains(a + (b - a) / 2));
        prop_assert!(!spec.contains(a - 1));
        prop_assert!(!spec.contains(b + 1));
    }

    #[test]
    fn prop_reversed_range_rejected(a in 0u16..1000, gap in 1u16..1000) {
        let token = format!("{}..{}", a + gap, a);
        prop_assert_eq!(
            ErrorCodeSpec::parse([token.as_str()]),
            Err(SpecError::InvalidSpecToken(token.clone()))
        );
    }

    #[test]
    fn prop_alphabetic_token_rejected(token in "[a-zA-Z]{1,10}") {
        prop_assert_eq!(
            ErrorCodeSpec::parse([token.as_str()]),
            Err(SpecError::InvalidSpecToken(token.clone()))
        );
    }

    #[test]
    fn prop_duplicate_tokens_idempotent(
        codes in prop::collection::vec(100u16..600, 1..10),
        probe in 0u16..1000,
    ) {
        let tokens: Vec<String> = codes.iter().map(|c| c.to_string()).collect();
        let doubled: Vec<String> = tokens.iter().chain(tokens.iter()).cloned().collect();

        let once = ErrorCodeSpec::parse(&tokens).unwrap();
        let twice = ErrorCodeSpec::parse(&doubled).unwrap();
        prop_assert_eq!(once.contains(probe), twice.contains(probe));
    }

    #[test]
    fn prop_parser_never_panics(tokens in prop::collection::vec(".{0,12}", 0..6)) {
        let _ = ErrorCodeSpec::parse(&tokens);
    }

    #[test]
    fn prop_matched_records_are_ordered_subsequence(
        log in prop::collection::vec(record_strategy(), 0..30),
        codes in prop::collection::vec(100u16..600, 0..5),
        policy in policy_strategy(),
    ) {
        let tokens: Vec<String> = codes.iter().map(|c| c.to_string()).collect();
        let spec = ErrorCodeSpec::parse(&tokens).unwrap();

        let verdict = evaluate(&spec, &policy, &log);

        let expected: Vec<FailureRecord> = log
            .iter()
            .filter(|r| classify_record(&spec, &policy, r).is_match())
            .cloned()
            .collect();
        prop_assert_eq!(&verdict.matched_records, &expected);
        prop_assert_eq!(verdict.failed, !expected.is_empty());
        prop_assert_eq!(verdict.tally.total, log.len());
        prop_assert_eq!(
            verdict.tally.matched + verdict.tally.excluded + verdict.tally.unmatched,
            log.len()
        );
    }

    #[test]
    fn prop_ignored_timeouts_never_match(
        log in prop::collection::vec(record_strategy(), 0..30),
        codes in prop::collection::vec(100u16..600, 0..5),
    ) {
        let tokens: Vec<String> = codes.iter().map(|c| c.to_string()).collect();
        let spec = ErrorCodeSpec::parse(&tokens).unwrap();
        let policy = EvaluationPolicy { ignore_timeouts: true, ignore_nocode_net_err: false };

        let verdict = evaluate(&spec, &policy, &log);
        prop_assert!(verdict
            .matched_records
            .iter()
            .all(|r| r.kind != FailureKind::Timeout));
    }

    #[test]
    fn prop_uncoded_records_match_unless_excluded(
        record in record_strategy(),
        policy in policy_strategy(),
    ) {
        let record = FailureRecord { status: None, ..record };
        let excluded = (record.kind == FailureKind::Timeout && policy.ignore_timeouts)
            || (record.kind == FailureKind::NetworkError && policy.ignore_nocode_net_err);

        let decision = classify_record(&ErrorCodeSpec::empty(), &policy, &record);
        prop_assert_eq!(decision.is_match(), !excluded);
    }
}

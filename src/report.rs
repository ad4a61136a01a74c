//! Rendering of verdicts: text report, JSON, and Markdown job summary

use crate::classify::Verdict;
use crate::record::FailureRecord;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

const SEPARATOR: &str = "---";

/// Group matched records by source file, in order of first appearance
pub fn group_by_source(records: &[FailureRecord]) -> Vec<(&str, Vec<&FailureRecord>)> {
    let mut groups: Vec<(&str, Vec<&FailureRecord>)> = Vec::new();

    for record in records {
        match groups
            .iter_mut()
            .find(|(source, _)| *source == record.source)
        {
            Some((_, group)) => group.push(record),
            None => groups.push((record.source.as_str(), vec![record])),
        }
    }

    groups
}

/// Human-readable report
pub fn render_text(verdict: &Verdict) -> String {
    if !verdict.failed {
        return "No links broken.\n".to_string();
    }

    let mut report = String::from("Broken links found!\n");

    for (source, records) in group_by_source(&verdict.matched_records) {
        report.push_str(SEPARATOR);
        report.push('\n');
        report.push_str(&format!("Broken links in \"{}\":\n", source));
        for record in records {
            report.push_str(SEPARATOR);
            report.push('\n');
            report.push_str(&format!("Broken link: {}\n", record.url));
            report.push_str(&format!("{}\n", record.reason()));
        }
    }
    report.push_str(SEPARATOR);
    report.push('\n');

    report
}

/// Verdict as pretty-printed JSON
pub fn render_json(verdict: &Verdict) -> Result<String> {
    serde_json::to_string_pretty(verdict).context("Failed to serialize verdict")
}

/// Markdown summary in the format GitHub renders for job summaries
pub fn render_job_summary(verdict: &Verdict) -> String {
    if !verdict.failed {
        return "# :heavy_check_mark: No links broken.".to_string();
    }

    let mut summary = String::from("# :x:  Broken links found!\n");

    for (source, records) in group_by_source(&verdict.matched_records) {
        summary.push_str("\n---\n\n");
        summary.push_str(&format!("## Broken links in \"{}\"\n\n", source));
        for record in records {
            summary.push_str(&format!("Broken link: **<{}>**\n", record.url));
        }
    }
    summary.push_str("\n---\n");

    summary
}

/// Write the Markdown job summary to a file
pub fn write_job_summary<P: AsRef<Path>>(verdict: &Verdict, path: P) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, render_job_summary(verdict))
        .with_context(|| format!("Failed to write job summary to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Tally;
    use crate::record::FailureKind;

    fn failing_verdict() -> Verdict {
        let records = vec![
            FailureRecord::new("https://gone.example/", Some(404), FailureKind::HttpStatus)
                .with_source("README.md")
                .with_status_text("404 Not Found"),
            FailureRecord::new("https://nxdomain.example/", None, FailureKind::NetworkError)
                .with_source("docs/guide.md")
                .with_status_text("Failed: Network error")
                .with_details("dns error"),
            FailureRecord::new("https://down.example/", Some(503), FailureKind::HttpStatus)
                .with_source("README.md")
                .with_status_text("503 Service Unavailable"),
        ];
        Verdict {
            failed: true,
            tally: Tally {
                total: 3,
                matched: 3,
                excluded: 0,
                unmatched: 0,
            },
            matched_records: records,
        }
    }

    #[test]
    fn test_group_by_source_first_appearance() {
        let verdict = failing_verdict();
        let groups = group_by_source(&verdict.matched_records);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "README.md");
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[0].1[1].url, "https://down.example/");
        assert_eq!(groups[1].0, "docs/guide.md");
    }

    #[test]
    fn test_text_report_pass() {
        assert_eq!(render_text(&Verdict::default()), "No links broken.\n");
    }

    #[test]
    fn test_text_report_fail() {
        let report = render_text(&failing_verdict());
        assert!(report.starts_with("Broken links found!\n"));
        assert!(report.contains("Broken links in \"README.md\":"));
        assert!(report.contains("Broken link: https://gone.example/\n404 Not Found\n"));
        assert!(report.contains("Failed: Network error: dns error"));
        assert!(report.ends_with("---\n"));
    }

    #[test]
    fn test_json_report() {
        let json = render_json(&failing_verdict()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["failed"], true);
        assert_eq!(value["matched_records"].as_array().unwrap().len(), 3);
        assert_eq!(value["matched_records"][1]["kind"], "network_error");
        assert_eq!(value["tally"]["matched"], 3);
    }

    #[test]
    fn test_job_summary_pass() {
        assert_eq!(
            render_job_summary(&Verdict::default()),
            "# :heavy_check_mark: No links broken."
        );
    }

    #[test]
    fn test_job_summary_fail() {
        let summary = render_job_summary(&failing_verdict());
        assert!(summary.starts_with("# :x:  Broken links found!\n"));
        assert!(summary.contains("## Broken links in \"docs/guide.md\"\n\n"));
        assert!(summary.contains("Broken link: **<https://gone.example/>**\n"));
        assert!(summary.ends_with("\n---\n"));
    }

    #[test]
    fn test_write_job_summary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.md");
        write_job_summary(&failing_verdict(), &path).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("Broken links found!"));
    }
}

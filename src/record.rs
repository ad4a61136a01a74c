//! Failure records reported by the link checker

use serde::{Deserialize, Serialize};
use std::fmt;

/// Class of failure behind a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Request timed out
    Timeout,
    /// Network-level failure (DNS, connection refused, TLS, ...)
    NetworkError,
    /// Server answered with an error status
    HttpStatus,
    /// Anything the reader could not classify
    #[serde(other)]
    Other,
}

impl FailureKind {
    /// Derive the failure class from lychee's status text and code
    pub fn from_status(text: &str, code: Option<u16>) -> Self {
        if text.trim_start().starts_with("Timeout") {
            FailureKind::Timeout
        } else if text.contains("Network error") {
            FailureKind::NetworkError
        } else if code.is_some() {
            FailureKind::HttpStatus
        } else {
            FailureKind::Other
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::Timeout => "timeout",
            FailureKind::NetworkError => "network error",
            FailureKind::HttpStatus => "http status",
            FailureKind::Other => "other",
        };
        f.write_str(name)
    }
}

/// One reported link failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureRecord {
    /// Input file the link was found in
    #[serde(default)]
    pub source: String,
    pub url: String,
    /// HTTP status code, absent for network-level failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    pub kind: FailureKind,
    /// Status summary as printed by the link checker
    #[serde(default)]
    pub status_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl FailureRecord {
    pub fn new(url: impl Into<String>, status: Option<u16>, kind: FailureKind) -> Self {
        Self {
            source: String::new(),
            url: url.into(),
            status,
            kind,
            status_text: String::new(),
            details: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn with_status_text(mut self, text: impl Into<String>) -> Self {
        self.status_text = text.into();
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Human-readable reason line: `<status text>: <details>` or just the text
    pub fn reason(&self) -> String {
        let text = if self.status_text.is_empty() {
            match self.status {
                Some(code) => code.to_string(),
                None => self.kind.to_string(),
            }
        } else {
            self.status_text.clone()
        };

        match &self.details {
            Some(details) if !details.is_empty() => format!("{}: {}", text, details),
            _ => text,
        }
    }
}

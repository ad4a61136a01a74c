//! Reader for lychee's JSON output (`lychee --format json`)
//!
//! Only the `fail_map` section is consumed:
//!
//! ```json
//! {
//!   "total": 12,
//!   "successful": 10,
//!   "fail_map": {
//!     "README.md": [
//!       { "url": "https://example.com/gone", "status": { "text": "404 Not Found", "code": 404 } }
//!     ]
//!   }
//! }
//! ```
//!
//! Sources and entries are kept in file order.

use crate::record::{FailureKind, FailureRecord};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur while loading a lychee log
#[derive(Error, Debug)]
pub enum LogError {
    #[error("Lychee log file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read lychee log: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid lychee JSON log: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for log loading
pub type Result<T> = std::result::Result<T, LogError>;

/// `status` object of a lychee entry
#[derive(Debug, Clone, Deserialize)]
struct RawStatus {
    #[serde(default)]
    text: String,
    #[serde(default)]
    code: Option<u16>,
    #[serde(default)]
    details: Option<String>,
}

/// One entry of a `fail_map` list
#[derive(Debug, Clone, Deserialize)]
struct RawEntry {
    url: String,
    status: RawStatus,
}

/// Counters lychee reports next to the `fail_map`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct LogSummary {
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub successful: Option<u64>,
    #[serde(default)]
    pub errors: Option<u64>,
    #[serde(default)]
    pub timeouts: Option<u64>,
    #[serde(default)]
    pub excludes: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct RawLog {
    #[serde(flatten)]
    summary: LogSummary,
    #[serde(default, deserialize_with = "ordered_fail_map")]
    fail_map: Vec<(String, Vec<RawEntry>)>,
}

/// Deserialize a JSON object into a list of pairs, keeping key order
fn ordered_fail_map<'de, D>(
    deserializer: D,
) -> std::result::Result<Vec<(String, Vec<RawEntry>)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct OrderedMapVisitor;

    impl<'de> Visitor<'de> for OrderedMapVisitor {
        type Value = Vec<(String, Vec<RawEntry>)>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a map of source files to failure lists")
        }

        fn visit_unit<E>(self) -> std::result::Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((source, failures)) = map.next_entry::<String, Vec<RawEntry>>()? {
                entries.push((source, failures));
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_any(OrderedMapVisitor)
}

/// A fully loaded lychee log
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LycheeLog {
    pub summary: LogSummary,
    /// Failure records in file order
    pub records: Vec<FailureRecord>,
}

impl LycheeLog {
    /// Load a log from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(LogError::NotFound(path.to_path_buf()));
        }

        debug!(path = %path.display(), "reading lychee log");
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Parse a log from a JSON string
    pub fn from_json_str(content: &str) -> Result<Self> {
        let raw: RawLog = serde_json::from_str(content)?;

        let mut records = Vec::new();
        for (source, entries) in raw.fail_map {
            if entries.is_empty() {
                warn!(source = %source, "fail_map lists a source without failures");
            }
            records.extend(entries.into_iter().map(|entry| entry.into_record(&source)));
        }

        debug!(records = records.len(), "parsed lychee log");

        Ok(Self {
            summary: raw.summary,
            records,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RawEntry {
    fn into_record(self, source: &str) -> FailureRecord {
        let RawEntry { url, status } = self;
        let kind = FailureKind::from_status(&status.text, status.code);

        let mut record = FailureRecord::new(url, status.code, kind)
            .with_source(source)
            .with_status_text(status.text);
        record.details = status.details;
        record
    }
}

//! Error-code specifications for the failure filter
//!
//! A specification is a list of tokens, each either a single status code
//! (`503`) or an inclusive range (`400..404`). Tokens are resolved once at
//! parse time; membership checks afterwards never look at strings again.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Separator between the endpoints of a range token
const RANGE_SEPARATOR: &str = "..";

/// Errors raised while parsing an error-code specification
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpecError {
    #[error("Invalid error code token: '{0}' (expected an integer like 503 or a range like 400..404)")]
    InvalidSpecToken(String),
}

/// A single resolved token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecToken {
    /// A single status code
    Single(u16),
    /// An inclusive `low..high` range, `low <= high`
    Range(u16, u16),
}

impl SpecToken {
    /// Resolve one raw token
    pub fn parse(raw: &str) -> Result<Self, SpecError> {
        let invalid = || SpecError::InvalidSpecToken(raw.to_string());
        let token = raw.trim();

        if let Ok(code) = token.parse::<u16>() {
            return Ok(SpecToken::Single(code));
        }

        let (low, high) = token.split_once(RANGE_SEPARATOR).ok_or_else(invalid)?;
        let low = low.parse::<u16>().map_err(|_| invalid())?;
        let high = high.parse::<u16>().map_err(|_| invalid())?;

        if low > high {
            return Err(invalid());
        }

        Ok(SpecToken::Range(low, high))
    }

    /// Check if this token covers a code
    pub fn contains(&self, code: u16) -> bool {
        match *self {
            SpecToken::Single(single) => single == code,
            SpecToken::Range(low, high) => (low..=high).contains(&code),
        }
    }
}

impl fmt::Display for SpecToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecToken::Single(code) => write!(f, "{}", code),
            SpecToken::Range(low, high) => write!(f, "{}{}{}", low, RANGE_SEPARATOR, high),
        }
    }
}

/// Validated set of status codes that count as real failures
///
/// # Example
///
/// ```
/// use lychee_verdict::error_codes::ErrorCodeSpec;
///
/// let spec = ErrorCodeSpec::parse(["503", "400..404"]).unwrap();
/// assert!(spec.contains(503));
/// assert!(spec.contains(402));
/// assert!(!spec.contains(405));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorCodeSpec {
    singles: BTreeSet<u16>,
    ranges: Vec<(u16, u16)>,
}

impl ErrorCodeSpec {
    /// Spec that matches no status code at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a sequence of tokens, aborting on the first malformed one
    pub fn parse<I, S>(tokens: I) -> Result<Self, SpecError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut spec = Self::default();

        for token in tokens {
            match SpecToken::parse(token.as_ref())? {
                SpecToken::Single(code) => {
                    spec.singles.insert(code);
                }
                SpecToken::Range(low, high) => spec.ranges.push((low, high)),
            }
        }

        Ok(spec)
    }

    /// Check if a status code is covered by any single code or range
    pub fn contains(&self, code: u16) -> bool {
        self.singles.contains(&code)
            || self
                .ranges
                .iter()
                .any(|&(low, high)| (low..=high).contains(&code))
    }

    pub fn is_empty(&self) -> bool {
        self.singles.is_empty() && self.ranges.is_empty()
    }

    pub fn singles(&self) -> &BTreeSet<u16> {
        &self.singles
    }

    pub fn ranges(&self) -> &[(u16, u16)] {
        &self.ranges
    }

    /// Resolved tokens: singles in ascending order, then ranges in input order
    pub fn tokens(&self) -> Vec<SpecToken> {
        self.singles
            .iter()
            .map(|&code| SpecToken::Single(code))
            .chain(
                self.ranges
                    .iter()
                    .map(|&(low, high)| SpecToken::Range(low, high)),
            )
            .collect()
    }
}

impl FromStr for ErrorCodeSpec {
    type Err = SpecError;

    /// Parse a whitespace-separated list such as `"503 400..404"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s.split_whitespace())
    }
}

impl fmt::Display for ErrorCodeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.tokens().iter().map(|t| t.to_string()).collect();
        write!(f, "{}", rendered.join(" "))
    }
}

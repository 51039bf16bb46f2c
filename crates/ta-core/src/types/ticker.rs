//! Instrument identifiers.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::SnapshotError;

/// Maximum accepted ticker length.
pub const MAX_TICKER_LEN: usize = 32;

/// A validated instrument symbol, e.g. `RELIANCE` or `M&M`.
///
/// The exchange suffix (such as `.NS`) is resolved by the data source, so a
/// ticker is stored exactly as the caller supplied it, minus surrounding
/// whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ticker(String);

impl Ticker {
    /// Parse a ticker, rejecting empty or malformed identifiers.
    pub fn parse(raw: &str) -> Result<Self, SnapshotError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SnapshotError::MalformedTicker("ticker is empty".to_string()));
        }
        if trimmed.len() > MAX_TICKER_LEN {
            return Err(SnapshotError::MalformedTicker(format!(
                "ticker longer than {MAX_TICKER_LEN} characters"
            )));
        }
        if let Some(c) = trimmed.chars().find(|c| !is_ticker_char(*c)) {
            return Err(SnapshotError::MalformedTicker(format!(
                "invalid character {c:?} in {trimmed:?}"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_ticker_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '&' | '_' | '^' | '=')
}

impl FromStr for Ticker {
    type Err = SnapshotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Ticker {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for Ticker {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

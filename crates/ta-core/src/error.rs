//! Error types for the indicator engine.

use chrono::NaiveDate;
use thiserror::Error;

use crate::types::Field;

/// Top-level snapshot error.
///
/// Only conditions at the entry point are fatal; data-quality problems are
/// reported per indicator through [`IndicatorError`].
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Malformed ticker: {0}")]
    MalformedTicker(String),

    #[error("Data error: {0}")]
    Data(#[from] DataError),
}

/// Data source errors.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    #[error("No data available for the requested range")]
    NoDataAvailable,

    #[error("Bars out of order at index {index} ({date})")]
    UnorderedDates { index: usize, date: NaiveDate },

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why a single indicator could not be computed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndicatorError {
    #[error("Empty series")]
    EmptySeries,

    #[error("Missing or non-numeric field: {0}")]
    MissingField(Field),

    #[error("Insufficient history: need {required} bars, have {available}")]
    InsufficientHistory { required: usize, available: usize },

    #[error("Non-finite result for {indicator}")]
    NonFinite { indicator: &'static str },
}

/// Value or unavailable-with-reason, per indicator.
pub type IndicatorResult<T> = Result<T, IndicatorError>;

/// Result type alias for snapshot operations.
pub type SnapshotResult<T> = Result<T, SnapshotError>;

//! Core types and traits for the indicator engine.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (Bar, Series, Field)
//! - Ticker identifiers and lookback windows
//! - Series validation
//! - Core traits for indicators and data sources

pub mod error;
pub mod traits;
pub mod types;
pub mod validation;

pub use error::{DataError, IndicatorError, IndicatorResult, SnapshotError, SnapshotResult};
pub use traits::*;
pub use types::*;
pub use validation::{validate_series, InvalidReason, Verdict};

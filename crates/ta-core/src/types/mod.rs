//! Core data types for the indicator engine.

mod ohlcv;
mod ticker;
mod window;

pub use ohlcv::{Bar, Field, FieldSet, Series};
pub use ticker::{Ticker, MAX_TICKER_LEN};
pub use window::{LookbackWindow, DEFAULT_LOOKBACK_DAYS};

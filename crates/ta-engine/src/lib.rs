//! Indicator snapshot assembly.
//!
//! Turns a daily series into one [`Snapshot`]: every indicator of the suite
//! plus the previous bar's raw OHLCV. [`SnapshotEngine`] adds fetching from a
//! [`DataSource`](ta_core::traits::DataSource) and batching across tickers.

mod assembler;
mod engine;
mod snapshot;

pub use assembler::{get_technical_indicators, IndicatorSuite};
pub use engine::{EngineConfig, SnapshotEngine};
pub use snapshot::{IndicatorSet, IndicatorValue, PrevOhlcv, Snapshot, SnapshotRecord};

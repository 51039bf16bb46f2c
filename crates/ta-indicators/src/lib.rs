//! Technical indicators over daily bar series.
//!
//! This crate provides explicit implementations of the snapshot indicators:
//! - Smoothing primitives (SMA, Wilder smoothing, EMA)
//! - Moving averages (SMA50, 20-day average volume)
//! - Momentum indicators (RSI, MACD)
//! - Volatility indicators (ATR, Bollinger Bands)
//!
//! Window statistics use the `wide` crate for portable SIMD.

pub mod momentum;
pub mod moving_average;
pub mod simd;
pub mod smoothing;
pub mod volatility;

pub use momentum::{Macd, MacdOutput, Rsi};
pub use moving_average::Sma;
pub use volatility::{Atr, BollingerBands, BollingerOutput};

use ta_core::error::IndicatorError;

pub(crate) fn insufficient(required: usize, available: usize) -> IndicatorError {
    IndicatorError::InsufficientHistory {
        required,
        available,
    }
}

/// Reject NaN and infinities so they never reach the snapshot.
pub(crate) fn ensure_finite(indicator: &'static str, value: f64) -> Result<f64, IndicatorError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(IndicatorError::NonFinite { indicator })
    }
}

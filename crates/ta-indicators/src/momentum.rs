//! Momentum indicators.

use serde::{Deserialize, Serialize};
use ta_core::error::IndicatorResult;
use ta_core::traits::SeriesIndicator;
use ta_core::types::{Field, Series};

use crate::{ensure_finite, insufficient, smoothing};

/// Relative Strength Index (RSI).
///
/// Measures the speed and magnitude of recent price changes
/// to evaluate overbought or oversold conditions.
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
}

impl Rsi {
    /// Create a new RSI indicator.
    ///
    /// Common periods are 14 (default) or 9.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }

    /// RSI from Wilder-smoothed average gain and loss.
    ///
    /// A zero average loss maps to 100, including a perfectly flat series.
    pub fn from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
        if avg_loss == 0.0 {
            100.0
        } else {
            100.0 - (100.0 / (1.0 + avg_gain / avg_loss))
        }
    }
}

impl Default for Rsi {
    fn default() -> Self {
        Self::new(14)
    }
}

impl SeriesIndicator for Rsi {
    type Output = f64;

    fn name(&self) -> &'static str {
        "RSI14"
    }

    fn required_fields(&self) -> &'static [Field] {
        &[Field::Close]
    }

    fn min_bars(&self) -> usize {
        self.period + 1 // Need period deltas
    }

    fn compute(&self, series: &Series) -> IndicatorResult<f64> {
        let closes = series.closes();

        // Losses are stored as positive magnitudes
        let (gains, losses): (Vec<f64>, Vec<f64>) = closes
            .windows(2)
            .map(|w| {
                let change = w[1] - w[0];
                (change.max(0.0), (-change).max(0.0))
            })
            .unzip();

        let avg_gain = smoothing::wilder_last(&gains, self.period);
        let avg_loss = smoothing::wilder_last(&losses, self.period);

        match (avg_gain, avg_loss) {
            (Some(gain), Some(loss)) => ensure_finite(self.name(), Self::from_averages(gain, loss)),
            _ => Err(insufficient(self.min_bars(), series.len())),
        }
    }
}

/// MACD (Moving Average Convergence Divergence) output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdOutput {
    /// MACD line (fast EMA - slow EMA)
    pub macd: f64,
    /// Signal line (EMA of MACD)
    pub signal: f64,
    /// Histogram (MACD - Signal)
    pub histogram: f64,
}

/// MACD indicator.
///
/// Uses two EMAs to identify trend direction and momentum.
#[derive(Debug, Clone)]
pub struct Macd {
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
}

impl Macd {
    /// Create a new MACD with default parameters (12, 26, 9).
    pub fn new() -> Self {
        Self::with_periods(12, 26, 9)
    }

    /// Create a MACD with custom periods.
    pub fn with_periods(fast: usize, slow: usize, signal: usize) -> Self {
        assert!(fast > 0 && slow > 0 && signal > 0);
        assert!(fast < slow, "Fast period must be less than slow period");
        Self {
            fast_period: fast,
            slow_period: slow,
            signal_period: signal,
        }
    }

    /// MACD line aligned to the slow EMA: element 0 is input index `slow - 1`.
    fn macd_line(&self, closes: &[f64]) -> Vec<f64> {
        let fast_ema = smoothing::ema(closes, self.fast_period);
        let slow_ema = smoothing::ema(closes, self.slow_period);

        // Fast EMA starts earlier; drop its head so both end on the last bar
        let offset = self.slow_period - self.fast_period;
        fast_ema
            .get(offset..)
            .unwrap_or_default()
            .iter()
            .zip(slow_ema.iter())
            .map(|(f, s)| f - s)
            .collect()
    }
}

impl Default for Macd {
    fn default() -> Self {
        Self::new()
    }
}

impl SeriesIndicator for Macd {
    type Output = MacdOutput;

    fn name(&self) -> &'static str {
        "MACD"
    }

    fn required_fields(&self) -> &'static [Field] {
        &[Field::Close]
    }

    fn min_bars(&self) -> usize {
        self.slow_period + self.signal_period
    }

    fn compute(&self, series: &Series) -> IndicatorResult<MacdOutput> {
        let line = self.macd_line(&series.closes());

        let (Some(&macd), Some(signal)) = (
            line.last(),
            smoothing::ema_last(&line, self.signal_period),
        ) else {
            return Err(insufficient(self.min_bars(), series.len()));
        };

        let macd = ensure_finite("MACD_Line", macd)?;
        let signal = ensure_finite("MACD_Signal", signal)?;
        Ok(MacdOutput {
            macd,
            signal,
            histogram: macd - signal,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{flat_series, linear_series, series_from_closes};
    use ta_core::error::IndicatorError;

    #[test]
    fn test_rsi_basic() {
        let closes: Vec<f64> = (0..30)
            .map(|i| 100.0 + (i as f64 * 0.5).sin() * 5.0)
            .collect();
        let value = Rsi::default().evaluate(&series_from_closes(&closes)).unwrap();

        assert!((0.0..=100.0).contains(&value));
    }

    #[test]
    fn test_rsi_all_gains() {
        let series = linear_series(15, 100.0, 1.0);
        assert_eq!(Rsi::default().evaluate(&series), Ok(100.0));
    }

    #[test]
    fn test_rsi_all_losses() {
        let closes: Vec<f64> = (0..40).map(|i| 200.0 - i as f64).collect();
        let value = Rsi::default().evaluate(&series_from_closes(&closes)).unwrap();
        assert!(value.abs() < 1e-10);
    }

    #[test]
    fn test_rsi_flat_series_is_100() {
        let series = flat_series(20, 50.0, 1.0);
        assert_eq!(Rsi::default().evaluate(&series), Ok(100.0));
    }

    #[test]
    fn test_rsi_known_value() {
        // Period 2 by hand: deltas +2, -1, +1
        // seed gain = 1.0, loss = 0.5; then gain = (1 + 1) / 2 = 1.0, loss = 0.25
        let series = series_from_closes(&[10.0, 12.0, 11.0, 12.0]);
        let value = Rsi::new(2).evaluate(&series).unwrap();
        assert!((value - 80.0).abs() < 1e-10);
    }

    #[test]
    fn test_rsi_needs_fifteen_bars() {
        let series = linear_series(14, 100.0, 1.0);
        assert_eq!(
            Rsi::default().evaluate(&series),
            Err(IndicatorError::InsufficientHistory {
                required: 15,
                available: 14
            })
        );
    }

    #[test]
    fn test_macd_uptrend() {
        let series = linear_series(50, 100.0, 1.0);
        let output = Macd::new().evaluate(&series).unwrap();

        // In an uptrend, MACD should be positive
        assert!(output.macd > 0.0);
        assert_eq!(output.histogram, output.macd - output.signal);
    }

    #[test]
    fn test_macd_flat_is_zero() {
        let series = flat_series(40, 75.0, 1.0);
        let output = Macd::new().evaluate(&series).unwrap();
        assert_eq!(output.macd, 0.0);
        assert_eq!(output.signal, 0.0);
        assert_eq!(output.histogram, 0.0);
    }

    #[test]
    fn test_macd_histogram_identity() {
        let closes: Vec<f64> = (0..120)
            .map(|i| 100.0 + (i as f64 * 0.17).sin() * 8.0 + i as f64 * 0.05)
            .collect();
        let output = Macd::new().evaluate(&series_from_closes(&closes)).unwrap();
        assert_eq!(output.histogram, output.macd - output.signal);
    }

    #[test]
    fn test_macd_availability_boundary() {
        assert!(matches!(
            Macd::new().evaluate(&linear_series(34, 100.0, 1.0)),
            Err(IndicatorError::InsufficientHistory { required: 35, .. })
        ));
        assert!(Macd::new().evaluate(&linear_series(35, 100.0, 1.0)).is_ok());
    }

    #[test]
    fn test_macd_custom_periods() {
        let macd = Macd::with_periods(5, 10, 3);
        let series = linear_series(13, 100.0, 1.0);
        assert!(macd.evaluate(&series).is_ok());
    }
}

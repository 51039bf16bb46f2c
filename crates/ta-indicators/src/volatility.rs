//! Volatility indicators.

use serde::{Deserialize, Serialize};
use ta_core::error::IndicatorResult;
use ta_core::traits::SeriesIndicator;
use ta_core::types::{Field, Series};

use crate::{ensure_finite, insufficient, simd, smoothing};

/// Average True Range (ATR).
///
/// Measures market volatility by decomposing the entire range
/// of an asset price for that period.
#[derive(Debug, Clone)]
pub struct Atr {
    period: usize,
}

impl Atr {
    /// Create a new ATR indicator.
    ///
    /// Common period is 14.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }

    /// True range for every bar that has a previous close.
    ///
    /// Element 0 corresponds to bar index 1.
    pub fn true_ranges(series: &Series) -> Vec<f64> {
        series
            .bars()
            .windows(2)
            .map(|w| w[1].true_range(Some(w[0].close)))
            .collect()
    }
}

impl Default for Atr {
    fn default() -> Self {
        Self::new(14)
    }
}

impl SeriesIndicator for Atr {
    type Output = f64;

    fn name(&self) -> &'static str {
        "ATR"
    }

    fn required_fields(&self) -> &'static [Field] {
        &[Field::High, Field::Low, Field::Close]
    }

    fn min_bars(&self) -> usize {
        self.period + 1
    }

    fn compute(&self, series: &Series) -> IndicatorResult<f64> {
        let tr = Self::true_ranges(series);
        let atr = smoothing::wilder_last(&tr, self.period)
            .ok_or_else(|| insufficient(self.min_bars(), series.len()))?;
        ensure_finite(self.name(), atr)
    }
}

/// Bollinger Bands output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerOutput {
    /// Upper band
    pub upper: f64,
    /// Middle band (SMA)
    pub middle: f64,
    /// Lower band
    pub lower: f64,
}

impl BollingerOutput {
    /// Distance between the bands.
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Bollinger Bands.
///
/// Consists of a middle band (SMA) with upper and lower bands at a specified
/// number of population standard deviations of the trailing window.
#[derive(Debug, Clone)]
pub struct BollingerBands {
    period: usize,
    std_dev_multiplier: f64,
}

impl BollingerBands {
    /// Create new Bollinger Bands with default parameters (20, 2.0).
    pub fn new() -> Self {
        Self::with_params(20, 2.0)
    }

    /// Create Bollinger Bands with custom parameters.
    pub fn with_params(period: usize, std_dev_multiplier: f64) -> Self {
        assert!(period > 1, "Period must be greater than 1");
        assert!(
            std_dev_multiplier > 0.0,
            "Std dev multiplier must be positive"
        );
        Self {
            period,
            std_dev_multiplier,
        }
    }
}

impl Default for BollingerBands {
    fn default() -> Self {
        Self::new()
    }
}

impl SeriesIndicator for BollingerBands {
    type Output = BollingerOutput;

    fn name(&self) -> &'static str {
        "Bollinger"
    }

    fn required_fields(&self) -> &'static [Field] {
        &[Field::Close]
    }

    fn min_bars(&self) -> usize {
        self.period
    }

    fn compute(&self, series: &Series) -> IndicatorResult<BollingerOutput> {
        let closes = series.closes();
        let middle = smoothing::sma_last(&closes, self.period)
            .ok_or_else(|| insufficient(self.period, series.len()))?;
        let std_dev = simd::population_std_dev(&closes[closes.len() - self.period..])
            .ok_or_else(|| insufficient(self.period, series.len()))?;
        let offset = self.std_dev_multiplier * std_dev;

        Ok(BollingerOutput {
            upper: ensure_finite("BB_Upper", middle + offset)?,
            middle: ensure_finite("BB_Middle", middle)?,
            lower: ensure_finite("BB_Lower", middle - offset)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{flat_series, linear_series, series_from_closes};
    use chrono::{Days, NaiveDate};
    use ta_core::error::IndicatorError;
    use ta_core::types::{Bar, FieldSet};

    #[test]
    fn test_atr_flat_series_is_zero() {
        let series = flat_series(30, 100.0, 1000.0);
        assert_eq!(Atr::default().evaluate(&series), Ok(0.0));
    }

    #[test]
    fn test_atr_known_value() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let raw = [
            (10.0, 8.0, 9.0),
            (11.0, 9.0, 10.0),  // TR = 2
            (12.0, 10.0, 11.0), // TR = 2
            (11.0, 9.0, 10.0),  // TR = max(2, 0, 2) = 2
            (13.0, 11.0, 12.0), // TR = max(2, 3, 1) = 3
            (16.0, 15.0, 15.5), // TR = max(1, 4, 3) = 4
        ];
        let bars = raw
            .iter()
            .enumerate()
            .map(|(i, &(h, l, c))| Bar::new(start + Days::new(i as u64), c, h, l, c, 1.0))
            .collect();
        let series = Series::with_all_fields("TEST", bars).unwrap();

        // seed = (2 + 2 + 2) / 3 = 2; then (2*2 + 3)/3 = 7/3; then (14/3 + 4)/3 = 26/9
        let atr = Atr::new(3).evaluate(&series).unwrap();
        assert!((atr - 26.0 / 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_atr_needs_fifteen_bars() {
        assert!(matches!(
            Atr::default().evaluate(&flat_series(14, 1.0, 1.0)),
            Err(IndicatorError::InsufficientHistory { required: 15, available: 14 })
        ));
        assert!(Atr::default().evaluate(&flat_series(15, 1.0, 1.0)).is_ok());
    }

    #[test]
    fn test_atr_missing_high() {
        let full = flat_series(20, 10.0, 1.0);
        let fields = FieldSet::of(&[Field::Low, Field::Close, Field::Volume]);
        let series = Series::new("TEST", full.bars().to_vec(), fields).unwrap();

        assert_eq!(
            Atr::default().evaluate(&series),
            Err(IndicatorError::MissingField(Field::High))
        );
    }

    #[test]
    fn test_bollinger_band_ordering() {
        let closes: Vec<f64> = (0..30)
            .map(|i| 100.0 + (i as f64 * 0.1).sin() * 5.0)
            .collect();
        let output = BollingerBands::new()
            .evaluate(&series_from_closes(&closes))
            .unwrap();

        assert!(output.upper > output.middle);
        assert!(output.middle > output.lower);
        assert!((output.upper - output.middle - (output.middle - output.lower)).abs() < 1e-9);
    }

    #[test]
    fn test_bollinger_constant_price_collapses() {
        let output = BollingerBands::new()
            .evaluate(&flat_series(25, 100.0, 1.0))
            .unwrap();

        assert_eq!(output.upper, 100.0);
        assert_eq!(output.middle, 100.0);
        assert_eq!(output.lower, 100.0);
        assert_eq!(output.width(), 0.0);
    }

    #[test]
    fn test_decimal_flat_prices_are_exact() {
        for c in [0.1, 0.7, 2.7, 3.3, 99.99, 101.37, 1234.56, 1567.85] {
            let series = flat_series(40, c, 1.0);

            let bb = BollingerBands::new().evaluate(&series).unwrap();
            assert_eq!((bb.upper, bb.middle, bb.lower), (c, c, c), "bands at {c}");
            assert_eq!(Atr::default().evaluate(&series), Ok(0.0), "ATR at {c}");
        }
    }

    #[test]
    fn test_bollinger_collapses_on_flat_tail() {
        // noisy history, then 20 identical decimal closes
        let mut closes: Vec<f64> = (0..30).map(|i| 50.0 + (i as f64 * 0.37).sin()).collect();
        closes.extend([47.31; 20]);
        let bb = BollingerBands::new()
            .evaluate(&series_from_closes(&closes))
            .unwrap();

        assert_eq!((bb.upper, bb.middle, bb.lower), (47.31, 47.31, 47.31));
    }

    #[test]
    fn test_bollinger_ordering_on_decimal_prices() {
        let closes: Vec<f64> = (0..60).map(|i| 101.37 + (i % 7) as f64 * 0.13).collect();

        for n in 20..=closes.len() {
            let bb = BollingerBands::new()
                .evaluate(&series_from_closes(&closes[..n]))
                .unwrap();
            assert!(bb.upper > bb.middle && bb.middle > bb.lower, "bands at {n}");
        }
    }

    #[test]
    fn test_bollinger_uses_population_std_dev() {
        // last 20 closes are 1..=20: mean 10.5, population variance (20^2 - 1) / 12
        let series = linear_series(20, 1.0, 1.0);
        let output = BollingerBands::new().evaluate(&series).unwrap();
        let sigma = (399.0_f64 / 12.0).sqrt();

        assert!((output.middle - 10.5).abs() < 1e-12);
        assert!((output.upper - (10.5 + 2.0 * sigma)).abs() < 1e-9);
        assert!((output.lower - (10.5 - 2.0 * sigma)).abs() < 1e-9);
    }

    #[test]
    fn test_bollinger_insufficient_history() {
        assert!(matches!(
            BollingerBands::new().evaluate(&flat_series(19, 1.0, 1.0)),
            Err(IndicatorError::InsufficientHistory { required: 20, available: 19 })
        ));
    }
}

//! Moving average indicators.

use ta_core::error::IndicatorResult;
use ta_core::traits::SeriesIndicator;
use ta_core::types::{Field, Series};

use crate::{ensure_finite, insufficient, smoothing};

/// Simple Moving Average (SMA) of one column.
///
/// Calculates the arithmetic mean of the last N values of the close (SMA50)
/// or volume (Vol_Avg20) column.
#[derive(Debug, Clone)]
pub struct Sma {
    field: Field,
    period: usize,
    name: &'static str,
}

impl Sma {
    /// Create a new SMA of closing prices with the specified period.
    pub fn new(period: usize) -> Self {
        Self::on(Field::Close, period, "SMA")
    }

    /// Create an SMA over an arbitrary column.
    pub fn on(field: Field, period: usize, name: &'static str) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self {
            field,
            period,
            name,
        }
    }

    /// 50-day SMA of closing prices.
    pub fn sma50() -> Self {
        Self::on(Field::Close, 50, "SMA50")
    }

    /// 20-day average volume.
    pub fn volume_avg20() -> Self {
        Self::on(Field::Volume, 20, "Vol_Avg20")
    }
}

impl SeriesIndicator for Sma {
    type Output = f64;

    fn name(&self) -> &'static str {
        self.name
    }

    fn required_fields(&self) -> &'static [Field] {
        match self.field {
            Field::Open => &[Field::Open],
            Field::High => &[Field::High],
            Field::Low => &[Field::Low],
            Field::Close => &[Field::Close],
            Field::Volume => &[Field::Volume],
        }
    }

    fn min_bars(&self) -> usize {
        self.period
    }

    fn compute(&self, series: &Series) -> IndicatorResult<f64> {
        let values: Vec<f64> = series.iter().map(|b| b.get(self.field)).collect();
        let value = smoothing::sma_last(&values, self.period)
            .ok_or_else(|| insufficient(self.period, series.len()))?;
        ensure_finite(self.name, value)
    }
}

//! Indicator trait definitions.

use crate::error::{IndicatorError, IndicatorResult};
use crate::types::{Field, Series};
use crate::validation::validate_series;

/// Trait for technical indicators computed over a whole series.
///
/// Implementations are pure: they read the series and return the value for
/// the most recent bar. Callers go through [`SeriesIndicator::evaluate`],
/// which validates the series and enforces the minimum history before
/// [`SeriesIndicator::compute`] runs.
pub trait SeriesIndicator: Send + Sync {
    /// The output type of the indicator.
    type Output;

    /// Get the name of the indicator.
    fn name(&self) -> &'static str;

    /// Columns the indicator reads.
    fn required_fields(&self) -> &'static [Field];

    /// Get the minimum number of bars required.
    fn min_bars(&self) -> usize;

    /// Compute the latest value.
    ///
    /// May assume the series passed validation and has at least
    /// [`min_bars`](Self::min_bars) bars.
    fn compute(&self, series: &Series) -> IndicatorResult<Self::Output>;

    /// Validate that there's enough data.
    fn validate(&self, series: &Series) -> IndicatorResult<()> {
        validate_series(series, self.required_fields()).into_result()?;
        if series.len() < self.min_bars() {
            return Err(IndicatorError::InsufficientHistory {
                required: self.min_bars(),
                available: series.len(),
            });
        }
        Ok(())
    }

    /// Validate, then compute.
    fn evaluate(&self, series: &Series) -> IndicatorResult<Self::Output> {
        self.validate(series)?;
        self.compute(series)
    }
}

//! Smoothing primitives shared by the indicators.
//!
//! All three are causal: the value at index `i` depends only on inputs at
//! indices `<= i`. The recursive smoothers seed with the simple average of the
//! first `period` values and then fold forward.

use crate::simd;

/// Simple moving average as a lazy sequence aligned to the input.
///
/// The first `period - 1` items are `None`; no partial windows are averaged.
/// With `period == 0` every item is `None`.
#[derive(Debug, Clone)]
pub struct Sma<'a> {
    values: &'a [f64],
    period: usize,
    index: usize,
}

impl<'a> Iterator for Sma<'a> {
    type Item = Option<f64>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.values.len() {
            return None;
        }
        let i = self.index;
        self.index += 1;

        if self.period == 0 || i + 1 < self.period {
            return Some(None);
        }
        Some(simd::mean(&self.values[i + 1 - self.period..=i]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.values.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Sma<'_> {}

/// Simple moving average of `values` over `period`.
pub fn sma(values: &[f64], period: usize) -> Sma<'_> {
    Sma {
        values,
        period,
        index: 0,
    }
}

/// Last simple moving average value, `None` if fewer than `period` values.
pub fn sma_last(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    simd::mean(&values[values.len() - period..])
}

/// Wilder smoothing.
///
/// Seed is the mean of the first `period` values, then
/// `s[i] = (s[i-1] * (period - 1) + v) / period`.
///
/// The first element corresponds to input index `period - 1`. Returns an empty
/// vector when there are fewer than `period` values.
pub fn wilder(values: &[f64], period: usize) -> Vec<f64> {
    let period_f64 = period as f64;
    recursive(values, period, |prev, v| (prev * (period_f64 - 1.0) + v) / period_f64)
}

/// Terminal value of [`wilder`].
pub fn wilder_last(values: &[f64], period: usize) -> Option<f64> {
    let period_f64 = period as f64;
    recursive_last(values, period, |prev, v| {
        (prev * (period_f64 - 1.0) + v) / period_f64
    })
}

/// Exponential moving average.
///
/// Seed is the mean of the first `period` values; multiplier is
/// `2 / (period + 1)` and `e[i] = (v - e[i-1]) * multiplier + e[i-1]`.
///
/// The first element corresponds to input index `period - 1`.
pub fn ema(values: &[f64], period: usize) -> Vec<f64> {
    let multiplier = ema_multiplier(period);
    recursive(values, period, |prev, v| (v - prev) * multiplier + prev)
}

/// Terminal value of [`ema`].
pub fn ema_last(values: &[f64], period: usize) -> Option<f64> {
    let multiplier = ema_multiplier(period);
    recursive_last(values, period, |prev, v| (v - prev) * multiplier + prev)
}

#[inline]
fn ema_multiplier(period: usize) -> f64 {
    2.0 / (period as f64 + 1.0)
}

fn seed(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    simd::mean(&values[..period])
}

fn recursive(values: &[f64], period: usize, step: impl Fn(f64, f64) -> f64) -> Vec<f64> {
    let Some(initial) = seed(values, period) else {
        return vec![];
    };

    let mut result = Vec::with_capacity(values.len() - period + 1);
    result.push(initial);

    let mut current = initial;
    for &v in &values[period..] {
        current = step(current, v);
        result.push(current);
    }

    result
}

fn recursive_last(values: &[f64], period: usize, step: impl Fn(f64, f64) -> f64) -> Option<f64> {
    let initial = seed(values, period)?;
    Some(values[period..].iter().fold(initial, |prev, &v| step(prev, v)))
}

//! Series validation.
//!
//! Every indicator checks its input here before computing. The verdict is
//! all-or-nothing: either every required column is present and finite in every
//! bar, or the series is rejected for that indicator.

use crate::error::IndicatorError;
use crate::types::{Field, Series};

/// Why a series was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    EmptySeries,
    MissingField(Field),
}

/// Outcome of validating a series against a set of required fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Valid,
    Invalid(InvalidReason),
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid)
    }

    /// Convert into a result so callers can short-circuit with `?`.
    pub fn into_result(self) -> Result<(), IndicatorError> {
        match self {
            Verdict::Valid => Ok(()),
            Verdict::Invalid(reason) => Err(reason.into()),
        }
    }
}

impl From<InvalidReason> for IndicatorError {
    fn from(reason: InvalidReason) -> Self {
        match reason {
            InvalidReason::EmptySeries => IndicatorError::EmptySeries,
            InvalidReason::MissingField(field) => IndicatorError::MissingField(field),
        }
    }
}

/// Validate a series for the given required fields.
///
/// A field counts as missing when the source did not supply the column or
/// when any bar holds a non-finite value for it.
pub fn validate_series(series: &Series, required: &[Field]) -> Verdict {
    if series.is_empty() {
        return Verdict::Invalid(InvalidReason::EmptySeries);
    }

    let supplied = series.fields();
    for &field in required {
        if !supplied.contains(field) || series.iter().any(|bar| !bar.get(field).is_finite()) {
            return Verdict::Invalid(InvalidReason::MissingField(field));
        }
    }

    Verdict::Valid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Bar, FieldSet};
    use chrono::NaiveDate;

    fn bars(n: u32) -> Vec<Bar> {
        (1..=n)
            .map(|d| {
                let date = NaiveDate::from_ymd_opt(2024, 3, d).unwrap();
                Bar::new(date, 10.0, 11.0, 9.0, 10.5, 500.0)
            })
            .collect()
    }

    #[test]
    fn test_empty_series() {
        let series = Series::empty("TEST");
        assert_eq!(
            validate_series(&series, &[Field::Close]),
            Verdict::Invalid(InvalidReason::EmptySeries)
        );
        // Empty wins even when nothing is required
        assert!(!validate_series(&series, &[]).is_valid());
    }

    #[test]
    fn test_all_fields_present() {
        let series = Series::with_all_fields("TEST", bars(5)).unwrap();
        assert!(validate_series(&series, &[Field::High, Field::Low, Field::Close]).is_valid());
        assert!(validate_series(&series, &[Field::Volume]).is_valid());
    }

    #[test]
    fn test_missing_column() {
        let fields = FieldSet::of(&[Field::Open, Field::High, Field::Low, Field::Close]);
        let series = Series::new("TEST", bars(5), fields).unwrap();

        assert!(validate_series(&series, &[Field::Close]).is_valid());
        assert_eq!(
            validate_series(&series, &[Field::Close, Field::Volume]),
            Verdict::Invalid(InvalidReason::MissingField(Field::Volume))
        );
    }

    #[test]
    fn test_non_finite_value_rejects_field() {
        let mut data = bars(5);
        data[3].high = f64::NAN;
        let series = Series::with_all_fields("TEST", data).unwrap();

        assert!(validate_series(&series, &[Field::Close]).is_valid());
        let verdict = validate_series(&series, &[Field::High, Field::Low, Field::Close]);
        assert_eq!(verdict, Verdict::Invalid(InvalidReason::MissingField(Field::High)));
        assert_eq!(
            verdict.into_result(),
            Err(IndicatorError::MissingField(Field::High))
        );
    }
}

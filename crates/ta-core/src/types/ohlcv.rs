//! OHLCV (Open, High, Low, Close, Volume) data types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DataError;

/// One trading day of market data.
///
/// Uses f64 for fast indicator calculations. A column the data source did not
/// supply holds `NaN`; the owning [`Series`] records which columns are real.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Trading date
    pub date: NaiveDate,
    /// Opening price
    pub open: f64,
    /// Highest price
    pub high: f64,
    /// Lowest price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Trading volume
    pub volume: f64,
}

impl Bar {
    /// Create a new bar.
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Get the value of a single field.
    #[inline]
    pub fn get(&self, field: Field) -> f64 {
        match field {
            Field::Open => self.open,
            Field::High => self.high,
            Field::Low => self.low,
            Field::Close => self.close,
            Field::Volume => self.volume,
        }
    }

    /// Calculate the bar's range (high - low).
    #[inline]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Calculate the true range (used for ATR).
    pub fn true_range(&self, prev_close: Option<f64>) -> f64 {
        match prev_close {
            Some(pc) => {
                let hl = self.high - self.low;
                let hc = (self.high - pc).abs();
                let lc = (self.low - pc).abs();
                hl.max(hc).max(lc)
            }
            None => self.range(),
        }
    }
}

/// A column of a bar series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Field {
    Open,
    High,
    Low,
    Close,
    Volume,
}

impl Field {
    /// All fields in column order.
    pub const ALL: [Field; 5] = [
        Field::Open,
        Field::High,
        Field::Low,
        Field::Close,
        Field::Volume,
    ];

    /// Column name as it appears in data files and wire output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Open => "Open",
            Field::High => "High",
            Field::Low => "Low",
            Field::Close => "Close",
            Field::Volume => "Volume",
        }
    }

    #[inline]
    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of columns a data source actually supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldSet(u8);

impl FieldSet {
    /// No columns.
    pub const EMPTY: FieldSet = FieldSet(0);
    /// Every OHLCV column.
    pub const ALL: FieldSet = FieldSet(0b1_1111);

    /// Build a set from a list of fields.
    pub fn of(fields: &[Field]) -> Self {
        let mut set = Self::EMPTY;
        for &field in fields {
            set.insert(field);
        }
        set
    }

    pub fn insert(&mut self, field: Field) {
        self.0 |= field.bit();
    }

    pub fn remove(&mut self, field: Field) {
        self.0 &= !field.bit();
    }

    #[inline]
    pub fn contains(&self, field: Field) -> bool {
        self.0 & field.bit() != 0
    }

    /// Iterate the contained fields in column order.
    pub fn iter(&self) -> impl Iterator<Item = Field> + '_ {
        Field::ALL.into_iter().filter(move |f| self.contains(*f))
    }
}

/// Ordered daily history for one instrument.
///
/// Bars are strictly ascending by date. A series is read-only once built:
/// indicators only ever see `&Series`.
#[derive(Debug, Clone)]
pub struct Series {
    /// Symbol identifier
    symbol: String,
    /// Bars ordered oldest to newest
    bars: Vec<Bar>,
    /// Columns supplied by the source
    fields: FieldSet,
}

impl Series {
    /// Create a series, checking that dates are strictly increasing.
    pub fn new(
        symbol: impl Into<String>,
        bars: Vec<Bar>,
        fields: FieldSet,
    ) -> Result<Self, DataError> {
        if let Some(i) = bars.windows(2).position(|w| w[1].date <= w[0].date) {
            return Err(DataError::UnorderedDates {
                index: i + 1,
                date: bars[i + 1].date,
            });
        }
        Ok(Self {
            symbol: symbol.into(),
            bars,
            fields,
        })
    }

    /// Create a series with every OHLCV column present.
    pub fn with_all_fields(symbol: impl Into<String>, bars: Vec<Bar>) -> Result<Self, DataError> {
        Self::new(symbol, bars, FieldSet::ALL)
    }

    /// Create an empty series.
    pub fn empty(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            bars: Vec::new(),
            fields: FieldSet::EMPTY,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Columns supplied by the data source.
    pub fn fields(&self) -> FieldSet {
        self.fields
    }

    /// Get the number of bars.
    #[inline]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Check if the series is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Get all bars as a slice.
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Get the last bar.
    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    /// Get the second-to-last bar.
    pub fn previous(&self) -> Option<&Bar> {
        self.bars.len().checked_sub(2).map(|i| &self.bars[i])
    }

    /// Extract a column, or `None` if the source did not supply it.
    pub fn column(&self, field: Field) -> Option<Vec<f64>> {
        self.fields
            .contains(field)
            .then(|| self.bars.iter().map(|b| b.get(field)).collect())
    }

    /// Extract close prices as a vector.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Get an iterator over the bars.
    pub fn iter(&self) -> impl Iterator<Item = &Bar> {
        self.bars.iter()
    }
}

//! Date ranges for history requests.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Default lookback: one calendar year of daily bars.
pub const DEFAULT_LOOKBACK_DAYS: u64 = 365;

/// Half-open date range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookbackWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl LookbackWindow {
    /// The `days` calendar days before `end`, excluding `end` itself.
    pub fn trailing(end: NaiveDate, days: u64) -> Self {
        let start = end.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN);
        Self { start, end }
    }

    #[inline]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }
}

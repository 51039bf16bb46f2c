//! Data source trait definitions.

use async_trait::async_trait;

use crate::error::DataError;
use crate::types::{LookbackWindow, Series, Ticker};

/// Trait for historical daily data sources.
///
/// Fetching happens before the indicator engine runs; the engine itself never
/// performs I/O.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetch daily bars inside the lookback window.
    ///
    /// # Arguments
    /// * `ticker` - The instrument, without exchange suffix
    /// * `window` - Half-open date range `[start, end)`
    ///
    /// # Returns
    /// A series ordered from oldest to newest
    async fn get_daily_series(
        &self,
        ticker: &Ticker,
        window: LookbackWindow,
    ) -> Result<Series, DataError>;

    /// Get the data source name.
    fn name(&self) -> &str;
}

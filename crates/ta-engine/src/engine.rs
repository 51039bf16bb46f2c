//! Snapshot engine over a data source.

use chrono::NaiveDate;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use ta_core::error::{DataError, SnapshotResult};
use ta_core::traits::DataSource;
use ta_core::types::{LookbackWindow, Series, Ticker, DEFAULT_LOOKBACK_DAYS};
use tracing::{info, warn};

use crate::assembler::IndicatorSuite;
use crate::snapshot::Snapshot;

/// Engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Calendar days of history requested per ticker
    pub lookback_days: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            lookback_days: DEFAULT_LOOKBACK_DAYS,
        }
    }
}

/// Fetches a series per ticker and assembles its snapshot.
pub struct SnapshotEngine<S> {
    source: S,
    config: EngineConfig,
    suite: IndicatorSuite,
}

impl<S: DataSource> SnapshotEngine<S> {
    /// Create a new snapshot engine.
    pub fn new(source: S, config: EngineConfig) -> Self {
        Self {
            source,
            config,
            suite: IndicatorSuite::default(),
        }
    }

    /// Compute the snapshot for one ticker as of `as_of` (exclusive).
    ///
    /// A ticker the source has no data for yields a snapshot with every
    /// indicator unavailable. Other data errors are returned.
    pub async fn snapshot(&self, ticker: &str, as_of: NaiveDate) -> SnapshotResult<Snapshot> {
        let ticker = Ticker::parse(ticker)?;
        let window = LookbackWindow::trailing(as_of, self.config.lookback_days);

        let series = match self.source.get_daily_series(&ticker, window).await {
            Ok(series) => series,
            Err(e @ (DataError::SymbolNotFound(_) | DataError::NoDataAvailable)) => {
                warn!(%ticker, source = self.source.name(), error = %e, "No data for ticker");
                Series::empty(ticker.as_str())
            }
            Err(e) => return Err(e.into()),
        };

        let snapshot = self.suite.assemble(ticker, &series);
        info!(
            ticker = %snapshot.ticker,
            bars = series.len(),
            available = snapshot.indicators.available_count(),
            "Snapshot computed"
        );
        Ok(snapshot)
    }

    /// Compute snapshots for many tickers concurrently.
    ///
    /// Results come back in input order; one ticker failing does not affect
    /// the others.
    pub async fn snapshot_many(
        &self,
        tickers: &[String],
        as_of: NaiveDate,
    ) -> Vec<(String, SnapshotResult<Snapshot>)> {
        join_all(tickers.iter().map(|ticker| async move {
            (ticker.clone(), self.snapshot(ticker, as_of).await)
        }))
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Days;
    use std::collections::HashMap;
    use ta_core::error::SnapshotError;
    use ta_core::types::Bar;

    struct MemorySource {
        data: HashMap<String, Vec<Bar>>,
        broken: Option<String>,
    }

    #[async_trait]
    impl DataSource for MemorySource {
        async fn get_daily_series(
            &self,
            ticker: &Ticker,
            window: LookbackWindow,
        ) -> Result<Series, DataError> {
            if self.broken.as_deref() == Some(ticker.as_str()) {
                return Err(DataError::ParseError("bad row".to_string()));
            }
            let bars = self
                .data
                .get(ticker.as_str())
                .ok_or_else(|| DataError::SymbolNotFound(ticker.to_string()))?
                .iter()
                .filter(|b| window.contains(b.date))
                .copied()
                .collect();
            Ok(Series::with_all_fields(ticker.as_str(), bars)?)
        }

        fn name(&self) -> &str {
            "memory"
        }
    }

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn source() -> MemorySource {
        let bars: Vec<Bar> = (0..400)
            .map(|i| {
                let c = 100.0 + (i as f64 * 0.2).sin() * 4.0;
                Bar::new(start() + Days::new(i), c, c + 1.0, c - 1.0, c, 5000.0)
            })
            .collect();
        let mut data = HashMap::new();
        data.insert("RELIANCE".to_string(), bars);
        data.insert("TCS".to_string(), Vec::new());
        MemorySource {
            data,
            broken: Some("BROKEN".to_string()),
        }
    }

    #[tokio::test]
    async fn test_snapshot_uses_lookback_window() {
        let engine = SnapshotEngine::new(source(), EngineConfig { lookback_days: 30 });
        let as_of = start() + Days::new(200);
        let snapshot = engine.snapshot("RELIANCE", as_of).await.unwrap();

        // 30 bars: enough for RSI, ATR, Bollinger, volume average
        assert_eq!(snapshot.as_of, Some(as_of - Days::new(1)));
        assert!(snapshot.indicators.sma50.is_err());
        assert!(snapshot.indicators.rsi14.is_ok());
        assert_eq!(snapshot.indicators.vol_avg20, Ok(5000.0));
    }

    #[tokio::test]
    async fn test_unknown_ticker_degrades() {
        let engine = SnapshotEngine::new(source(), EngineConfig::default());
        let snapshot = engine.snapshot("UNKNOWN", start()).await.unwrap();

        assert_eq!(snapshot.indicators.available_count(), 0);
        assert!(snapshot.prev_ohlcv.is_none());
    }

    #[tokio::test]
    async fn test_malformed_ticker_is_fatal() {
        let engine = SnapshotEngine::new(source(), EngineConfig::default());
        let err = engine.snapshot("", start()).await.unwrap_err();
        assert!(matches!(err, SnapshotError::MalformedTicker(_)));
    }

    #[tokio::test]
    async fn test_snapshot_many_keeps_order_and_isolates_failures() {
        let engine = SnapshotEngine::new(source(), EngineConfig::default());
        let tickers = vec![
            "TCS".to_string(),
            "BROKEN".to_string(),
            "RELIANCE".to_string(),
            "bad ticker".to_string(),
        ];
        let results = engine.snapshot_many(&tickers, start() + Days::new(400)).await;

        let names: Vec<&str> = results.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(names, vec!["TCS", "BROKEN", "RELIANCE", "bad ticker"]);

        assert_eq!(results[0].1.as_ref().unwrap().indicators.available_count(), 0);
        assert!(matches!(results[1].1, Err(SnapshotError::Data(DataError::ParseError(_)))));
        assert_eq!(results[2].1.as_ref().unwrap().indicators.available_count(), 6);
        assert!(matches!(results[3].1, Err(SnapshotError::MalformedTicker(_))));
    }
}

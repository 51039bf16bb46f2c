//! Snapshot assembly.
//!
//! Each indicator is evaluated independently over the same read-only series.
//! An unavailable indicator never blocks the others.

use ta_core::error::SnapshotResult;
use ta_core::traits::SeriesIndicator;
use ta_core::types::{Series, Ticker};
use ta_indicators::{Atr, BollingerBands, Macd, Rsi, Sma};
use tracing::debug;

use crate::snapshot::{IndicatorSet, PrevOhlcv, Snapshot};

/// The fixed indicator set reported in every snapshot.
#[derive(Debug, Clone)]
pub struct IndicatorSuite {
    pub sma50: Sma,
    pub macd: Macd,
    pub rsi14: Rsi,
    pub atr: Atr,
    pub bollinger: BollingerBands,
    pub vol_avg20: Sma,
}

impl Default for IndicatorSuite {
    fn default() -> Self {
        Self {
            sma50: Sma::sma50(),
            macd: Macd::new(),
            rsi14: Rsi::new(14),
            atr: Atr::new(14),
            bollinger: BollingerBands::new(),
            vol_avg20: Sma::volume_avg20(),
        }
    }
}

impl IndicatorSuite {
    /// Evaluate every indicator against the series.
    pub fn compute(&self, series: &Series) -> IndicatorSet {
        let set = IndicatorSet {
            sma50: self.sma50.evaluate(series),
            macd: self.macd.evaluate(series),
            rsi14: self.rsi14.evaluate(series),
            atr: self.atr.evaluate(series),
            bollinger: self.bollinger.evaluate(series),
            vol_avg20: self.vol_avg20.evaluate(series),
        };

        for (name, reason) in set.unavailable() {
            debug!(symbol = series.symbol(), indicator = name, %reason, "Indicator unavailable");
        }

        set
    }

    /// Build the snapshot for a validated ticker.
    pub fn assemble(&self, ticker: Ticker, series: &Series) -> Snapshot {
        Snapshot {
            ticker,
            as_of: series.last().map(|b| b.date),
            indicators: self.compute(series),
            prev_ohlcv: series
                .previous()
                .map(|bar| PrevOhlcv::from_bar(bar, series.fields())),
        }
    }
}

/// Compute the indicator snapshot for `ticker` from its series.
///
/// Data-quality problems degrade to unavailable fields; only a malformed
/// ticker is an error.
pub fn get_technical_indicators(ticker: &str, series: &Series) -> SnapshotResult<Snapshot> {
    let ticker = Ticker::parse(ticker)?;
    Ok(IndicatorSuite::default().assemble(ticker, series))
}

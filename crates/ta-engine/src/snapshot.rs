//! Snapshot records and their wire format.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};
use ta_core::error::{IndicatorError, IndicatorResult};
use ta_core::types::{Bar, Field, FieldSet, Ticker};
use ta_indicators::{BollingerOutput, MacdOutput};

/// A computed indicator value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IndicatorValue {
    Scalar(f64),
    Macd(MacdOutput),
    Bollinger(BollingerOutput),
}

/// One result per indicator: a value, or the reason it is unavailable.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSet {
    pub sma50: IndicatorResult<f64>,
    pub macd: IndicatorResult<MacdOutput>,
    pub rsi14: IndicatorResult<f64>,
    pub atr: IndicatorResult<f64>,
    pub bollinger: IndicatorResult<BollingerOutput>,
    pub vol_avg20: IndicatorResult<f64>,
}

impl IndicatorSet {
    /// Every indicator by name, in report order.
    pub fn entries(&self) -> [(&'static str, Result<IndicatorValue, &IndicatorError>); 6] {
        [
            ("SMA50", self.sma50.as_ref().map(|v| IndicatorValue::Scalar(*v))),
            ("MACD", self.macd.as_ref().map(|v| IndicatorValue::Macd(*v))),
            ("RSI14", self.rsi14.as_ref().map(|v| IndicatorValue::Scalar(*v))),
            ("ATR", self.atr.as_ref().map(|v| IndicatorValue::Scalar(*v))),
            (
                "Bollinger",
                self.bollinger.as_ref().map(|v| IndicatorValue::Bollinger(*v)),
            ),
            ("Vol_Avg20", self.vol_avg20.as_ref().map(|v| IndicatorValue::Scalar(*v))),
        ]
    }

    /// Indicators that could not be computed, with their reasons.
    pub fn unavailable(&self) -> Vec<(&'static str, &IndicatorError)> {
        self.entries()
            .into_iter()
            .filter_map(|(name, result)| result.err().map(|e| (name, e)))
            .collect()
    }

    pub fn available_count(&self) -> usize {
        self.entries().iter().filter(|(_, r)| r.is_ok()).count()
    }
}

/// Raw fields of the bar before the latest one.
///
/// A column the source did not supply is `None` and serializes as null.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrevOhlcv {
    #[serde(rename = "Open")]
    pub open: Option<f64>,
    #[serde(rename = "High")]
    pub high: Option<f64>,
    #[serde(rename = "Low")]
    pub low: Option<f64>,
    #[serde(rename = "Close")]
    pub close: Option<f64>,
    #[serde(rename = "Volume")]
    pub volume: Option<f64>,
}

impl PrevOhlcv {
    pub fn from_bar(bar: &Bar, fields: FieldSet) -> Self {
        let pick = |field: Field| fields.contains(field).then(|| bar.get(field));
        Self {
            open: pick(Field::Open),
            high: pick(Field::High),
            low: pick(Field::Low),
            close: pick(Field::Close),
            volume: pick(Field::Volume),
        }
    }
}

/// Indicator snapshot for one ticker.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub ticker: Ticker,
    /// Date of the latest bar, `None` for an empty series
    pub as_of: Option<NaiveDate>,
    pub indicators: IndicatorSet,
    pub prev_ohlcv: Option<PrevOhlcv>,
}

/// Flat wire form of a [`Snapshot`].
///
/// Every key is always present; unavailable values are null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotRecord {
    #[serde(rename = "Ticker")]
    pub ticker: String,
    #[serde(rename = "SMA50")]
    pub sma50: Option<f64>,
    #[serde(rename = "MACD_Line")]
    pub macd_line: Option<f64>,
    #[serde(rename = "MACD_Signal")]
    pub macd_signal: Option<f64>,
    #[serde(rename = "MACD_Hist")]
    pub macd_hist: Option<f64>,
    #[serde(rename = "RSI14")]
    pub rsi14: Option<f64>,
    #[serde(rename = "ATR")]
    pub atr: Option<f64>,
    #[serde(rename = "BB_Upper")]
    pub bb_upper: Option<f64>,
    #[serde(rename = "BB_Middle")]
    pub bb_middle: Option<f64>,
    #[serde(rename = "BB_Lower")]
    pub bb_lower: Option<f64>,
    #[serde(rename = "Vol_Avg20")]
    pub vol_avg20: Option<f64>,
    #[serde(rename = "Prev_OHLCV")]
    pub prev_ohlcv: Option<PrevOhlcv>,
}

impl Snapshot {
    /// Flatten into the wire record.
    pub fn to_record(&self) -> SnapshotRecord {
        let ind = &self.indicators;
        let macd = ind.macd.as_ref().ok();
        let bb = ind.bollinger.as_ref().ok();

        SnapshotRecord {
            ticker: self.ticker.to_string(),
            sma50: ind.sma50.as_ref().ok().copied(),
            macd_line: macd.map(|m| m.macd),
            macd_signal: macd.map(|m| m.signal),
            macd_hist: macd.map(|m| m.histogram),
            rsi14: ind.rsi14.as_ref().ok().copied(),
            atr: ind.atr.as_ref().ok().copied(),
            bb_upper: bb.map(|b| b.upper),
            bb_middle: bb.map(|b| b.middle),
            bb_lower: bb.map(|b| b.lower),
            vol_avg20: ind.vol_avg20.as_ref().ok().copied(),
            prev_ohlcv: self.prev_ohlcv,
        }
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Generate a text summary.
    pub fn summary(&self) -> String {
        let mut s = String::new();

        s.push_str("═══════════════════════════════════════════════════════════\n");
        s.push_str(&format!("  {}", self.ticker));
        if let Some(date) = self.as_of {
            s.push_str(&format!("  (as of {date})"));
        }
        s.push('\n');
        s.push_str("═══════════════════════════════════════════════════════════\n");

        for (name, result) in self.indicators.entries() {
            let text = match result {
                Ok(IndicatorValue::Scalar(v)) => format!("{v:.4}"),
                Ok(IndicatorValue::Macd(m)) => format!(
                    "line {:.4}  signal {:.4}  hist {:.4}",
                    m.macd, m.signal, m.histogram
                ),
                Ok(IndicatorValue::Bollinger(b)) => format!(
                    "upper {:.4}  middle {:.4}  lower {:.4}",
                    b.upper, b.middle, b.lower
                ),
                Err(e) => format!("unavailable ({e})"),
            };
            s.push_str(&format!("  {name:<12} {text}\n"));
        }

        s.push_str("───────────────────────────────────────────────────────────\n");
        match &self.prev_ohlcv {
            Some(p) => {
                let fmt = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"));
                s.push_str(&format!(
                    "  Prev OHLCV   O {}  H {}  L {}  C {}  V {}\n",
                    fmt(p.open),
                    fmt(p.high),
                    fmt(p.low),
                    fmt(p.close),
                    fmt(p.volume)
                ));
            }
            None => s.push_str("  Prev OHLCV   unavailable\n"),
        }

        s
    }
}

impl Serialize for Snapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_record().serialize(serializer)
    }
}

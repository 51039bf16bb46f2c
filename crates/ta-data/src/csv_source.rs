//! CSV data source.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::io::{self, Read};
use std::path::PathBuf;
use ta_core::error::DataError;
use ta_core::traits::DataSource;
use ta_core::types::{Bar, Field, FieldSet, LookbackWindow, Series, Ticker};
use tracing::debug;

/// Suffix appended to tickers listed on the National Stock Exchange of India.
pub const NSE_SUFFIX: &str = ".NS";

/// CSV data source reading one file per ticker from a directory.
///
/// `<dir>/<TICKER><suffix>.csv` is tried first, then `<dir>/<TICKER>.csv`.
#[derive(Debug, Clone)]
pub struct CsvDataSource {
    dir: PathBuf,
    exchange_suffix: String,
}

impl CsvDataSource {
    /// Create a new CSV data source over an existing directory.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, DataError> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(DataError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("data directory {} does not exist", dir.display()),
            )));
        }
        Ok(Self {
            dir,
            exchange_suffix: NSE_SUFFIX.to_string(),
        })
    }

    /// Set the exchange suffix (empty for none).
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.exchange_suffix = suffix.into();
        self
    }

    /// Candidate file names for a ticker, most specific first.
    fn candidates(&self, ticker: &Ticker) -> Vec<PathBuf> {
        let mut names = Vec::with_capacity(4);
        if !self.exchange_suffix.is_empty() && !ticker.as_str().ends_with(&self.exchange_suffix) {
            names.push(format!("{}{}", ticker, self.exchange_suffix));
        }
        names.push(ticker.to_string());

        let mut paths = Vec::with_capacity(names.len() * 2);
        for name in names {
            paths.push(self.dir.join(format!("{name}.csv")));
            let lower = name.to_lowercase();
            if lower != name {
                paths.push(self.dir.join(format!("{lower}.csv")));
            }
        }
        paths
    }

    /// Resolve the file backing a ticker.
    pub fn resolve_path(&self, ticker: &Ticker) -> Option<PathBuf> {
        self.candidates(ticker).into_iter().find(|p| p.is_file())
    }
}

#[async_trait]
impl DataSource for CsvDataSource {
    async fn get_daily_series(
        &self,
        ticker: &Ticker,
        window: LookbackWindow,
    ) -> Result<Series, DataError> {
        let path = self
            .resolve_path(ticker)
            .ok_or_else(|| DataError::SymbolNotFound(ticker.to_string()))?;

        debug!(%ticker, path = %path.display(), "Loading CSV history");
        let bytes = tokio::fs::read(&path).await?;
        let (all_bars, columns) = read_bars(bytes.as_slice())?;

        let total = all_bars.len();
        let bars: Vec<Bar> = all_bars
            .into_iter()
            .filter(|b| window.contains(b.date))
            .collect();
        debug!(%ticker, total, in_window = bars.len(), "Applied lookback window");

        // Cells outside the window do not affect which columns are supplied
        build_series(ticker.as_str(), bars, columns)
    }

    fn name(&self) -> &str {
        "csv"
    }
}

/// Header positions of the recognized columns.
#[derive(Debug, Default)]
struct Columns {
    date: Option<usize>,
    open: Option<usize>,
    high: Option<usize>,
    low: Option<usize>,
    close: Option<usize>,
    adj_close: Option<usize>,
    volume: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Self {
        let mut cols = Columns::default();
        for (i, header) in headers.iter().enumerate() {
            let slot = match header.trim().to_lowercase().as_str() {
                "date" | "datetime" | "timestamp" => &mut cols.date,
                "open" => &mut cols.open,
                "high" => &mut cols.high,
                "low" => &mut cols.low,
                "close" => &mut cols.close,
                "adj close" | "adj_close" => &mut cols.adj_close,
                "volume" => &mut cols.volume,
                _ => continue,
            };
            slot.get_or_insert(i);
        }
        cols
    }

    fn index(&self, field: Field) -> Option<usize> {
        match field {
            Field::Open => self.open,
            Field::High => self.high,
            Field::Low => self.low,
            Field::Close => self.close.or(self.adj_close),
            Field::Volume => self.volume,
        }
    }
}

/// Parse a daily OHLCV CSV into a series.
///
/// Columns are matched by header name, case-insensitively. A column that is
/// absent, or has any blank or non-numeric cell, is left out of the series'
/// field set. Rows are sorted by date; duplicate dates are rejected.
pub fn parse_series<R: Read>(reader: R, symbol: &str) -> Result<Series, DataError> {
    let (bars, columns) = read_bars(reader)?;
    build_series(symbol, bars, columns)
}

/// Read every row, sorted by date.
///
/// Returns the bars and the columns named in the header. A blank or
/// non-numeric cell is stored as NaN.
fn read_bars<R: Read>(reader: R) -> Result<(Vec<Bar>, FieldSet), DataError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| DataError::ParseError(e.to_string()))?
        .clone();
    let columns = Columns::from_headers(&headers);
    let date_col = columns
        .date
        .ok_or_else(|| DataError::ParseError("missing Date column".to_string()))?;

    let mut present = FieldSet::EMPTY;
    for field in Field::ALL {
        if columns.index(field).is_some() {
            present.insert(field);
        }
    }

    let mut bars = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| DataError::ParseError(e.to_string()))?;
        let date = parse_date(record.get(date_col).unwrap_or_default())?;

        let value = |field: Field| -> f64 {
            columns
                .index(field)
                .and_then(|i| record.get(i))
                .and_then(|cell| cell.parse::<f64>().ok())
                .unwrap_or(f64::NAN)
        };

        bars.push(Bar::new(
            date,
            value(Field::Open),
            value(Field::High),
            value(Field::Low),
            value(Field::Close),
            value(Field::Volume),
        ));
    }

    // Sort by date
    bars.sort_by_key(|b| b.date);
    if let Some(dup) = bars.windows(2).find(|w| w[0].date == w[1].date) {
        return Err(DataError::ParseError(format!(
            "duplicate date {}",
            dup[0].date
        )));
    }

    Ok((bars, present))
}

/// Build a series, keeping only the columns that are finite in every bar.
fn build_series(symbol: &str, bars: Vec<Bar>, columns: FieldSet) -> Result<Series, DataError> {
    let mut fields = columns;
    for field in columns.iter() {
        if bars.iter().any(|b| !b.get(field).is_finite()) {
            fields.remove(field);
        }
    }
    Series::new(symbol, bars, fields)
}

/// Parse various date formats.
fn parse_date(date_str: &str) -> Result<NaiveDate, DataError> {
    const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"];
    const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

    for format in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(date_str, format) {
            return Ok(d);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, format) {
            return Ok(dt.date());
        }
    }
    // Exchange-local timestamps such as "2024-01-02 00:00:00+05:30"
    if let Ok(dt) = DateTime::parse_from_str(date_str, "%Y-%m-%d %H:%M:%S%:z") {
        return Ok(dt.date_naive());
    }

    // Try parsing as Unix timestamp
    if let Ok(ts) = date_str.parse::<i64>() {
        // Assume milliseconds if > 10 digits
        let dt = if ts > 10_000_000_000 {
            DateTime::from_timestamp_millis(ts)
        } else {
            DateTime::from_timestamp(ts, 0)
        };
        if let Some(dt) = dt {
            return Ok(dt.date_naive());
        }
    }

    Err(DataError::ParseError(format!(
        "Could not parse date: {}",
        date_str
    )))
}

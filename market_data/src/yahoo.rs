//! Yahoo Finance daily history download
//!
//! Uses the v8 chart endpoint, which returns both the OHLCV rows and the
//! ticker metadata used for the overview table.
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use market_data::yahoo::YahooClient;
//!
//! let client = YahooClient::with_defaults()?;
//! let history = client.fetch_history(
//!     "AAPL",
//!     NaiveDate::from_ymd_opt(2019, 11, 23).unwrap(),
//!     NaiveDate::from_ymd_opt(2020, 11, 23).unwrap(),
//! )?;
//! println!("{} trading days of {}", history.series.len(), history.info.company_name());
//! # Ok::<(), market_data::DataError>(())
//! ```

use crate::error::{DataError, Result};
use crate::series::{PriceBar, PriceSeries};
use crate::ticker::TickerInfo;
use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

/// Default chart endpoint
pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
/// Default user agent; the endpoint rejects requests without a browser-like one
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Error code the endpoint uses for symbols it does not know
const NOT_FOUND_CODE: &str = "Not Found";

/// Price history and metadata of one ticker
#[derive(Debug, Clone)]
pub struct PriceHistory {
    /// Ticker metadata
    pub info: TickerInfo,
    /// Daily bars in the requested range
    pub series: PriceSeries,
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    symbol: Option<String>,
    currency: Option<String>,
    short_name: Option<String>,
    long_name: Option<String>,
    regular_market_price: Option<f64>,
    fifty_two_week_high: Option<f64>,
    fifty_two_week_low: Option<f64>,
    previous_close: Option<f64>,
    chart_previous_close: Option<f64>,
    /// Exchange offset from UTC in seconds
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteColumns>,
    #[serde(default)]
    adjclose: Vec<AdjCloseColumn>,
}

#[derive(Debug, Default, Deserialize)]
struct AdjCloseColumn {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteColumns {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<u64>>,
}

/// Blocking Yahoo Finance client
#[derive(Debug, Clone)]
pub struct YahooClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl YahooClient {
    /// Create a client for `base_url`
    pub fn new(base_url: impl Into<String>, user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Create a client with the default endpoint, user agent and timeout
    pub fn with_defaults() -> Result<Self> {
        Self::new(DEFAULT_BASE_URL, DEFAULT_USER_AGENT, DEFAULT_TIMEOUT)
    }

    /// Get the endpoint this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Download daily bars for `ticker` dated in `start..end` (end exclusive)
    pub fn fetch_history(&self, ticker: &str, start: NaiveDate, end: NaiveDate) -> Result<PriceHistory> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), ticker);
        let period1 = midnight_timestamp(start);
        let period2 = midnight_timestamp(end);

        info!(ticker, %start, %end, "requesting daily history");
        let body = self
            .client
            .get(&url)
            .query(&[
                ("period1", period1.to_string()),
                ("period2", period2.to_string()),
                ("interval", "1d".to_string()),
                ("events", "history".to_string()),
            ])
            .send()?
            .text()?;

        let history = parse_chart_response(&body, ticker)?;
        info!(
            ticker,
            rows = history.series.len(),
            company = history.info.company_name(),
            "received daily history"
        );
        Ok(history)
    }
}

/// Unix timestamp of midnight UTC on `date`
fn midnight_timestamp(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or_default()
}

/// Parse a chart endpoint response body.
///
/// Prices are adjusted for splits and dividends: the close is the adjusted
/// close and open, high and low are scaled by the same factor. Rows with a
/// missing close (halted days, partial data) are dropped. Bars are dated in
/// the exchange's time zone.
pub fn parse_chart_response(body: &str, ticker: &str) -> Result<PriceHistory> {
    let response: ChartResponse = serde_json::from_str(body)?;

    if let Some(error) = response.chart.error {
        if error.code == NOT_FOUND_CODE {
            return Err(DataError::UnknownTicker(ticker.to_string()));
        }
        return Err(DataError::Api {
            code: error.code,
            description: error.description,
        });
    }

    let data = response
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or(DataError::NoData)?;

    let quotes = data.indicators.quote.into_iter().next().unwrap_or_default();
    let adjusted = data
        .indicators
        .adjclose
        .into_iter()
        .next()
        .unwrap_or_default()
        .adjclose;
    let offset = data.meta.gmtoffset;

    let mut bars = Vec::with_capacity(data.timestamp.len());
    for (i, &timestamp) in data.timestamp.iter().enumerate() {
        let Some(raw_close) = quotes.close.get(i).copied().flatten() else {
            debug!(ticker, timestamp, "dropping row without close");
            continue;
        };
        let close = adjusted.get(i).copied().flatten().unwrap_or(raw_close);
        let factor = if raw_close == 0.0 { 1.0 } else { close / raw_close };
        let scaled = |column: &[Option<f64>]| column.get(i).copied().flatten().map(|p| p * factor);

        let date = DateTime::from_timestamp(timestamp + offset, 0)
            .ok_or_else(|| DataError::Parse(format!("invalid timestamp {}", timestamp)))?
            .date_naive();

        bars.push(PriceBar {
            date,
            open: scaled(&quotes.open),
            high: scaled(&quotes.high),
            low: scaled(&quotes.low),
            close,
            volume: quotes.volume.get(i).copied().flatten(),
        });
    }

    let meta = data.meta;
    let info = TickerInfo {
        symbol: meta.symbol.unwrap_or_else(|| ticker.to_uppercase()),
        short_name: meta.short_name.or(meta.long_name),
        currency: meta.currency,
        fifty_two_week_low: meta.fifty_two_week_low,
        fifty_two_week_high: meta.fifty_two_week_high,
        previous_close: meta.previous_close.or(meta.chart_previous_close),
        regular_market_price: meta.regular_market_price,
    };

    Ok(PriceHistory {
        info,
        series: PriceSeries::new(bars),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midnight_timestamp() {
        let date = NaiveDate::from_ymd_opt(2020, 11, 23).unwrap();
        assert_eq!(midnight_timestamp(date), 1_606_089_600);
    }

    #[test]
    fn test_client_keeps_base_url() {
        let client = YahooClient::new("http://localhost:9/chart", "test", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(client.base_url(), "http://localhost:9/chart");
    }
}

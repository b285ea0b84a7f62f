//! Market data loading.
//!
//! The pipeline only needs the data contract: an ordered series of bars
//! for a (symbol, interval, period) triple, with incomplete rows
//! dropped. [`YahooChartClient`] implements it against the Yahoo
//! Finance chart API; anything else can plug in via [`SeriesProvider`].

use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::Bar;

const YAHOO_CHART_ENDPOINT: &str = "https://query2.finance.yahoo.com/v8/finance/chart/";
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

/// Bar interval supported by the dashboard timeframes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    M5,
    M15,
    H1,
    D1,
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Interval::M5 => "5m",
            Interval::M15 => "15m",
            Interval::H1 => "1h",
            Interval::D1 => "1d",
        };
        write!(f, "{s}")
    }
}

/// Errors from the series loader. A failed fetch halts only the single
/// evaluation it was feeding.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider rejected the request: {0}")]
    Upstream(String),

    #[error("malformed payload: {0}")]
    Malformed(&'static str),
}

/// Source of OHLC series.
///
/// An empty result is valid and means "insufficient data" downstream,
/// not an error.
pub trait SeriesProvider {
    fn fetch(
        &self,
        symbol: &str,
        interval: Interval,
        period: &str,
    ) -> Result<Vec<Bar>, ProviderError>;
}

/// Synchronous Yahoo Finance chart-API client.
#[derive(Debug, Clone)]
pub struct YahooChartClient {
    http: reqwest::blocking::Client,
}

impl YahooChartClient {
    pub fn new() -> Result<Self, ProviderError> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { http })
    }
}

impl SeriesProvider for YahooChartClient {
    fn fetch(
        &self,
        symbol: &str,
        interval: Interval,
        period: &str,
    ) -> Result<Vec<Bar>, ProviderError> {
        let url = format!("{YAHOO_CHART_ENDPOINT}{symbol}?interval={interval}&range={period}");
        let payload: serde_json::Value = self
            .http
            .get(&url)
            .send()?
            .error_for_status()?
            .json()?;
        let bars = parse_chart_payload(&payload)?;
        tracing::debug!(symbol, %interval, period, rows = bars.len(), "fetched series");
        Ok(bars)
    }
}

/// Decode a chart-API payload into bars, dropping every row with a
/// missing timestamp or OHLC field.
pub fn parse_chart_payload(payload: &serde_json::Value) -> Result<Vec<Bar>, ProviderError> {
    let chart = &payload["chart"];
    if !chart["error"].is_null() {
        return Err(ProviderError::Upstream(chart["error"].to_string()));
    }

    let result = &chart["result"][0];
    if result.is_null() {
        // A recognised symbol with no rows in range comes back as an
        // empty result set; treat it as an empty series.
        return Ok(Vec::new());
    }

    let timestamps = result["timestamp"]
        .as_array()
        .ok_or(ProviderError::Malformed("missing timestamp column"))?;
    let quote = &result["indicators"]["quote"][0];
    if !quote.is_object() {
        return Err(ProviderError::Malformed("missing quote columns"));
    }

    let mut bars = Vec::with_capacity(timestamps.len());
    let mut dropped = 0usize;
    for (i, ts) in timestamps.iter().enumerate() {
        let row = (|| {
            let ts = DateTime::from_timestamp(ts.as_i64()?, 0)?;
            let open = quote["open"][i].as_f64()?;
            let high = quote["high"][i].as_f64()?;
            let low = quote["low"][i].as_f64()?;
            let close = quote["close"][i].as_f64()?;
            Some(Bar::new(ts, open, high, low, close))
        })();
        match row {
            Some(bar) => bars.push(bar),
            None => dropped += 1,
        }
    }
    if dropped > 0 {
        tracing::debug!(dropped, "dropped incomplete rows");
    }
    Ok(bars)
}

use chrono::DateTime;
use prediction_core::Bar;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

const BASE_URL: &str = "https://query1.finance.yahoo.com";
const RANGE: &str = "6mo";
const INTERVAL: &str = "1d";

#[derive(Error, Debug)]
pub enum YahooError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Chart error {code}: {description}")]
    Chart { code: String, description: String },

    #[error("Empty chart response")]
    EmptyResponse,
}

/// Client for the Yahoo Finance v8 chart API.
#[derive(Clone)]
pub struct YahooClient {
    client: Client,
    base_url: String,
}

impl YahooClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point the client at a different host (used by tests and local stubs).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetch six months of daily bars for a ticker, oldest first.
    ///
    /// Rows where any of open/high/low/close is null are skipped; an empty
    /// bar list is a valid result and is not an error here.
    pub async fn daily_history(&self, ticker: &str) -> Result<Vec<Bar>, YahooError> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, ticker);

        let response = self
            .client
            .get(&url)
            .query(&[("range", RANGE), ("interval", INTERVAL)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(YahooError::Status {
                status: response.status().as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let envelope: ChartEnvelope = response.json().await?;
        let chart = envelope.chart.ok_or(YahooError::EmptyResponse)?;

        if let Some(err) = chart.error {
            return Err(YahooError::Chart {
                code: err.code,
                description: err.description,
            });
        }

        let result = chart
            .result
            .and_then(|r| r.into_iter().next())
            .ok_or(YahooError::EmptyResponse)?;

        let timestamps = result.timestamp.unwrap_or_default();
        let quote = result.indicators.quote.into_iter().next().unwrap_or_default();

        let mut bars = Vec::with_capacity(timestamps.len());
        for (i, ts) in timestamps.iter().enumerate() {
            let (Some(open), Some(high), Some(low), Some(close)) = (
                value_at(&quote.open, i),
                value_at(&quote.high, i),
                value_at(&quote.low, i),
                value_at(&quote.close, i),
            ) else {
                continue;
            };
            let Some(date) = DateTime::from_timestamp(*ts, 0) else {
                continue;
            };

            bars.push(Bar {
                date,
                open,
                high,
                low,
                close,
                volume: value_at(&quote.volume, i),
            });
        }

        tracing::debug!("Chart for {}: {} usable bars", ticker, bars.len());
        Ok(bars)
    }
}

impl Default for YahooClient {
    fn default() -> Self {
        Self::new()
    }
}

fn value_at<T: Copy>(column: &[Option<T>], i: usize) -> Option<T> {
    column.get(i).copied().flatten()
}

// Chart envelope structures
#[derive(Deserialize)]
struct ChartEnvelope {
    chart: Option<ChartNode>,
}

#[derive(Deserialize)]
struct ChartNode {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartErrorNode>,
}

#[derive(Deserialize)]
struct ChartErrorNode {
    code: String,
    description: String,
}

#[derive(Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Option<Vec<i64>>,
    #[serde(default)]
    indicators: Indicators,
}

#[derive(Deserialize, Default)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteBlock>,
}

#[derive(Deserialize, Default)]
struct QuoteBlock {
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

use crate::domain::entities::headline::Headline;
use crate::domain::entities::price_bar::PriceBar;
use crate::domain::error::DomainError;
use crate::domain::ports::market_data::MarketDataProvider;
use crate::infrastructure::retry::{retry, RetryPolicy};
use async_trait::async_trait;
use chrono::DateTime;
use tracing::{debug, warn};

const CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
const SEARCH_URL: &str = "https://query1.finance.yahoo.com/v1/finance/search";

/// Yahoo Finance market data using the v8 chart and v1 search APIs (no auth required).
pub struct YahooMarketData {
    client: reqwest::Client,
    policy: RetryPolicy,
}

impl YahooMarketData {
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(
                    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
                     AppleWebKit/537.36 (KHTML, like Gecko) \
                     Chrome/120.0.0.0 Safari/537.36",
                )
                .timeout(policy.timeout)
                .build()
                .unwrap_or_default(),
            policy,
        }
    }
}

#[derive(Debug, serde::Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, serde::Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<serde_json::Value>,
}

#[derive(Debug, serde::Deserialize)]
struct ChartData {
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    #[serde(default)]
    indicators: Option<Indicators>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    symbol: String,
    #[serde(default)]
    regular_market_price: Option<f64>,
}

#[derive(Debug, serde::Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<Quote>,
}

#[derive(Debug, serde::Deserialize)]
struct Quote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[derive(Debug, serde::Deserialize)]
struct SearchResponse {
    #[serde(default)]
    news: Vec<NewsItem>,
}

#[derive(Debug, serde::Deserialize)]
struct NewsItem {
    #[serde(default)]
    title: Option<String>,
}

fn chart_data(resp: ChartResponse, symbol: &str) -> Result<ChartData, DomainError> {
    if let Some(err) = resp.chart.error {
        return Err(DomainError::DataFetch(format!("Yahoo error for {symbol}: {err}")));
    }
    resp.chart
        .result
        .and_then(|r| r.into_iter().next())
        .ok_or_else(|| DomainError::Parse(format!("No chart results for {symbol}")))
}

/// Daily bars with a close, oldest first. Null closes (halted or partial days) are dropped.
fn bars_from_chart(data: &ChartData) -> Vec<PriceBar> {
    let closes = data
        .indicators
        .as_ref()
        .and_then(|i| i.quote.first())
        .map(|q| q.close.as_slice())
        .unwrap_or_default();

    data.timestamp
        .iter()
        .zip(closes)
        .filter_map(|(ts, close)| {
            let close = (*close)?;
            let date = DateTime::from_timestamp(*ts, 0)?.date_naive();
            Some(PriceBar { date, close })
        })
        .collect()
}

/// Last close in the series, else the meta market price.
fn latest_close_from_chart(data: &ChartData) -> Option<f64> {
    bars_from_chart(data)
        .last()
        .map(|b| b.close)
        .or(data.meta.regular_market_price)
}

/// Titles in feed order. Items without a usable title are skipped.
fn headlines_from_search(resp: SearchResponse, limit: usize) -> Vec<Headline> {
    resp.news
        .into_iter()
        .filter_map(|item| match item.title {
            Some(title) if !title.trim().is_empty() => Some(Headline::new(title)),
            _ => {
                warn!("Skipping news item without a title");
                None
            }
        })
        .take(limit)
        .collect()
}

fn history_range(lookback: usize) -> &'static str {
    // ~252 trading days per year
    match lookback {
        0..=20 => "1mo",
        21..=120 => "6mo",
        121..=250 => "1y",
        _ => "2y",
    }
}

impl YahooMarketData {
    async fn fetch_chart(&self, symbol: &str, range: &str) -> Result<ChartData, DomainError> {
        let url = format!("{CHART_URL}/{}", symbol.replace('^', "%5E"));

        let resp = self
            .client
            .get(&url)
            .query(&[("range", range), ("interval", "1d")])
            .send()
            .await
            .map_err(|e| DomainError::DataFetch(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(DomainError::DataFetch(format!(
                "Yahoo API returned {} for {symbol}",
                resp.status()
            )));
        }

        let data: ChartResponse = resp
            .json()
            .await
            .map_err(|e| DomainError::Parse(e.to_string()))?;

        chart_data(data, symbol)
    }

    async fn fetch_news(&self, symbol: &str, limit: usize) -> Result<SearchResponse, DomainError> {
        let count = limit.to_string();
        let resp = self
            .client
            .get(SEARCH_URL)
            .query(&[("q", symbol), ("quotesCount", "0"), ("newsCount", count.as_str())])
            .send()
            .await
            .map_err(|e| DomainError::DataFetch(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(DomainError::DataFetch(format!(
                "Yahoo search returned {} for {symbol}",
                resp.status()
            )));
        }

        resp.json()
            .await
            .map_err(|e| DomainError::Parse(e.to_string()))
    }
}

#[async_trait]
impl MarketDataProvider for YahooMarketData {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    async fn latest_close(&self, symbol: &str) -> Result<f64, DomainError> {
        let data = retry(&self.policy, symbol, || self.fetch_chart(symbol, "5d")).await?;
        let close = latest_close_from_chart(&data)
            .ok_or_else(|| DomainError::Parse(format!("No price for {}", data.meta.symbol)))?;
        debug!(symbol, close, "Fetched latest close");
        Ok(close)
    }

    async fn history(&self, symbol: &str, lookback: usize) -> Result<Vec<PriceBar>, DomainError> {
        let range = history_range(lookback);
        let data = retry(&self.policy, symbol, || self.fetch_chart(symbol, range)).await?;
        let bars = bars_from_chart(&data);
        let skip = bars.len().saturating_sub(lookback);
        Ok(bars.into_iter().skip(skip).collect())
    }

    async fn recent_headlines(
        &self,
        symbol: &str,
        limit: usize,
    ) -> Result<Vec<Headline>, DomainError> {
        let resp = retry(&self.policy, "news", || self.fetch_news(symbol, limit)).await?;
        Ok(headlines_from_search(resp, limit))
    }
}

//! Shared test helpers: in-memory fakes for both ports.

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use sentinel::domain::entities::headline::Headline;
use sentinel::domain::entities::price_bar::PriceBar;
use sentinel::domain::error::DomainError;
use sentinel::domain::ports::market_data::MarketDataProvider;
use sentinel::domain::ports::notifier::Notifier;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
pub struct FakeMarketData {
    pub closes: HashMap<String, f64>,
    pub history: HashMap<String, Vec<PriceBar>>,
    pub headlines: Vec<Headline>,
    pub fail_headlines: bool,
    pub requested: Mutex<Vec<String>>,
}

impl FakeMarketData {
    /// Index and volatility available, no headlines.
    pub fn calm(index: f64, vol: f64) -> Self {
        let mut fake = Self::default();
        fake.closes.insert("^GSPC".into(), index);
        fake.closes.insert("^VIX".into(), vol);
        fake
    }

    pub fn with_headlines(mut self, titles: &[&str]) -> Self {
        self.headlines = titles.iter().map(|t| Headline::new(*t)).collect();
        self
    }

    pub fn with_flat_history(mut self, symbol: &str, close: f64, days: usize) -> Self {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let bars = (0..days)
            .map(|i| PriceBar {
                date: start + Duration::days(i as i64),
                close,
            })
            .collect();
        self.history.insert(symbol.into(), bars);
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl MarketDataProvider for FakeMarketData {
    fn name(&self) -> &str {
        "fake"
    }

    async fn latest_close(&self, symbol: &str) -> Result<f64, DomainError> {
        self.requested.lock().unwrap().push(symbol.to_string());
        self.closes
            .get(symbol)
            .copied()
            .ok_or_else(|| DomainError::DataFetch(format!("no data for {symbol}")))
    }

    async fn history(&self, symbol: &str, lookback: usize) -> Result<Vec<PriceBar>, DomainError> {
        let bars = self
            .history
            .get(symbol)
            .ok_or_else(|| DomainError::DataFetch(format!("no history for {symbol}")))?;
        let skip = bars.len().saturating_sub(lookback);
        Ok(bars[skip..].to_vec())
    }

    async fn recent_headlines(
        &self,
        _symbol: &str,
        limit: usize,
    ) -> Result<Vec<Headline>, DomainError> {
        if self.fail_headlines {
            return Err(DomainError::DataFetch("news unavailable".into()));
        }
        Ok(self.headlines.iter().take(limit).cloned().collect())
    }
}

pub struct RecordingNotifier {
    pub configured: bool,
    pub fail: bool,
    pub sent: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn configured() -> Self {
        Self {
            configured: true,
            fail: false,
            sent: Mutex::new(vec![]),
        }
    }

    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::configured()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::configured()
        }
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    fn name(&self) -> &str {
        "recording"
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn send(&self, text: &str) -> Result<(), DomainError> {
        if self.fail {
            return Err(DomainError::Notification("chat unreachable".into()));
        }
        self.sent.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

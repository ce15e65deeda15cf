use crate::domain::entities::headline::Headline;
use crate::domain::entities::price_bar::PriceBar;
use crate::domain::error::DomainError;
use async_trait::async_trait;

/// Read-only source of prices and headlines.
/// Implementations can wrap Yahoo Finance, a broker API, or a fixture.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Name of this provider for logging (e.g., "yahoo_finance")
    fn name(&self) -> &str;

    /// Most recent daily close for `symbol`.
    async fn latest_close(&self, symbol: &str) -> Result<f64, DomainError>;

    /// Up to `lookback` daily closes, oldest first.
    async fn history(&self, symbol: &str, lookback: usize) -> Result<Vec<PriceBar>, DomainError>;

    /// Up to `limit` recent headlines, newest first.
    async fn recent_headlines(&self, symbol: &str, limit: usize)
        -> Result<Vec<Headline>, DomainError>;
}

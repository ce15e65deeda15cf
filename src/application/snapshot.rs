use crate::domain::entities::market_snapshot::{MarketSnapshot, SnapshotSource};
use crate::domain::entities::price_bar::moving_average;
use crate::domain::error::DomainError;
use crate::domain::ports::market_data::MarketDataProvider;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

pub const TREND_PERIOD: usize = 200;

/// Symbols and fallback constants for one market.
#[derive(Debug, Clone, Serialize)]
pub struct MarketSymbols {
    pub index: String,
    pub volatility: String,
    /// ETF used when the index itself cannot be fetched.
    pub proxy: String,
    /// Proxy price × multiplier ≈ index price.
    pub proxy_multiplier: f64,
    /// Volatility assumed when running on proxy data.
    pub fallback_volatility: f64,
    /// Instrument whose news feed is scanned.
    pub headlines: String,
}

impl Default for MarketSymbols {
    fn default() -> Self {
        Self {
            index: "^GSPC".into(),
            volatility: "^VIX".into(),
            proxy: "SPY".into(),
            proxy_multiplier: 10.0,
            fallback_volatility: 15.0,
            headlines: "SPY".into(),
        }
    }
}

pub struct SnapshotUseCase {
    provider: Arc<dyn MarketDataProvider>,
    symbols: MarketSymbols,
}

impl SnapshotUseCase {
    pub fn new(provider: Arc<dyn MarketDataProvider>, symbols: MarketSymbols) -> Self {
        Self { provider, symbols }
    }

    /// Fetch price and volatility, falling back to the proxy on failure.
    /// Adds the 200-day average when `with_trend` is set.
    pub async fn execute(
        &self,
        as_of: DateTime<Utc>,
        with_trend: bool,
    ) -> Result<MarketSnapshot, DomainError> {
        let (index_price, volatility, source) = match self.fetch_primary().await {
            Ok((price, vol)) => (price, vol, SnapshotSource::Primary),
            Err(e) => {
                warn!(
                    error = %e,
                    proxy = %self.symbols.proxy,
                    "Index data failed, switching to proxy fallback"
                );
                let proxy = self.provider.latest_close(&self.symbols.proxy).await.map_err(|e| {
                    DomainError::DataFetch(format!(
                        "Primary and fallback fetch both failed ({}): {e}",
                        self.symbols.proxy
                    ))
                })?;
                (
                    proxy * self.symbols.proxy_multiplier,
                    self.symbols.fallback_volatility,
                    SnapshotSource::Fallback,
                )
            }
        };

        // Proxy-scaled prices are not comparable with the index average.
        let moving_average_200 = if with_trend && source == SnapshotSource::Primary {
            self.fetch_moving_average().await
        } else {
            None
        };

        info!(
            index_price,
            volatility,
            ?moving_average_200,
            %source,
            "Market snapshot captured"
        );

        MarketSnapshot::new(index_price, volatility, moving_average_200, as_of, source)
    }

    async fn fetch_primary(&self) -> Result<(f64, f64), DomainError> {
        let price = self.provider.latest_close(&self.symbols.index).await?;
        let vol = self.provider.latest_close(&self.symbols.volatility).await?;
        Ok((price, vol))
    }

    async fn fetch_moving_average(&self) -> Option<f64> {
        match self.provider.history(&self.symbols.index, TREND_PERIOD).await {
            Ok(bars) => {
                let ma = moving_average(&bars, TREND_PERIOD);
                if ma.is_none() {
                    warn!(
                        bars = bars.len(),
                        needed = TREND_PERIOD,
                        "Not enough history for trend check"
                    );
                }
                ma
            }
            Err(e) => {
                warn!(error = %e, "History fetch failed, skipping trend check");
                None
            }
        }
    }
}

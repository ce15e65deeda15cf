use crate::domain::error::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the snapshot's price and volatility came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotSource {
    /// Index and volatility index fetched directly.
    Primary,
    /// Proxy ETF price scaled up, volatility defaulted.
    Fallback,
}

impl fmt::Display for SnapshotSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotSource::Primary => write!(f, "primary"),
            SnapshotSource::Fallback => write!(f, "fallback"),
        }
    }
}

/// Market state captured once per run. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub index_price: f64,
    /// Volatility index level in percent (15.0 means 15%).
    pub volatility: f64,
    pub moving_average_200: Option<f64>,
    pub as_of: DateTime<Utc>,
    pub source: SnapshotSource,
}

impl MarketSnapshot {
    pub fn new(
        index_price: f64,
        volatility: f64,
        moving_average_200: Option<f64>,
        as_of: DateTime<Utc>,
        source: SnapshotSource,
    ) -> Result<Self, DomainError> {
        if !index_price.is_finite() || index_price <= 0.0 {
            return Err(DomainError::InvalidInput(format!(
                "Index price must be positive, got {index_price}"
            )));
        }
        if !volatility.is_finite() || volatility < 0.0 {
            return Err(DomainError::InvalidInput(format!(
                "Volatility must be non-negative, got {volatility}"
            )));
        }
        if let Some(ma) = moving_average_200 {
            if !ma.is_finite() || ma <= 0.0 {
                return Err(DomainError::InvalidInput(format!(
                    "Moving average must be positive, got {ma}"
                )));
            }
        }

        Ok(Self {
            index_price,
            volatility,
            moving_average_200,
            as_of,
            source,
        })
    }

    pub fn is_degraded(&self) -> bool {
        self.source == SnapshotSource::Fallback
    }
}

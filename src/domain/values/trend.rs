use crate::domain::entities::market_snapshot::MarketSnapshot;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Index position relative to its 200-day moving average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Uptrend,
    Downtrend,
}

impl Trend {
    pub fn classify(price: f64, moving_average: f64) -> Self {
        if price < moving_average {
            Trend::Downtrend
        } else {
            Trend::Uptrend
        }
    }

    /// `None` when the snapshot carries no moving average.
    pub fn from_snapshot(snapshot: &MarketSnapshot) -> Option<Self> {
        snapshot
            .moving_average_200
            .map(|ma| Self::classify(snapshot.index_price, ma))
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Uptrend => write!(f, "uptrend"),
            Trend::Downtrend => write!(f, "downtrend"),
        }
    }
}

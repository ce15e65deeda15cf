use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily close in a price history series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub close: f64,
}

/// Simple average of the last `period` closes. `None` when the series is too short.
pub fn moving_average(bars: &[PriceBar], period: usize) -> Option<f64> {
    if period == 0 || bars.len() < period {
        return None;
    }
    let window = &bars[bars.len() - period..];
    Some(window.iter().map(|b| b.close).sum::<f64>() / period as f64)
}

use serde::{Deserialize, Serialize};

/// Strikes are listed in 5-point increments on the index.
pub const STRIKE_STEP: f64 = 5.0;

const DAYS_PER_YEAR: f64 = 365.0;

/// Volatility-scaled price range around the index and the strikes at its edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpectedMove {
    pub range: f64,
    pub call_strike: i64,
    pub put_strike: i64,
}

impl ExpectedMove {
    /// `range = price * (vol / 100) * sqrt(dte / 365) * safety_factor`, strikes at
    /// `price ± range` rounded to the nearest [`STRIKE_STEP`].
    ///
    /// `volatility` is in percent. Zero volatility is valid and puts both strikes
    /// on the rounded index price.
    pub fn compute(index_price: f64, volatility: f64, target_dte: u32, safety_factor: f64) -> Self {
        let time_factor = (target_dte as f64 / DAYS_PER_YEAR).sqrt();
        let range = index_price * (volatility / 100.0) * time_factor * safety_factor;

        Self {
            range,
            call_strike: round_to_strike(index_price + range),
            put_strike: round_to_strike(index_price - range),
        }
    }

    pub fn width(&self) -> i64 {
        self.call_strike - self.put_strike
    }
}

/// Round to the nearest strike step, ties to even (2.5 steps → 2, 3.5 → 4).
pub fn round_to_strike(value: f64) -> i64 {
    ((value / STRIKE_STEP).round_ties_even() * STRIKE_STEP) as i64
}

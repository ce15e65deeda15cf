use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Option expiration date. Always a Friday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ExpiryDate(NaiveDate);

impl ExpiryDate {
    /// Friday of the week that contains `today + target_dte`.
    ///
    /// When that day lands on a Saturday or Sunday the result walks back to the
    /// preceding Friday, so it can fall up to two days short of the target.
    /// Holidays are not considered.
    pub fn resolve(today: NaiveDate, target_dte: u32) -> Self {
        let future = today + Duration::days(i64::from(target_dte));
        let delta = 4 - i64::from(future.weekday().num_days_from_monday());
        ExpiryDate(future + Duration::days(delta))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Calendar days from `today` to expiry.
    pub fn days_from(&self, today: NaiveDate) -> i64 {
        (self.0 - today).num_days()
    }
}

impl fmt::Display for ExpiryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d (%a)"))
    }
}

impl From<ExpiryDate> for NaiveDate {
    fn from(value: ExpiryDate) -> Self {
        value.0
    }
}

pub fn is_friday(date: NaiveDate) -> bool {
    date.weekday() == Weekday::Fri
}

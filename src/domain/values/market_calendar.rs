use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// NYSE full-day closures for 2026.
const NYSE_HOLIDAYS_2026: [(u32, u32); 10] = [
    (1, 1),   // New Year's Day
    (1, 19),  // Martin Luther King Jr. Day
    (2, 16),  // Washington's Birthday
    (4, 3),   // Good Friday
    (5, 25),  // Memorial Day
    (6, 19),  // Juneteenth
    (7, 3),   // Independence Day (observed)
    (9, 7),   // Labor Day
    (11, 26), // Thanksgiving
    (12, 25), // Christmas
];

/// Fixed trading calendar. Only used to flag closures, never to move expiry.
#[derive(Debug, Clone)]
pub struct MarketCalendar {
    holidays: Vec<NaiveDate>,
}

impl MarketCalendar {
    pub fn new(holidays: Vec<NaiveDate>) -> Self {
        Self { holidays }
    }

    pub fn nyse_2026() -> Self {
        let holidays = NYSE_HOLIDAYS_2026
            .iter()
            .filter_map(|&(m, d)| NaiveDate::from_ymd_opt(2026, m, d))
            .collect();
        Self { holidays }
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }

    pub fn is_trading_day(&self, date: NaiveDate) -> bool {
        !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) && !self.is_holiday(date)
    }

    pub fn is_closed_tomorrow(&self, today: NaiveDate) -> bool {
        !self.is_trading_day(today + Duration::days(1))
    }

    /// Holiday falling tomorrow, if any. Weekends return `None`.
    pub fn holiday_tomorrow(&self, today: NaiveDate) -> Option<NaiveDate> {
        let tomorrow = today + Duration::days(1);
        self.is_holiday(tomorrow).then_some(tomorrow)
    }
}

impl Default for MarketCalendar {
    fn default() -> Self {
        Self::nyse_2026()
    }
}

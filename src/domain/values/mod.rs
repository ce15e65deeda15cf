pub mod expected_move;
pub mod expiry;
pub mod market_calendar;
pub mod strategy_profile;
pub mod trend;

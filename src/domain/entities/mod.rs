pub mod decision;
pub mod headline;
pub mod market_snapshot;
pub mod price_bar;

pub mod decision_engine;
pub mod event_risk;
pub mod report;
pub mod run_check;
pub mod snapshot;

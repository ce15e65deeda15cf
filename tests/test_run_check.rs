//! End-to-end runs of the check pipeline against in-memory fakes.

mod common;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use common::{FakeMarketData, RecordingNotifier};
use sentinel::application::report::NO_THREATS_LINE;
use sentinel::application::run_check::DeliveryStatus;
use sentinel::domain::entities::decision::Verdict;
use sentinel::domain::entities::market_snapshot::SnapshotSource;
use sentinel::domain::error::DomainError;
use sentinel::domain::values::strategy_profile::ProfileName;
use sentinel::domain::values::trend::Trend;
use sentinel::Sentinel;
use std::sync::Arc;

fn new_year() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 15, 0, 0).unwrap()
}

fn build(
    profile: ProfileName,
    data: FakeMarketData,
    notifier: RecordingNotifier,
) -> (Sentinel, Arc<FakeMarketData>, Arc<RecordingNotifier>) {
    let data = Arc::new(data);
    let notifier = Arc::new(notifier);
    let s = Sentinel::with_providers(profile.profile(), data.clone(), notifier.clone()).unwrap();
    (s, data, notifier)
}

#[tokio::test]
async fn test_full_run_go() {
    let data = FakeMarketData::calm(6000.0, 14.0).with_flat_history("^GSPC", 5800.0, 250);
    let (s, _, notifier) = build(ProfileName::FullAuto, data, RecordingNotifier::configured());

    let report = s.run_at(new_year(), true).await.unwrap();

    assert_eq!(report.decision.verdict, Verdict::Go);
    assert_eq!(report.trend, Some(Trend::Uptrend));
    assert_eq!(report.snapshot.moving_average_200, Some(5800.0));
    assert!((report.expected_move.range - 294.94).abs() < 0.01);
    assert_eq!(report.expected_move.call_strike, 6295);
    assert_eq!(report.expected_move.put_strike, 5705);
    assert_eq!(
        report.expiry.date(),
        NaiveDate::from_ymd_opt(2026, 2, 13).unwrap()
    );
    assert!(!report.market_closed_tomorrow);
    assert!(report.risky_headlines.is_empty());

    assert_eq!(report.delivery, DeliveryStatus::Sent);
    assert_eq!(notifier.sent(), vec![report.message.clone()]);
    assert!(report.message.contains("Call: 6295 | Put: 5705"));
    assert!(report.message.ends_with(NO_THREATS_LINE));
}

#[tokio::test]
async fn test_fallback_to_proxy_when_index_fails() {
    let mut data = FakeMarketData::default();
    data.closes.insert("SPY".into(), 600.0);
    let (s, data, _) = build(ProfileName::FullAuto, data, RecordingNotifier::configured());

    let report = s.run_at(new_year(), false).await.unwrap();

    assert_eq!(report.snapshot.source, SnapshotSource::Fallback);
    assert_eq!(report.snapshot.index_price, 6000.0);
    assert_eq!(report.snapshot.volatility, 15.0);
    assert_eq!(report.trend, None);
    assert_eq!(report.decision.verdict, Verdict::Go);
    assert!(report.message.contains("Fallback data"));
    assert!(data.requested().contains(&"SPY".to_string()));
}

#[tokio::test]
async fn test_fallback_when_only_volatility_fails() {
    let mut data = FakeMarketData::default();
    data.closes.insert("^GSPC".into(), 6000.0);
    data.closes.insert("SPY".into(), 598.0);
    let (s, _, _) = build(ProfileName::FortyFiveDte15Delta, data, RecordingNotifier::configured());

    let report = s.run_at(new_year(), false).await.unwrap();
    assert_eq!(report.snapshot.source, SnapshotSource::Fallback);
    assert_eq!(report.snapshot.index_price, 5980.0);
}

#[tokio::test]
async fn test_run_fails_when_proxy_also_fails() {
    let (s, _, notifier) = build(
        ProfileName::FullAuto,
        FakeMarketData::default(),
        RecordingNotifier::configured(),
    );

    let err = s.run_at(new_year(), true).await.unwrap_err();
    assert!(matches!(err, DomainError::DataFetch(_)));
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn test_event_risk_blocks_short_dated() {
    let data = FakeMarketData::calm(6000.0, 15.0).with_headlines(&[
        "Fed signals pause",
        "Tech earnings beat",
        "CPI report due Friday",
    ]);
    let (s, _, _) = build(ProfileName::ZeroDte10Delta, data, RecordingNotifier::configured());

    let report = s.run_at(new_year(), false).await.unwrap();
    assert_eq!(report.decision.verdict, Verdict::NoGo);
    assert_eq!(report.decision.rule, "event_risk");
    assert_eq!(report.headlines_scanned, 3);
    assert_eq!(report.risky_headlines.len(), 2);
    assert!(report.message.contains("• Fed signals pause\n• CPI report due Friday"));
}

#[tokio::test]
async fn test_event_risk_cautions_long_dated() {
    let data = FakeMarketData::calm(6000.0, 15.0).with_headlines(&["Powell testifies today"]);
    let (s, _, _) = build(ProfileName::FortyFiveDte10Delta, data, RecordingNotifier::configured());

    let report = s.run_at(new_year(), false).await.unwrap();
    assert_eq!(report.decision.verdict, Verdict::Caution);
    assert_eq!(report.decision.rule, "event_risk");
}

#[tokio::test]
async fn test_low_volatility_beats_event_risk() {
    let data = FakeMarketData::calm(6000.0, 10.5).with_headlines(&["FOMC day"]);
    let (s, _, _) = build(ProfileName::ZeroDte10Delta, data, RecordingNotifier::configured());

    let report = s.run_at(new_year(), false).await.unwrap();
    assert_eq!(report.decision.rule, "low_volatility");
}

#[tokio::test]
async fn test_downtrend_caution() {
    let data = FakeMarketData::calm(6000.0, 14.0).with_flat_history("^GSPC", 6200.0, 250);
    let (s, _, _) = build(ProfileName::FullAuto, data, RecordingNotifier::configured());

    let report = s.run_at(new_year(), false).await.unwrap();
    assert_eq!(report.trend, Some(Trend::Downtrend));
    assert_eq!(report.decision.verdict, Verdict::Caution);
    assert_eq!(report.decision.rule, "downtrend");
}

#[tokio::test]
async fn test_short_history_skips_trend() {
    let data = FakeMarketData::calm(6000.0, 14.0).with_flat_history("^GSPC", 6200.0, 120);
    let (s, _, _) = build(ProfileName::FullAuto, data, RecordingNotifier::configured());

    let report = s.run_at(new_year(), false).await.unwrap();
    assert_eq!(report.trend, None);
    assert_eq!(report.decision.verdict, Verdict::Go);
}

#[tokio::test]
async fn test_profile_without_trend_filter_ignores_history() {
    let data = FakeMarketData::calm(6000.0, 14.0).with_flat_history("^GSPC", 6200.0, 250);
    let (s, _, _) = build(ProfileName::FortyFiveDte15Delta, data, RecordingNotifier::configured());

    let report = s.run_at(new_year(), false).await.unwrap();
    assert_eq!(report.snapshot.moving_average_200, None);
    assert_eq!(report.decision.verdict, Verdict::Go);
}

#[tokio::test]
async fn test_headline_fetch_failure_is_fatal() {
    let mut data = FakeMarketData::calm(6000.0, 14.0);
    data.fail_headlines = true;
    let (s, _, notifier) = build(ProfileName::FullAuto, data, RecordingNotifier::configured());

    assert!(s.run_at(new_year(), true).await.is_err());
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn test_missing_credentials_skip_delivery() {
    let (s, _, notifier) = build(
        ProfileName::FullAuto,
        FakeMarketData::calm(6000.0, 14.0),
        RecordingNotifier::unconfigured(),
    );

    let report = s.run_at(new_year(), true).await.unwrap();
    assert_eq!(report.delivery, DeliveryStatus::Unconfigured);
    assert!(!report.message.is_empty());
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn test_delivery_failure_is_reported_not_raised() {
    let (s, _, _) = build(
        ProfileName::FullAuto,
        FakeMarketData::calm(6000.0, 14.0),
        RecordingNotifier::failing(),
    );

    let report = s.run_at(new_year(), true).await.unwrap();
    assert!(matches!(report.delivery, DeliveryStatus::Failed(_)));
}

#[tokio::test]
async fn test_dry_run_does_not_send() {
    let (s, _, notifier) = build(
        ProfileName::FullAuto,
        FakeMarketData::calm(6000.0, 14.0),
        RecordingNotifier::configured(),
    );

    let report = s.run_at(new_year(), false).await.unwrap();
    assert_eq!(report.delivery, DeliveryStatus::Skipped);
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn test_market_closed_flag_before_thanksgiving() {
    let (s, _, _) = build(
        ProfileName::FullAuto,
        FakeMarketData::calm(6000.0, 14.0),
        RecordingNotifier::configured(),
    );

    let as_of = Utc.with_ymd_and_hms(2026, 11, 25, 15, 0, 0).unwrap();
    let report = s.run_at(as_of, false).await.unwrap();
    assert!(report.market_closed_tomorrow);
    assert!(report.message.contains("Market closed tomorrow"));
    // 2026-11-25 + 45 = 2027-01-09 (Saturday) → Friday 2027-01-08
    assert_eq!(
        report.expiry.date(),
        NaiveDate::from_ymd_opt(2027, 1, 8).unwrap()
    );
}

#[tokio::test]
async fn test_repeated_runs_are_identical() {
    let data = FakeMarketData::calm(6123.4, 18.7)
        .with_flat_history("^GSPC", 6000.0, 250)
        .with_headlines(&["Inflation expectations rise"]);
    let (s, _, _) = build(ProfileName::FullAuto, data, RecordingNotifier::configured());

    let a = s.run_at(new_year(), false).await.unwrap();
    let b = s.run_at(new_year(), false).await.unwrap();
    assert_eq!(a.decision, b.decision);
    assert_eq!(a.expected_move, b.expected_move);
    assert_eq!(a.message, b.message);
}

#[test]
fn test_invalid_profile_rejected() {
    let mut profile = ProfileName::FullAuto.profile();
    profile.target_dte = 0;
    let result = Sentinel::with_providers(
        profile,
        Arc::new(FakeMarketData::default()),
        Arc::new(RecordingNotifier::configured()),
    );
    assert!(matches!(result, Err(DomainError::InvalidInput(_))));
}

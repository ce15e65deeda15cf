use crate::application::decision_engine::{DecisionEngine, DecisionInput};
use crate::application::event_risk::{EventRiskScanner, MAX_HEADLINES};
use crate::application::report::{format_report, ReportContext};
use crate::application::snapshot::{MarketSymbols, SnapshotUseCase};
use crate::domain::entities::decision::Decision;
use crate::domain::entities::headline::Headline;
use crate::domain::entities::market_snapshot::MarketSnapshot;
use crate::domain::error::DomainError;
use crate::domain::ports::market_data::MarketDataProvider;
use crate::domain::ports::notifier::Notifier;
use crate::domain::values::expected_move::ExpectedMove;
use crate::domain::values::expiry::ExpiryDate;
use crate::domain::values::market_calendar::MarketCalendar;
use crate::domain::values::strategy_profile::{ProfileName, StrategyProfile};
use crate::domain::values::trend::Trend;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info};

/// What happened to the rendered report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "lowercase")]
pub enum DeliveryStatus {
    Sent,
    /// Dry run, delivery not requested.
    Skipped,
    /// Credentials missing.
    Unconfigured,
    Failed(String),
}

#[derive(Debug, Serialize)]
pub struct RunReport {
    pub profile: ProfileName,
    pub snapshot: MarketSnapshot,
    pub trend: Option<Trend>,
    pub expected_move: ExpectedMove,
    pub expiry: ExpiryDate,
    pub decision: Decision,
    pub risky_headlines: Vec<Headline>,
    pub headlines_scanned: usize,
    pub market_closed_tomorrow: bool,
    pub message: String,
    pub delivery: DeliveryStatus,
}

pub struct RunCheckUseCase {
    market_data: Arc<dyn MarketDataProvider>,
    notifier: Arc<dyn Notifier>,
    snapshot_uc: SnapshotUseCase,
    scanner: EventRiskScanner,
    calendar: MarketCalendar,
    headline_symbol: String,
}

impl RunCheckUseCase {
    pub fn new(
        market_data: Arc<dyn MarketDataProvider>,
        notifier: Arc<dyn Notifier>,
        symbols: MarketSymbols,
        calendar: MarketCalendar,
    ) -> Self {
        Self {
            headline_symbol: symbols.headlines.clone(),
            snapshot_uc: SnapshotUseCase::new(market_data.clone(), symbols),
            market_data,
            notifier,
            scanner: EventRiskScanner::default(),
            calendar,
        }
    }

    /// One fetch → compute → notify pass. `as_of`'s UTC date is "today".
    pub async fn execute(
        &self,
        profile: &StrategyProfile,
        as_of: DateTime<Utc>,
        deliver: bool,
    ) -> Result<RunReport, DomainError> {
        profile.validate()?;
        let today = as_of.date_naive();

        let snapshot = self.snapshot_uc.execute(as_of, profile.trend_filter).await?;

        let headlines = self
            .market_data
            .recent_headlines(&self.headline_symbol, MAX_HEADLINES)
            .await?;
        let risky_headlines = self.scanner.scan(&headlines);
        info!(
            scanned = headlines.len().min(MAX_HEADLINES),
            risky = risky_headlines.len(),
            "Headline risk scan complete"
        );

        let trend = Trend::from_snapshot(&snapshot);
        let engine = DecisionEngine::new(profile.clone());
        let decision = engine.evaluate(&DecisionInput {
            volatility: snapshot.volatility,
            event_risk_count: risky_headlines.len(),
            trend,
        });
        info!(
            verdict = %decision.verdict,
            rule = %decision.rule,
            tradeable = decision.is_tradeable(),
            "Decision reached"
        );

        let expected_move = ExpectedMove::compute(
            snapshot.index_price,
            snapshot.volatility,
            profile.target_dte,
            profile.safety_factor,
        );
        let expiry = ExpiryDate::resolve(today, profile.target_dte);
        let market_closed_tomorrow = self.calendar.is_closed_tomorrow(today);

        let message = format_report(&ReportContext {
            profile,
            snapshot: &snapshot,
            expected_move: &expected_move,
            decision: &decision,
            expiry: &expiry,
            today,
            risky_headlines: &risky_headlines,
            trend,
            market_closed_tomorrow,
        });

        let delivery = if deliver {
            self.deliver(&message).await
        } else {
            DeliveryStatus::Skipped
        };

        Ok(RunReport {
            profile: profile.name,
            snapshot,
            trend,
            expected_move,
            expiry,
            decision,
            risky_headlines,
            headlines_scanned: headlines.len().min(MAX_HEADLINES),
            market_closed_tomorrow,
            message,
            delivery,
        })
    }

    /// Delivery problems are logged and reported, never returned as errors.
    async fn deliver(&self, message: &str) -> DeliveryStatus {
        if !self.notifier.is_configured() {
            error!(
                notifier = self.notifier.name(),
                "Missing notifier credentials (TELEGRAM_TOKEN or CHAT_ID), skipping delivery"
            );
            return DeliveryStatus::Unconfigured;
        }

        match self.notifier.send(message).await {
            Ok(()) => {
                info!(notifier = self.notifier.name(), "Report sent");
                DeliveryStatus::Sent
            }
            Err(e) => {
                error!(notifier = self.notifier.name(), error = %e, "Report delivery failed");
                DeliveryStatus::Failed(e.to_string())
            }
        }
    }
}

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

use crate::application::run_check::{RunCheckUseCase, RunReport};
use crate::application::snapshot::MarketSymbols;
use crate::config::SentinelConfig;
use crate::domain::error::DomainError;
use crate::domain::ports::market_data::MarketDataProvider;
use crate::domain::ports::notifier::Notifier;
use crate::domain::values::market_calendar::MarketCalendar;
use crate::domain::values::strategy_profile::StrategyProfile;
use crate::infrastructure::feeds::yahoo::YahooMarketData;
use crate::infrastructure::notifiers::telegram::TelegramNotifier;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

pub struct Sentinel {
    profile: StrategyProfile,
    run_check_uc: RunCheckUseCase,
}

impl Sentinel {
    /// Production wiring: Yahoo Finance data, Telegram delivery.
    pub fn new(profile: StrategyProfile, config: &SentinelConfig) -> Result<Self, DomainError> {
        let market_data: Arc<dyn MarketDataProvider> = Arc::new(YahooMarketData::new(config.retry));
        let notifier: Arc<dyn Notifier> = Arc::new(TelegramNotifier::new(
            config.telegram_token.clone(),
            config.chat_id.clone(),
            config.retry,
        ));

        Self::with_providers(profile, market_data, notifier)
    }

    pub fn with_providers(
        profile: StrategyProfile,
        market_data: Arc<dyn MarketDataProvider>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, DomainError> {
        profile.validate()?;

        Ok(Self {
            profile,
            run_check_uc: RunCheckUseCase::new(
                market_data,
                notifier,
                MarketSymbols::default(),
                MarketCalendar::nyse_2026(),
            ),
        })
    }

    pub fn profile(&self) -> &StrategyProfile {
        &self.profile
    }

    /// Run the full check once, as of now.
    pub async fn run(&self, deliver: bool) -> Result<RunReport, DomainError> {
        self.run_at(Utc::now(), deliver).await
    }

    pub async fn run_at(&self, as_of: DateTime<Utc>, deliver: bool) -> Result<RunReport, DomainError> {
        let span = tracing::info_span!(
            "run",
            run_id = %Uuid::new_v4(),
            profile = %self.profile.name
        );
        self.run_check_uc
            .execute(&self.profile, as_of, deliver)
            .instrument(span)
            .await
    }
}

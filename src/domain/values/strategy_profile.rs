//! Named strategy profiles.
//!
//! A profile bundles everything that differs between deployments of the
//! checker: target days-to-expiration, strike safety factor, the volatility
//! thresholds used by the decision rules, and how macro event risk is
//! treated. Profiles are plain data; one engine serves all of them.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a profile reacts to risky headlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventRiskPolicy {
    /// Short-dated: a single news event can blow through the strikes.
    Block,
    /// Long-dated: the position outlasts one news cycle.
    Caution,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProfileName {
    #[serde(rename = "0dte-10d")]
    ZeroDte10Delta,
    #[serde(rename = "45dte-10d")]
    FortyFiveDte10Delta,
    #[serde(rename = "45dte-15d")]
    FortyFiveDte15Delta,
    #[serde(rename = "full-auto")]
    FullAuto,
}

impl ProfileName {
    pub const ALL: [ProfileName; 4] = [
        ProfileName::ZeroDte10Delta,
        ProfileName::FortyFiveDte10Delta,
        ProfileName::FortyFiveDte15Delta,
        ProfileName::FullAuto,
    ];

    pub fn profile(self) -> StrategyProfile {
        match self {
            ProfileName::ZeroDte10Delta => StrategyProfile {
                name: self,
                label: "0DTE Iron Condor (10 Delta)".into(),
                target_dte: 1,
                safety_factor: 1.3,
                delta: 10,
                low_volatility: 11.5,
                high_volatility: 28.0,
                elevated_band: (20.0, 28.0),
                event_risk: EventRiskPolicy::Block,
                trend_filter: false,
            },
            ProfileName::FortyFiveDte10Delta => StrategyProfile {
                name: self,
                label: "45DTE Iron Condor (10 Delta)".into(),
                target_dte: 45,
                safety_factor: 1.3,
                delta: 10,
                low_volatility: 11.0,
                high_volatility: 30.0,
                elevated_band: (20.0, 30.0),
                event_risk: EventRiskPolicy::Caution,
                trend_filter: false,
            },
            ProfileName::FortyFiveDte15Delta => StrategyProfile {
                name: self,
                label: "45DTE Iron Condor (15 Delta)".into(),
                target_dte: 45,
                safety_factor: 1.0,
                delta: 15,
                low_volatility: 11.0,
                high_volatility: 30.0,
                elevated_band: (20.0, 30.0),
                event_risk: EventRiskPolicy::Caution,
                trend_filter: false,
            },
            ProfileName::FullAuto => StrategyProfile {
                name: self,
                label: "45DTE Full Auto (15 Delta, trend filter)".into(),
                target_dte: 45,
                safety_factor: 1.0,
                delta: 15,
                low_volatility: 11.0,
                high_volatility: 30.0,
                elevated_band: (20.0, 30.0),
                event_risk: EventRiskPolicy::Caution,
                trend_filter: true,
            },
        }
    }
}

impl fmt::Display for ProfileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileName::ZeroDte10Delta => write!(f, "0dte-10d"),
            ProfileName::FortyFiveDte10Delta => write!(f, "45dte-10d"),
            ProfileName::FortyFiveDte15Delta => write!(f, "45dte-15d"),
            ProfileName::FullAuto => write!(f, "full-auto"),
        }
    }
}

impl FromStr for ProfileName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "0dte-10d" | "0dte" => Ok(ProfileName::ZeroDte10Delta),
            "45dte-10d" => Ok(ProfileName::FortyFiveDte10Delta),
            "45dte-15d" => Ok(ProfileName::FortyFiveDte15Delta),
            "full-auto" | "auto" => Ok(ProfileName::FullAuto),
            _ => Err(format!("Unknown strategy profile: {s}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyProfile {
    pub name: ProfileName,
    pub label: String,
    /// Days to expiration the strikes are sized for. Always > 0.
    pub target_dte: u32,
    /// Standard-deviation multiplier applied to the expected move.
    pub safety_factor: f64,
    /// Short-strike delta the standard plan targets.
    pub delta: u8,
    pub low_volatility: f64,
    pub high_volatility: f64,
    /// Inclusive volatility band that triggers the wide-wings caution.
    pub elevated_band: (f64, f64),
    pub event_risk: EventRiskPolicy,
    /// Fetch the 200-day average and warn on downtrends.
    pub trend_filter: bool,
}

impl StrategyProfile {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.target_dte == 0 {
            return Err(DomainError::InvalidInput(format!(
                "Profile {}: target DTE must be positive",
                self.name
            )));
        }
        if !self.safety_factor.is_finite() || self.safety_factor <= 0.0 {
            return Err(DomainError::InvalidInput(format!(
                "Profile {}: safety factor must be positive, got {}",
                self.name, self.safety_factor
            )));
        }
        if self.low_volatility >= self.high_volatility {
            return Err(DomainError::InvalidInput(format!(
                "Profile {}: low volatility threshold {} is not below high threshold {}",
                self.name, self.low_volatility, self.high_volatility
            )));
        }
        let (band_low, band_high) = self.elevated_band;
        if band_low > band_high {
            return Err(DomainError::InvalidInput(format!(
                "Profile {}: elevated band {band_low}-{band_high} is inverted",
                self.name
            )));
        }
        Ok(())
    }

    /// Delta for the "wider wings" plan in elevated volatility.
    pub fn wide_wing_delta(&self) -> u8 {
        self.delta.saturating_sub(5).max(1)
    }
}

impl Default for StrategyProfile {
    fn default() -> Self {
        ProfileName::FullAuto.profile()
    }
}

//! Go/no-go decision engine.
//!
//! The rules live in [`RULES`], an ordered table of predicate/outcome pairs.
//! Evaluation walks the table top to bottom and returns the first match, so
//! precedence is exactly the table order. Thresholds come from the active
//! [`StrategyProfile`]; nothing here reads global state or the clock.

use crate::domain::entities::decision::{Decision, Verdict};
use crate::domain::values::strategy_profile::{EventRiskPolicy, StrategyProfile};
use crate::domain::values::trend::Trend;
use serde::Serialize;

/// Everything a rule may look at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DecisionInput {
    pub volatility: f64,
    pub event_risk_count: usize,
    pub trend: Option<Trend>,
}

pub struct Rule {
    pub name: &'static str,
    pub applies: fn(&DecisionInput, &StrategyProfile) -> bool,
    pub outcome: fn(&StrategyProfile) -> Decision,
}

pub static RULES: [Rule; 6] = [
    Rule {
        name: "low_volatility",
        applies: |input, p| input.volatility < p.low_volatility,
        outcome: |p| {
            Decision::new(
                Verdict::NoGo,
                format!(
                    "Volatility too low (<{}). Premiums not worth the gamma risk.",
                    p.low_volatility
                ),
                Some("Debit spreads or no trade.".into()),
                "low_volatility",
            )
        },
    },
    Rule {
        name: "extreme_volatility",
        applies: |input, p| input.volatility > p.high_volatility,
        outcome: |p| {
            Decision::new(
                Verdict::NoGo,
                format!("Volatility extreme (>{}). Market unstable.", p.high_volatility),
                Some("Wait for the volatility crush.".into()),
                "extreme_volatility",
            )
        },
    },
    Rule {
        name: "event_risk",
        applies: |input, _| input.event_risk_count > 0,
        outcome: |p| match p.event_risk {
            EventRiskPolicy::Block => Decision::new(
                Verdict::NoGo,
                "High impact news detected (Fed/CPI).",
                Some("Sit on hands. Wait for the event to pass.".into()),
                "event_risk",
            ),
            EventRiskPolicy::Caution => Decision::new(
                Verdict::Caution,
                "Macro event risk in the headlines.",
                Some("Trade smaller. The position outlasts the news cycle.".into()),
                "event_risk",
            ),
        },
    },
    Rule {
        name: "elevated_volatility",
        applies: |input, p| {
            let (low, high) = p.elevated_band;
            (low..=high).contains(&input.volatility)
        },
        outcome: |p| {
            Decision::new(
                Verdict::Caution,
                "Elevated volatility. Widen the risk buffer.",
                Some(format!(
                    "Iron condor with WIDER wings ({} delta).",
                    p.wide_wing_delta()
                )),
                "elevated_volatility",
            )
        },
    },
    Rule {
        name: "downtrend",
        applies: |input, _| input.trend == Some(Trend::Downtrend),
        outcome: |_| {
            Decision::new(
                Verdict::Caution,
                "Downtrend (below 200-day average). Be careful with short puts.",
                Some("Push the put strike further out or skip the put side.".into()),
                "downtrend",
            )
        },
    },
    Rule {
        name: "optimal",
        applies: |_, _| true,
        outcome: |p| {
            Decision::new(
                Verdict::Go,
                "Conditions optimal.",
                Some(format!("Standard iron condor ({} delta).", p.delta)),
                "optimal",
            )
        },
    },
];

pub struct DecisionEngine {
    profile: StrategyProfile,
}

impl DecisionEngine {
    pub fn new(profile: StrategyProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &StrategyProfile {
        &self.profile
    }

    /// First matching rule wins. The final rule always matches.
    pub fn evaluate(&self, input: &DecisionInput) -> Decision {
        RULES
            .iter()
            .find(|rule| (rule.applies)(input, &self.profile))
            .map(|rule| (rule.outcome)(&self.profile))
            .unwrap_or_else(|| {
                Decision::new(Verdict::NoGo, "No rule matched.", None, "unmatched")
            })
    }
}

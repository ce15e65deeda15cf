use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Go,
    Caution,
    NoGo,
}

impl Verdict {
    pub fn emoji(&self) -> &'static str {
        match self {
            Verdict::Go => "✅",
            Verdict::Caution => "⚠️",
            Verdict::NoGo => "⛔",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Go => write!(f, "GO"),
            Verdict::Caution => write!(f, "CAUTION"),
            Verdict::NoGo => write!(f, "NO GO"),
        }
    }
}

/// Outcome of one decision-engine evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub verdict: Verdict,
    pub reason: String,
    pub strategy_note: Option<String>,
    /// Name of the rule that fired.
    pub rule: String,
}

impl Decision {
    pub fn new(
        verdict: Verdict,
        reason: impl Into<String>,
        strategy_note: Option<String>,
        rule: &str,
    ) -> Self {
        Self {
            verdict,
            reason: reason.into(),
            strategy_note,
            rule: rule.to_string(),
        }
    }

    pub fn is_tradeable(&self) -> bool {
        self.verdict != Verdict::NoGo
    }
}

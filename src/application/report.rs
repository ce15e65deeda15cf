use crate::domain::entities::decision::Decision;
use crate::domain::entities::headline::Headline;
use crate::domain::entities::market_snapshot::MarketSnapshot;
use crate::domain::values::expected_move::ExpectedMove;
use crate::domain::values::expiry::ExpiryDate;
use crate::domain::values::strategy_profile::StrategyProfile;
use crate::domain::values::trend::Trend;
use chrono::NaiveDate;

const DIVIDER: &str = "-----------------------------";

pub const NO_THREATS_LINE: &str = "• No immediate Fed/CPI threats.";

/// Everything the report shows. Borrowed; the formatter owns nothing.
pub struct ReportContext<'a> {
    pub profile: &'a StrategyProfile,
    pub snapshot: &'a MarketSnapshot,
    pub expected_move: &'a ExpectedMove,
    pub decision: &'a Decision,
    pub expiry: &'a ExpiryDate,
    pub today: NaiveDate,
    pub risky_headlines: &'a [Headline],
    pub trend: Option<Trend>,
    pub market_closed_tomorrow: bool,
}

/// Render the Telegram message. Sections: header, decision, market data,
/// strikes, expiry, risk scan.
pub fn format_report(ctx: &ReportContext<'_>) -> String {
    let mut msg = String::new();

    msg.push_str("🦅 *SENTINEL CLOUD AGENT*\n");
    msg.push_str(&format!("_{}_\n", escape_markdown(&ctx.profile.label)));
    msg.push_str(DIVIDER);
    msg.push('\n');

    msg.push_str(&format!(
        "🚦 *DECISION: {} {}*\n",
        ctx.decision.verdict.emoji(),
        ctx.decision.verdict
    ));
    msg.push_str(&format!("Reason: {}\n", ctx.decision.reason));
    if let Some(note) = &ctx.decision.strategy_note {
        msg.push_str(&format!("Plan: {note}\n"));
    }
    msg.push_str(DIVIDER);
    msg.push('\n');

    msg.push_str("📉 *MARKET DATA*\n");
    msg.push_str(&format!(
        "SPX: {:.2} | VIX: {:.2}\n",
        ctx.snapshot.index_price, ctx.snapshot.volatility
    ));
    if let (Some(trend), Some(ma)) = (ctx.trend, ctx.snapshot.moving_average_200) {
        let side = match trend {
            Trend::Uptrend => "above",
            Trend::Downtrend => "below",
        };
        msg.push_str(&format!("Trend: {trend} ({side} 200d MA {ma:.2})\n"));
    }
    if ctx.snapshot.is_degraded() {
        msg.push_str("⚠️ Fallback data: SPY proxy price, default volatility\n");
    }
    msg.push_str(DIVIDER);
    msg.push('\n');

    msg.push_str("🎯 *STRIKES (If Trading)*\n");
    msg.push_str(&format!(
        "Expected move: ±{:.2} ({:.1}x safety)\n",
        ctx.expected_move.range, ctx.profile.safety_factor
    ));
    msg.push_str(&format!(
        "Call: {} | Put: {}\n",
        ctx.expected_move.call_strike, ctx.expected_move.put_strike
    ));
    msg.push_str(DIVIDER);
    msg.push('\n');

    msg.push_str("📅 *EXPIRY*\n");
    msg.push_str(&format!(
        "{} ({} days, target {} DTE)\n",
        ctx.expiry,
        ctx.expiry.days_from(ctx.today),
        ctx.profile.target_dte
    ));
    if ctx.market_closed_tomorrow {
        msg.push_str("🔒 Market closed tomorrow\n");
    }
    msg.push_str(DIVIDER);
    msg.push('\n');

    msg.push_str("🗞️ *RISK SCAN*\n");
    if ctx.risky_headlines.is_empty() {
        msg.push_str(NO_THREATS_LINE);
    } else {
        let lines: Vec<String> = ctx
            .risky_headlines
            .iter()
            .map(|h| format!("• {}", escape_markdown(&h.title)))
            .collect();
        msg.push_str(&lines.join("\n"));
    }

    msg
}

/// Escape characters that legacy Telegram Markdown treats as entity markers.
pub fn escape_markdown(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '_' | '*' | '`' | '[') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

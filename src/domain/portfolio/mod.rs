//! Portfolio statistics across the whole journal.

use crate::domain::trade::{TradeRecord, TradeStatus};
use crate::shared::fmt::display_percent;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Aggregate figures over a set of trades. Percentages are 0–100.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub total_trades: usize,
    pub open_trades: usize,
    pub closed_trades: usize,
    /// Closed trades sold above the buy price, over all closed trades.
    pub win_rate: Decimal,
    pub total_invested: Decimal,
    /// Realized USD profit: buy amount × realized pnl% over closed trades.
    pub total_pnl: Decimal,
    /// Mean realized pnl% over closed trades.
    pub avg_pnl_percent: Decimal,
}

impl PortfolioSummary {
    pub fn from_trades(trades: &[TradeRecord]) -> Self {
        let closed: Vec<&TradeRecord> = trades
            .iter()
            .filter(|t| t.status() == TradeStatus::Closed)
            .collect();
        let closed_count = Decimal::from(closed.len());

        let wins = closed.iter().filter(|t| t.is_win()).count();
        let total_invested = trades
            .iter()
            .fold(Decimal::ZERO, |acc, t| acc.saturating_add(t.buy.amount_usd));

        // Sums saturate at the representable range instead of panicking.
        let mut total_pnl = Decimal::ZERO;
        let mut pnl_sum = Decimal::ZERO;
        for t in &closed {
            let Some(pnl) = t.realized_pnl_percent() else {
                tracing::warn!(trade = %t.id, "Realized pnl out of range; counted as zero");
                continue;
            };
            pnl_sum = pnl_sum.saturating_add(pnl);
            let pnl_usd = t.buy.amount_usd.saturating_mul(pnl / Decimal::ONE_HUNDRED);
            total_pnl = total_pnl.saturating_add(pnl_usd);
        }

        let (win_rate, avg_pnl_percent) = if closed.is_empty() {
            (Decimal::ZERO, Decimal::ZERO)
        } else {
            (
                share_of(Decimal::from(wins), closed_count)
                    .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
                    .unwrap_or_default(),
                share_of(pnl_sum, closed_count).unwrap_or_default(),
            )
        };

        Self {
            total_trades: trades.len(),
            open_trades: trades.len() - closed.len(),
            closed_trades: closed.len(),
            win_rate,
            total_invested,
            total_pnl,
            avg_pnl_percent,
        }
    }
}

fn share_of(part: Decimal, count: Decimal) -> Option<Decimal> {
    part.checked_div(count)
}

impl fmt::Display for PortfolioSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Trades: {} ({} open, {} closed)",
            self.total_trades, self.open_trades, self.closed_trades
        )?;
        writeln!(f, "Win rate: {}%", self.win_rate.round_dp(1))?;
        writeln!(f, "Invested: ${}", self.total_invested.round_dp(2))?;
        writeln!(f, "Realized P&L: ${}", self.total_pnl.round_dp(2))?;
        write!(f, "Avg P&L: {}", display_percent(&self.avg_pnl_percent))
    }
}

//! Performance analysis: extrema, drawdown and realized P&L over a holding window.
//!
//! [`analyze`] is pure: the evaluation instant for open trades is a parameter,
//! so the same inputs always give the same summary.
//!
//! The holding window is `[buy, sell]` for closed trades and `[buy, now]` for
//! open ones, both ends inclusive. Candles outside it are ignored. An empty
//! window yields `None`, never a zeroed summary.

#[cfg(feature = "http")]
pub mod client;

use crate::domain::price_history::{Candle, CandleSeries};
use crate::domain::trade::TradeRecord;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ─── PerformanceSummary ──────────────────────────────────────────────────────

/// Price action over a trade's holding window. All percentages are relative
/// to the buy price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSummary {
    pub min_price: Decimal,
    pub max_price: Decimal,
    pub min_timestamp: DateTime<Utc>,
    pub max_timestamp: DateTime<Utc>,
    /// Realized; only for closed trades.
    pub pnl_percent: Option<Decimal>,
    pub max_gain_percent: Decimal,
    /// Usually `<= 0`, not enforced.
    pub max_drawdown_percent: Decimal,
    /// Share of the best available gain that the exit realized. Absent for
    /// open trades and when there was no upside (`max_gain_percent <= 0`).
    pub captured_percent: Option<Decimal>,
    /// Candles inside the window.
    pub candle_count: usize,
}

/// `(value - base) / base * 100`. `None` when `base` is zero or on overflow.
pub fn percent_change(value: Decimal, base: Decimal) -> Option<Decimal> {
    value
        .checked_sub(base)?
        .checked_div(base)?
        .checked_mul(Decimal::ONE_HUNDRED)
}

/// `part / whole * 100`.
fn share_percent(part: Decimal, whole: Decimal) -> Option<Decimal> {
    part.checked_div(whole)?.checked_mul(Decimal::ONE_HUNDRED)
}

struct Extremum {
    price: Decimal,
    at: DateTime<Utc>,
}

/// Lowest low and highest high. Ties keep the first candle in iteration order.
fn scan_extrema<'a>(
    first: &Candle,
    rest: impl Iterator<Item = &'a Candle>,
) -> (Extremum, Extremum) {
    let mut low = Extremum {
        price: first.low,
        at: first.timestamp,
    };
    let mut high = Extremum {
        price: first.high,
        at: first.timestamp,
    };

    for candle in rest {
        if candle.low < low.price {
            low = Extremum {
                price: candle.low,
                at: candle.timestamp,
            };
        }
        if candle.high > high.price {
            high = Extremum {
                price: candle.high,
                at: candle.timestamp,
            };
        }
    }
    (low, high)
}

/// Analyze `trade` against `candles`, evaluating open trades as of `now`.
///
/// Returns `None` when no candle falls inside the holding window. A trade
/// whose buy price is not positive also yields `None`; input validation is
/// expected to have rejected it already.
pub fn analyze(
    trade: &TradeRecord,
    candles: &CandleSeries,
    now: DateTime<Utc>,
) -> Option<PerformanceSummary> {
    let buy_price = trade.buy.price;
    if buy_price <= Decimal::ZERO {
        tracing::warn!(trade = %trade.id, %buy_price, "Skipping analysis: non-positive buy price");
        return None;
    }

    let window = candles.within(trade.buy.timestamp, trade.window_end(now));
    let (first, rest) = window.split_first()?;
    let (low, high) = scan_extrema(first, rest.iter().copied());

    let max_gain_percent = percent_change(high.price, buy_price)?;
    let max_drawdown_percent = percent_change(low.price, buy_price)?;
    let pnl_percent = match &trade.sell {
        Some(sell) => Some(percent_change(sell.price, buy_price)?),
        None => None,
    };
    let captured_percent = match pnl_percent {
        Some(pnl) if max_gain_percent > Decimal::ZERO => share_percent(pnl, max_gain_percent),
        _ => None,
    };

    Some(PerformanceSummary {
        min_price: low.price,
        max_price: high.price,
        min_timestamp: low.at,
        max_timestamp: high.at,
        pnl_percent,
        max_gain_percent,
        max_drawdown_percent,
        captured_percent,
        candle_count: window.len(),
    })
}

// ─── PostSellPerformance ─────────────────────────────────────────────────────

/// How the token moved after a closed trade's exit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostSellPerformance {
    pub current_price: Decimal,
    pub change_since_sell_percent: Decimal,
    /// Positive change since the sell, else zero.
    pub missed_gain_percent: Decimal,
    /// Magnitude of a negative change since the sell, else zero.
    pub avoided_loss_percent: Decimal,
}

impl PostSellPerformance {
    /// `None` for open trades or an unusable sell price.
    pub fn compute(trade: &TradeRecord, current_price: Decimal) -> Option<Self> {
        let sell = trade.sell.as_ref()?;
        let change = percent_change(current_price, sell.price)?;
        Some(Self {
            current_price,
            change_since_sell_percent: change,
            missed_gain_percent: change.max(Decimal::ZERO),
            avoided_loss_percent: (-change).max(Decimal::ZERO),
        })
    }

    pub fn sold_too_early(&self) -> bool {
        self.missed_gain_percent > Decimal::ZERO
    }
}

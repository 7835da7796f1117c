//! Plain-text rendering of a single journal entry.

use super::TradeRecord;
use crate::domain::analysis::PostSellPerformance;
use crate::shared::fmt::{abbr_number, display_percent, display_price};
use std::fmt;

const RULE_WIDTH: usize = 60;

/// `Display` adapter that renders a trade report.
pub struct TradeReport<'a> {
    trade: &'a TradeRecord,
    post_sell: Option<&'a PostSellPerformance>,
}

impl<'a> TradeReport<'a> {
    pub fn new(trade: &'a TradeRecord) -> Self {
        Self {
            trade,
            post_sell: None,
        }
    }

    pub fn with_post_sell(mut self, post_sell: Option<&'a PostSellPerformance>) -> Self {
        self.post_sell = post_sell;
        self
    }
}

impl fmt::Display for TradeReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = self.trade;
        let heavy = "=".repeat(RULE_WIDTH);
        let light = "-".repeat(RULE_WIDTH);

        writeln!(f, "{}", heavy)?;
        writeln!(f, "TRADE REPORT: {} ({})", t.token.symbol, t.token.name)?;
        writeln!(f, "{}", heavy)?;
        writeln!(f, "Status: {}", t.status().as_str().to_uppercase())?;
        if !t.dex_id.is_empty() {
            writeln!(f, "DEX: {}", t.dex_id)?;
        }
        writeln!(f, "Token: {}", t.token.address)?;
        writeln!(f, "Pool: {}", t.pool_address)?;

        writeln!(f, "{}", light)?;
        writeln!(f, "BUY")?;
        writeln!(f, "  Price: ${}", display_price(&t.buy.price))?;
        writeln!(f, "  Amount: ${}", t.buy.amount_usd.round_dp(2))?;
        match &t.buy.market_cap {
            Some(mc) => writeln!(f, "  Market Cap: ${}", abbr_number(mc, 2))?,
            None => writeln!(f, "  Market Cap: N/A")?,
        }
        writeln!(f, "  Time: {}", t.buy.timestamp.to_rfc3339())?;

        if let Some(sell) = &t.sell {
            writeln!(f, "{}", light)?;
            writeln!(f, "SELL")?;
            writeln!(f, "  Price: ${}", display_price(&sell.price))?;
            match &sell.amount_usd {
                Some(amount) => writeln!(f, "  Amount: ${}", amount.round_dp(2))?,
                None => writeln!(f, "  Amount: N/A")?,
            }
            writeln!(f, "  Time: {}", sell.timestamp.to_rfc3339())?;
        }

        if let Some(a) = &t.analysis {
            writeln!(f, "{}", light)?;
            writeln!(f, "PERFORMANCE ({} candles)", a.candle_count)?;
            writeln!(
                f,
                "  Max Price: ${} ({})",
                display_price(&a.max_price),
                display_percent(&a.max_gain_percent)
            )?;
            writeln!(
                f,
                "  Min Price: ${} ({})",
                display_price(&a.min_price),
                display_percent(&a.max_drawdown_percent)
            )?;
            if let Some(pnl) = &a.pnl_percent {
                writeln!(f, "  Realized P&L: {}", display_percent(pnl))?;
            }
            if let Some(captured) = &a.captured_percent {
                writeln!(f, "  Captured of Max: {}%", captured.round_dp(1))?;
            }
        }

        if let Some(p) = self.post_sell {
            writeln!(f, "{}", light)?;
            writeln!(f, "AFTER SELL")?;
            writeln!(f, "  Current Price: ${}", display_price(&p.current_price))?;
            writeln!(f, "  Change Since Sell: {}", display_percent(&p.change_since_sell_percent))?;
            if p.sold_too_early() {
                writeln!(f, "  Missed Gain: {}", display_percent(&p.missed_gain_percent))?;
            } else {
                writeln!(f, "  Avoided Loss: {}", display_percent(&p.avoided_loss_percent))?;
            }
        }

        if !t.notes.is_empty() {
            writeln!(f, "{}", light)?;
            writeln!(f, "Notes: {}", t.notes)?;
        }

        write!(f, "{}", heavy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::PerformanceSummary;
    use crate::domain::token::TokenRef;
    use crate::domain::trade::{BuyLeg, SellLeg};
    use crate::shared::Address;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn closed_trade() -> TradeRecord {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2024, 1, 16, 10, 0, 0).unwrap();
        TradeRecord::new(
            TokenRef {
                address: Address::new("DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263"),
                symbol: "Bonk".to_string(),
                name: "Bonk".to_string(),
            },
            Address::new("pool1"),
            BuyLeg {
                price: dec("0.00002"),
                amount_usd: dec("100"),
                market_cap: Some(dec("1400000000")),
                timestamp: t0,
            },
            t0,
        )
        .with_dex("raydium")
        .with_notes("took profit")
        .with_sell(SellLeg {
            price: dec("0.000025"),
            amount_usd: Some(dec("125")),
            timestamp: t1,
        })
        .with_analysis(Some(PerformanceSummary {
            min_price: dec("0.000018"),
            max_price: dec("0.00003"),
            min_timestamp: t0,
            max_timestamp: t1,
            pnl_percent: Some(dec("25")),
            max_gain_percent: dec("50"),
            max_drawdown_percent: dec("-10"),
            captured_percent: Some(dec("50")),
            candle_count: 24,
        }))
    }

    #[test]
    fn test_report_sections() {
        let text = TradeReport::new(&closed_trade()).to_string();
        assert!(text.contains("TRADE REPORT: Bonk (Bonk)"));
        assert!(text.contains("Status: CLOSED"));
        assert!(text.contains("DEX: raydium"));
        assert!(text.contains("Market Cap: $1.40B"));
        assert!(text.contains("PERFORMANCE (24 candles)"));
        assert!(text.contains("(+50.00%)"));
        assert!(text.contains("Realized P&L: +25.00%"));
        assert!(text.contains("Captured of Max: 50%"));
        assert!(text.contains("Notes: took profit"));
        assert!(!text.contains("AFTER SELL"));
    }

    #[test]
    fn test_report_open_trade_without_analysis() {
        let mut trade = closed_trade().with_analysis(None);
        trade.sell = None;
        let text = TradeReport::new(&trade).to_string();
        assert!(text.contains("Status: OPEN"));
        assert!(!text.contains("SELL"));
        assert!(!text.contains("PERFORMANCE"));
    }

    #[test]
    fn test_report_post_sell() {
        let trade = closed_trade();
        let post = PostSellPerformance {
            current_price: dec("0.00005"),
            change_since_sell_percent: dec("100"),
            missed_gain_percent: dec("100"),
            avoided_loss_percent: Decimal::ZERO,
        };
        let text = TradeReport::new(&trade).with_post_sell(Some(&post)).to_string();
        assert!(text.contains("AFTER SELL"));
        assert!(text.contains("Missed Gain: +100.00%"));
    }
}

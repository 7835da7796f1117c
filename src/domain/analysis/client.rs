//! Analysis sub-client: fetch candles for a trade's pool and attach the result.

use super::{analyze, PostSellPerformance};
use crate::client::JournalClient;
use crate::domain::trade::TradeRecord;
use chrono::Utc;
use futures_util::future::join_all;

pub struct Analysis<'a> {
    pub(crate) client: &'a JournalClient,
}

impl<'a> Analysis<'a> {
    /// One OHLCV request, then analysis as of now. Any fetch failure leaves
    /// the trade with no analysis.
    pub async fn analyze_trade(&self, trade: TradeRecord) -> TradeRecord {
        let candles = self.client.price_history().for_pool(&trade.pool_address).await;
        let summary = analyze(&trade, &candles, Utc::now());

        match &summary {
            Some(s) => tracing::info!(
                trade = %trade.id,
                symbol = %trade.token.symbol,
                candles = s.candle_count,
                max_gain = %s.max_gain_percent.round_dp(2),
                "Analyzed trade"
            ),
            None => tracing::info!(
                trade = %trade.id,
                symbol = %trade.token.symbol,
                fetched = candles.len(),
                "No price data in holding window"
            ),
        }

        trade.with_analysis(summary)
    }

    /// Analyze every trade concurrently. Output order matches input order.
    pub async fn analyze_all(&self, trades: Vec<TradeRecord>) -> Vec<TradeRecord> {
        join_all(trades.into_iter().map(|t| self.analyze_trade(t))).await
    }

    /// Current price versus the exit. `None` for open trades or when no
    /// current price can be found.
    pub async fn post_sell_performance(&self, trade: &TradeRecord) -> Option<PostSellPerformance> {
        trade.sell.as_ref()?;
        let current = match self.client.tokens().current_price(&trade.token.address).await {
            Ok(price) => price?,
            Err(e) => {
                tracing::warn!(token = %trade.token.address, "Current price lookup failed: {}", e);
                return None;
            }
        };
        PostSellPerformance::compute(trade, current)
    }
}

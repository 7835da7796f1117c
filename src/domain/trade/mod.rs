//! Trade domain: journal entries for one buy and an optional matching sell.
//!
//! A [`TradeRecord`] is created once from validated [`NewTrade`] input and is
//! immutable afterwards except for the attached performance analysis.

#[cfg(feature = "http")]
pub mod client;
pub mod report;

use crate::domain::analysis::{percent_change, PerformanceSummary};
use crate::domain::token::{TokenPair, TokenRef};
use crate::error::TradeValidationError;
use crate::shared::serde_util::flexible_datetime;
use crate::shared::Address;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};

pub use report::TradeReport;

// ─── Status ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeStatus {
    Open,
    Closed,
}

impl TradeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

impl std::fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ─── Legs ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuyLeg {
    pub price: Decimal,
    /// Amount spent, in USD.
    pub amount_usd: Decimal,
    /// Informational only.
    #[serde(default)]
    pub market_cap: Option<Decimal>,
    #[serde(with = "flexible_datetime")]
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellLeg {
    pub price: Decimal,
    /// Amount received, in USD.
    #[serde(default)]
    pub amount_usd: Option<Decimal>,
    #[serde(with = "flexible_datetime")]
    pub timestamp: DateTime<Utc>,
}

// ─── TradeRecord ─────────────────────────────────────────────────────────────

/// One journal entry.
///
/// Serialized records carry a `status` field for readers of the JSON file;
/// it is ignored on load and always derived from the sell leg.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TradeRecord {
    pub id: String,
    pub token: TokenRef,
    pub pool_address: Address,
    #[serde(default)]
    pub dex_id: String,
    pub buy: BuyLeg,
    #[serde(default)]
    pub sell: Option<SellLeg>,
    #[serde(default)]
    pub notes: String,
    #[serde(with = "flexible_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub analysis: Option<PerformanceSummary>,
}

impl Serialize for TradeRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        #[derive(Serialize)]
        struct Stored<'a> {
            id: &'a str,
            token: &'a TokenRef,
            pool_address: &'a Address,
            dex_id: &'a str,
            status: TradeStatus,
            buy: &'a BuyLeg,
            sell: &'a Option<SellLeg>,
            notes: &'a str,
            created_at: String,
            analysis: &'a Option<PerformanceSummary>,
        }

        Stored {
            id: &self.id,
            token: &self.token,
            pool_address: &self.pool_address,
            dex_id: &self.dex_id,
            status: self.status(),
            buy: &self.buy,
            sell: &self.sell,
            notes: &self.notes,
            created_at: self.created_at.to_rfc3339(),
            analysis: &self.analysis,
        }
        .serialize(serializer)
    }
}

impl TradeRecord {
    /// An open trade with a fresh id and no analysis.
    pub fn new(token: TokenRef, pool_address: Address, buy: BuyLeg, created_at: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            token,
            pool_address,
            dex_id: String::new(),
            buy,
            sell: None,
            notes: String::new(),
            created_at,
            analysis: None,
        }
    }

    /// Build a record from validated input and the pair it trades on.
    ///
    /// The pair supplies symbol, name, pool, DEX and the market cap at entry.
    /// Call [`NewTrade::validate`] first.
    pub fn from_new(new: NewTrade, pair: &TokenPair, now: DateTime<Utc>) -> Self {
        let token = TokenRef {
            address: new.token_address,
            symbol: pair.base_token.symbol.clone(),
            name: pair.base_token.name.clone(),
        };
        let buy = BuyLeg {
            price: new.buy_price,
            amount_usd: new.buy_amount_usd,
            market_cap: pair.market_cap,
            timestamp: new.buy_timestamp,
        };

        let mut record = Self::new(token, pair.pair_address.clone(), buy, now)
            .with_dex(&pair.dex_id)
            .with_notes(&new.notes);
        record.sell = new.sell;
        record
    }

    pub fn with_dex(mut self, dex_id: &str) -> Self {
        self.dex_id = dex_id.to_string();
        self
    }

    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = notes.to_string();
        self
    }

    pub fn with_sell(mut self, sell: SellLeg) -> Self {
        self.sell = Some(sell);
        self
    }

    /// Replace the attached analysis; `None` records that none was possible.
    pub fn with_analysis(mut self, analysis: Option<PerformanceSummary>) -> Self {
        self.analysis = analysis;
        self
    }

    pub fn status(&self) -> TradeStatus {
        if self.sell.is_some() {
            TradeStatus::Closed
        } else {
            TradeStatus::Open
        }
    }

    pub fn is_open(&self) -> bool {
        self.status() == TradeStatus::Open
    }

    /// End of the holding window: the sell instant, or `now` while open.
    pub fn window_end(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.sell.as_ref().map(|s| s.timestamp).unwrap_or(now)
    }

    /// Realized profit in percent of the buy price, from the legs alone.
    pub fn realized_pnl_percent(&self) -> Option<Decimal> {
        let sell = self.sell.as_ref()?;
        percent_change(sell.price, self.buy.price)
    }

    /// Closed above the buy price.
    pub fn is_win(&self) -> bool {
        self.sell.as_ref().is_some_and(|s| s.price > self.buy.price)
    }
}

// ─── NewTrade ────────────────────────────────────────────────────────────────

/// User input for a manual journal entry, before token lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTrade {
    pub token_address: Address,
    pub buy_price: Decimal,
    pub buy_amount_usd: Decimal,
    pub buy_timestamp: DateTime<Utc>,
    pub sell: Option<SellLeg>,
    pub notes: String,
}

impl NewTrade {
    pub fn buy(
        token_address: impl Into<Address>,
        price: Decimal,
        amount_usd: Decimal,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            token_address: token_address.into(),
            buy_price: price,
            buy_amount_usd: amount_usd,
            buy_timestamp: timestamp,
            sell: None,
            notes: String::new(),
        }
    }

    pub fn sold(mut self, price: Decimal, amount_usd: Option<Decimal>, timestamp: DateTime<Utc>) -> Self {
        self.sell = Some(SellLeg {
            price,
            amount_usd,
            timestamp,
        });
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Reject input the analyzer cannot make sense of.
    pub fn validate(&self) -> Result<(), TradeValidationError> {
        if self.token_address.is_empty() {
            return Err(TradeValidationError::MissingTokenAddress);
        }
        self.token_address
            .validate()
            .map_err(|_| TradeValidationError::InvalidAddress(self.token_address.to_string()))?;

        if self.buy_price <= Decimal::ZERO {
            return Err(TradeValidationError::NonPositiveBuyPrice(self.buy_price.to_string()));
        }
        if self.buy_amount_usd < Decimal::ZERO {
            return Err(TradeValidationError::NegativeBuyAmount(
                self.buy_amount_usd.to_string(),
            ));
        }

        if let Some(sell) = &self.sell {
            if sell.price <= Decimal::ZERO {
                return Err(TradeValidationError::NonPositiveSellPrice(sell.price.to_string()));
            }
            if let Some(amount) = sell.amount_usd.filter(|a| *a < Decimal::ZERO) {
                return Err(TradeValidationError::NegativeSellAmount(amount.to_string()));
            }
            if sell.timestamp < self.buy_timestamp {
                return Err(TradeValidationError::SellBeforeBuy {
                    buy: self.buy_timestamp.to_rfc3339(),
                    sell: sell.timestamp.to_rfc3339(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::NetworkId;
    use chrono::TimeZone;
    use std::str::FromStr;

    const BONK_MINT: &str = "DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263";

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, hour, 0, 0).unwrap()
    }

    fn sample_pair() -> TokenPair {
        TokenPair {
            chain_id: NetworkId::default(),
            dex_id: "raydium".to_string(),
            pair_address: Address::new("pool1"),
            base_token: TokenRef {
                address: Address::new(BONK_MINT),
                symbol: "Bonk".to_string(),
                name: "Bonk".to_string(),
            },
            quote_token: TokenRef::unknown(Address::new("So11111111111111111111111111111111111111112")),
            url: None,
            price_usd: Some(dec("0.00002")),
            price_native: None,
            market_cap: Some(dec("1400000000")),
            fdv: None,
            volume_24h: None,
            liquidity_usd: None,
            price_change_24h: None,
            created_at: None,
        }
    }

    #[test]
    fn test_validate_accepts_open_and_closed() {
        let open = NewTrade::buy(BONK_MINT, dec("0.00002"), dec("100"), at(10));
        assert!(open.validate().is_ok());
        let closed = open.sold(dec("0.00003"), Some(dec("150")), at(12));
        assert!(closed.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_non_positive_buy_price() {
        let zero = NewTrade::buy(BONK_MINT, Decimal::ZERO, dec("100"), at(10));
        assert_eq!(
            zero.validate(),
            Err(TradeValidationError::NonPositiveBuyPrice("0".to_string()))
        );
        let negative = NewTrade::buy(BONK_MINT, dec("-1"), dec("100"), at(10));
        assert!(matches!(
            negative.validate(),
            Err(TradeValidationError::NonPositiveBuyPrice(_))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_address() {
        let empty = NewTrade::buy("", dec("1"), dec("1"), at(10));
        assert_eq!(empty.validate(), Err(TradeValidationError::MissingTokenAddress));
        let bogus = NewTrade::buy("0xdeadbeef", dec("1"), dec("1"), at(10));
        assert!(matches!(bogus.validate(), Err(TradeValidationError::InvalidAddress(_))));
    }

    #[test]
    fn test_validate_rejects_swapped_timestamps() {
        let trade = NewTrade::buy(BONK_MINT, dec("1"), dec("1"), at(12)).sold(dec("2"), None, at(10));
        assert!(matches!(
            trade.validate(),
            Err(TradeValidationError::SellBeforeBuy { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_bad_sell_leg() {
        let base = NewTrade::buy(BONK_MINT, dec("1"), dec("1"), at(10));
        assert!(matches!(
            base.clone().sold(Decimal::ZERO, None, at(11)).validate(),
            Err(TradeValidationError::NonPositiveSellPrice(_))
        ));
        assert!(matches!(
            base.sold(dec("1"), Some(dec("-5")), at(11)).validate(),
            Err(TradeValidationError::NegativeSellAmount(_))
        ));
    }

    #[test]
    fn test_from_new_takes_identity_from_pair() {
        let new = NewTrade::buy(BONK_MINT, dec("0.00002"), dec("100"), at(10)).with_notes("dip buy");
        let record = TradeRecord::from_new(new, &sample_pair(), at(11));
        assert_eq!(record.token.symbol, "Bonk");
        assert_eq!(record.pool_address.as_str(), "pool1");
        assert_eq!(record.dex_id, "raydium");
        assert_eq!(record.buy.market_cap, Some(dec("1400000000")));
        assert_eq!(record.notes, "dip buy");
        assert_eq!(record.created_at, at(11));
        assert_eq!(record.status(), TradeStatus::Open);
        assert!(uuid::Uuid::parse_str(&record.id).is_ok());
    }

    #[test]
    fn test_status_and_window_end() {
        let new = NewTrade::buy(BONK_MINT, dec("2"), dec("100"), at(10));
        let open = TradeRecord::from_new(new.clone(), &sample_pair(), at(10));
        assert!(open.is_open());
        assert_eq!(open.window_end(at(20)), at(20));

        let closed = TradeRecord::from_new(new.sold(dec("2.5"), None, at(14)), &sample_pair(), at(10));
        assert_eq!(closed.status(), TradeStatus::Closed);
        assert_eq!(closed.window_end(at(20)), at(14));
        assert_eq!(closed.realized_pnl_percent(), Some(dec("25")));
        assert!(closed.is_win());
    }

    #[test]
    fn test_status_is_written_but_not_trusted() {
        let record = TradeRecord::from_new(
            NewTrade::buy(BONK_MINT, dec("2"), dec("100"), at(10)),
            &sample_pair(),
            at(10),
        );
        let mut json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["status"], "open");

        json["status"] = serde_json::Value::from("closed");
        let back: TradeRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back.status(), TradeStatus::Open);
        assert_eq!(back, record);
    }

    #[test]
    fn test_loads_hand_written_timestamps() {
        let json = format!(
            r#"{{
                "id": "trade_1705312800_DezXAZ8z",
                "token": {{"address": "{}", "symbol": "Bonk", "name": "Bonk"}},
                "pool_address": "pool1",
                "buy": {{"price": "0.00002", "amount_usd": "100", "timestamp": "2024-01-15T10:00:00"}},
                "sell": {{"price": "0.00003", "timestamp": 1705320000000}},
                "created_at": "2024-01-15T10:05:00Z"
            }}"#,
            BONK_MINT
        );
        let record: TradeRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record.buy.timestamp, at(10));
        assert_eq!(record.sell.as_ref().map(|s| s.timestamp), Some(at(12)));
        assert!(record.analysis.is_none());
        assert_eq!(record.dex_id, "");
    }
}

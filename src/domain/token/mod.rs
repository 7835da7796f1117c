//! Token domain: DexScreener pairs, token identity, boosted listings.

#[cfg(feature = "http")]
pub mod client;
pub mod convert;
pub mod wire;

use crate::shared::{Address, NetworkId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identity of a token as shown to the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRef {
    pub address: Address,
    pub symbol: String,
    pub name: String,
}

impl TokenRef {
    /// Placeholder identity for a token no provider knows about.
    pub fn unknown(address: Address) -> Self {
        Self {
            address,
            symbol: "UNKNOWN".to_string(),
            name: "Unknown".to_string(),
        }
    }
}

/// A trading pair (pool) as listed by DexScreener.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenPair {
    pub chain_id: NetworkId,
    pub dex_id: String,
    pub pair_address: Address,
    pub base_token: TokenRef,
    pub quote_token: TokenRef,
    pub url: Option<String>,
    pub price_usd: Option<Decimal>,
    pub price_native: Option<Decimal>,
    pub market_cap: Option<Decimal>,
    pub fdv: Option<Decimal>,
    pub volume_24h: Option<Decimal>,
    pub liquidity_usd: Option<Decimal>,
    pub price_change_24h: Option<Decimal>,
    pub created_at: Option<DateTime<Utc>>,
}

impl TokenPair {
    pub fn is_on(&self, network: &NetworkId) -> bool {
        &self.chain_id == network
    }
}

/// A token currently promoted on DexScreener.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoostedToken {
    pub chain_id: NetworkId,
    pub token_address: Address,
    pub amount: Option<Decimal>,
    pub total_amount: Option<Decimal>,
    pub url: Option<String>,
    pub description: Option<String>,
}

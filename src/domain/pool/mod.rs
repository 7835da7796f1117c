//! Pool domain: GeckoTerminal liquidity pools, the key for OHLCV lookups.

#[cfg(feature = "http")]
pub mod client;
pub mod wire;

use crate::shared::serde_util::parse_datetime;
use crate::shared::{Address, NetworkId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use wire::{PoolResource, PoolTradeResource, Relationship};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolInfo {
    pub address: Address,
    pub name: String,
    pub dex_id: Option<String>,
    pub base_token: Option<Address>,
    pub quote_token: Option<Address>,
    pub base_token_price_usd: Option<Decimal>,
    pub reserve_usd: Option<Decimal>,
    pub market_cap_usd: Option<Decimal>,
    pub pool_created_at: Option<DateTime<Utc>>,
}

impl PoolInfo {
    /// Convert a JSON:API pool resource. The address falls back to the
    /// resource id with its `{network}_` prefix removed.
    pub fn from_resource(resource: PoolResource, network: &NetworkId) -> Self {
        let attrs = resource.attributes.unwrap_or_default();
        let rel = resource.relationships.unwrap_or_default();

        let address = attrs
            .address
            .unwrap_or_else(|| strip_network(&resource.id, network).to_string());

        Self {
            address: Address::from(address),
            name: attrs.name.unwrap_or_default(),
            dex_id: related_id(rel.dex, None),
            base_token: related_id(rel.base_token, Some(network)).map(Address::from),
            quote_token: related_id(rel.quote_token, Some(network)).map(Address::from),
            base_token_price_usd: decimal(attrs.base_token_price_usd),
            reserve_usd: decimal(attrs.reserve_in_usd),
            market_cap_usd: decimal(attrs.market_cap_usd),
            pool_created_at: attrs.pool_created_at.as_deref().and_then(parse_datetime),
        }
    }
}

/// Direction of an on-chain swap, relative to the pool's base token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwapKind {
    Buy,
    Sell,
}

impl SwapKind {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "buy" => Some(SwapKind::Buy),
            "sell" => Some(SwapKind::Sell),
            _ => None,
        }
    }
}

/// A recent swap in a pool, as reported by GeckoTerminal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolTrade {
    pub tx_hash: String,
    pub kind: Option<SwapKind>,
    pub wallet: Option<Address>,
    pub block_number: Option<u64>,
    pub block_timestamp: Option<DateTime<Utc>>,
    pub from_token_amount: Option<Decimal>,
    pub to_token_amount: Option<Decimal>,
    /// USD price of the base token in this swap: the received side of a
    /// buy, the sold side of a sell.
    pub token_price_usd: Option<Decimal>,
    pub volume_usd: Option<Decimal>,
}

impl PoolTrade {
    /// The transaction hash falls back to the resource id.
    pub fn from_resource(resource: PoolTradeResource) -> Self {
        let attrs = resource.attributes.unwrap_or_default();
        let kind = attrs.kind.as_deref().and_then(SwapKind::parse);
        let token_price_usd = match kind {
            Some(SwapKind::Buy) => decimal(attrs.price_to_in_usd),
            Some(SwapKind::Sell) => decimal(attrs.price_from_in_usd),
            None => None,
        };

        Self {
            tx_hash: attrs.tx_hash.unwrap_or(resource.id),
            kind,
            wallet: attrs.tx_from_address.map(Address::from),
            block_number: attrs.block_number,
            block_timestamp: attrs.block_timestamp.as_deref().and_then(parse_datetime),
            from_token_amount: decimal(attrs.from_token_amount),
            to_token_amount: decimal(attrs.to_token_amount),
            token_price_usd,
            volume_usd: decimal(attrs.volume_in_usd),
        }
    }
}

fn strip_network<'a>(id: &'a str, network: &NetworkId) -> &'a str {
    id.strip_prefix(network.as_str())
        .and_then(|rest| rest.strip_prefix('_'))
        .unwrap_or(id)
}

fn related_id(rel: Option<Relationship>, network: Option<&NetworkId>) -> Option<String> {
    let id = rel?.data?.id;
    Some(match network {
        Some(n) => strip_network(&id, n).to_string(),
        None => id,
    })
}

fn decimal(raw: Option<String>) -> Option<Decimal> {
    raw.and_then(|s| Decimal::from_str(s.trim()).ok())
}

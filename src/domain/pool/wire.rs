//! Wire types for GeckoTerminal pool resources (JSON:API, numbers as strings).

use serde::{Deserialize, Serialize};

/// `GET /networks/{network}/pools/{pool}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoolEnvelope {
    #[serde(default)]
    pub data: Option<PoolResource>,
}

/// `GET /search/pools` and `GET /networks/{network}/tokens/{token}/pools`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoolListEnvelope {
    #[serde(default)]
    pub data: Vec<PoolResource>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolResource {
    /// `{network}_{address}`.
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub attributes: Option<PoolAttributes>,
    #[serde(default)]
    pub relationships: Option<PoolRelationships>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoolAttributes {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub base_token_price_usd: Option<String>,
    #[serde(default)]
    pub quote_token_price_usd: Option<String>,
    #[serde(default)]
    pub reserve_in_usd: Option<String>,
    #[serde(default)]
    pub fdv_usd: Option<String>,
    #[serde(default)]
    pub market_cap_usd: Option<String>,
    #[serde(default)]
    pub pool_created_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoolRelationships {
    #[serde(default)]
    pub base_token: Option<Relationship>,
    #[serde(default)]
    pub quote_token: Option<Relationship>,
    #[serde(default)]
    pub dex: Option<Relationship>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Relationship {
    #[serde(default)]
    pub data: Option<ResourceId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceId {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// `GET /networks/{network}/pools/{pool}/trades`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoolTradesEnvelope {
    #[serde(default)]
    pub data: Vec<PoolTradeResource>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolTradeResource {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub attributes: Option<PoolTradeAttributes>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoolTradeAttributes {
    #[serde(default)]
    pub block_number: Option<u64>,
    #[serde(default)]
    pub tx_hash: Option<String>,
    #[serde(default)]
    pub tx_from_address: Option<String>,
    #[serde(default)]
    pub from_token_amount: Option<String>,
    #[serde(default)]
    pub to_token_amount: Option<String>,
    #[serde(default)]
    pub price_from_in_usd: Option<String>,
    #[serde(default)]
    pub price_to_in_usd: Option<String>,
    #[serde(default)]
    pub block_timestamp: Option<String>,
    /// `"buy"` or `"sell"`, from the pool's base token point of view.
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub volume_in_usd: Option<String>,
}

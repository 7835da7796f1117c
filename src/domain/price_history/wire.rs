//! Wire types for the GeckoTerminal OHLCV endpoint.
//!
//! `GET /networks/{network}/pools/{pool}/ohlcv/{timeframe}` answers with a
//! JSON:API envelope whose candles are positional arrays:
//! `[timestamp_seconds, open, high, low, close, volume]`.

use serde::{Deserialize, Serialize};

/// One positional candle row, kept as raw JSON so a single bad row can be
/// dropped without failing the whole response.
pub type OhlcvRow = Vec<serde_json::Value>;

/// REST response for an OHLCV request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OhlcvResponse {
    #[serde(default)]
    pub data: Option<OhlcvData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<OhlcvMeta>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OhlcvData {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub attributes: Option<OhlcvAttributes>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OhlcvAttributes {
    #[serde(default)]
    pub ohlcv_list: Vec<OhlcvRow>,
}

/// Base/quote token descriptors that accompany the candles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OhlcvMeta {
    #[serde(default)]
    pub base: Option<OhlcvToken>,
    #[serde(default)]
    pub quote: Option<OhlcvToken>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OhlcvToken {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
}

impl OhlcvResponse {
    /// The candle rows, or nothing when any level of the envelope is missing.
    pub fn into_rows(self) -> Vec<OhlcvRow> {
        self.data
            .and_then(|d| d.attributes)
            .map(|a| a.ohlcv_list)
            .unwrap_or_default()
    }
}

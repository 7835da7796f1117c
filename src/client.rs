//! High-level client: `JournalClient` with nested sub-client accessors.
//!
//! Each domain keeps its sub-client in `domain/<name>/client.rs`. This module
//! holds the builder, the shared configuration and the accessor methods.

use crate::domain::analysis::client::Analysis;
use crate::domain::pool::client::Pools;
use crate::domain::price_history::client::PriceHistory;
use crate::domain::price_history::OhlcvDefaults;
use crate::domain::token::client::Tokens;
use crate::domain::trade::client::Trades;
use crate::error::JournalError;
use crate::http::client::DEFAULT_TIMEOUT;
use crate::http::{JournalHttp, RetryPolicy};
use crate::network::{
    DEFAULT_DEXSCREENER_URL, DEFAULT_GECKOTERMINAL_URL, DEXSCREENER_URL_ENV,
    GECKOTERMINAL_URL_ENV, NETWORK_ENV,
};
use crate::shared::NetworkId;

use std::time::Duration;

pub use crate::domain::analysis::client::Analysis as AnalysisClient;
pub use crate::domain::pool::client::Pools as PoolsClient;
pub use crate::domain::price_history::client::PriceHistory as PriceHistoryClient;
pub use crate::domain::token::client::Tokens as TokensClient;
pub use crate::domain::trade::client::Trades as TradesClient;

/// The primary entry point.
///
/// `client.tokens()`, `client.price_history()`, `client.analysis()`, etc.
/// Cloning is cheap; the underlying connection pool is shared.
#[derive(Clone)]
pub struct JournalClient {
    pub(crate) http: JournalHttp,
    pub(crate) network: NetworkId,
    pub(crate) ohlcv_defaults: OhlcvDefaults,
}

impl JournalClient {
    pub fn builder() -> JournalClientBuilder {
        JournalClientBuilder::default()
    }

    pub fn network(&self) -> &NetworkId {
        &self.network
    }

    pub fn ohlcv_defaults(&self) -> &OhlcvDefaults {
        &self.ohlcv_defaults
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn tokens(&self) -> Tokens<'_> {
        Tokens { client: self }
    }

    pub fn pools(&self) -> Pools<'_> {
        Pools { client: self }
    }

    pub fn price_history(&self) -> PriceHistory<'_> {
        PriceHistory { client: self }
    }

    pub fn trades(&self) -> Trades<'_> {
        Trades { client: self }
    }

    pub fn analysis(&self) -> Analysis<'_> {
        Analysis { client: self }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct JournalClientBuilder {
    geckoterminal_url: String,
    dexscreener_url: String,
    network: NetworkId,
    timeout: Duration,
    retry_policy: RetryPolicy,
    ohlcv_defaults: OhlcvDefaults,
}

impl Default for JournalClientBuilder {
    fn default() -> Self {
        Self {
            geckoterminal_url: DEFAULT_GECKOTERMINAL_URL.to_string(),
            dexscreener_url: DEFAULT_DEXSCREENER_URL.to_string(),
            network: NetworkId::default(),
            timeout: DEFAULT_TIMEOUT,
            retry_policy: RetryPolicy::Idempotent,
            ohlcv_defaults: OhlcvDefaults::default(),
        }
    }
}

impl JournalClientBuilder {
    /// Defaults overridden by `GECKOTERMINAL_API_URL`, `DEXSCREENER_API_URL`
    /// and `JOURNAL_NETWORK` when set and non-empty.
    pub fn from_env() -> Self {
        let var = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());
        let mut builder = Self::default();
        if let Some(url) = var(GECKOTERMINAL_URL_ENV) {
            builder = builder.geckoterminal_url(&url);
        }
        if let Some(url) = var(DEXSCREENER_URL_ENV) {
            builder = builder.dexscreener_url(&url);
        }
        if let Some(network) = var(NETWORK_ENV) {
            builder = builder.network(network.trim());
        }
        builder
    }

    pub fn geckoterminal_url(mut self, url: &str) -> Self {
        self.geckoterminal_url = url.to_string();
        self
    }

    pub fn dexscreener_url(mut self, url: &str) -> Self {
        self.dexscreener_url = url.to_string();
        self
    }

    pub fn network(mut self, network: impl Into<NetworkId>) -> Self {
        self.network = network.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Retry policy for lookup endpoints. Candle fetches are never retried.
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    pub fn ohlcv_defaults(mut self, defaults: OhlcvDefaults) -> Self {
        self.ohlcv_defaults = defaults;
        self
    }

    pub fn build(self) -> Result<JournalClient, JournalError> {
        if self.network.as_str().is_empty() {
            return Err(JournalError::Validation("Network must not be empty".to_string()));
        }
        self.ohlcv_defaults
            .query_for(self.network.clone(), "defaults".into())
            .validate()
            .map_err(|e| JournalError::Validation(format!("Invalid OHLCV defaults: {}", e)))?;

        Ok(JournalClient {
            http: JournalHttp::new(
                &self.geckoterminal_url,
                &self.dexscreener_url,
                self.timeout,
                self.retry_policy,
            )?,
            network: self.network,
            ohlcv_defaults: self.ohlcv_defaults,
        })
    }
}

//! Low-level HTTP client: `JournalHttp`.
//!
//! One method per upstream endpoint. Returns wire types; conversion to domain
//! types happens in the sub-clients. Two providers sit behind it:
//! GeckoTerminal (pools, OHLCV) and DexScreener (pairs, boosts).

use crate::domain::pool::wire::{PoolEnvelope, PoolListEnvelope, PoolTradesEnvelope};
use crate::domain::price_history::wire::OhlcvResponse;
use crate::domain::price_history::OhlcvQuery;
use crate::domain::token::wire::{BoostResponse, PairResponse, PairsEnvelope};
use crate::error::HttpError;
use crate::http::retry::RetryPolicy;
use crate::shared::{Address, NetworkId};

use reqwest::header::{ACCEPT, RETRY_AFTER};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// DexScreener accepts at most this many addresses per `/tokens/v1` call.
pub const MAX_TOKENS_PER_REQUEST: usize = 30;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Low-level HTTP client for the GeckoTerminal and DexScreener REST APIs.
#[derive(Clone)]
pub struct JournalHttp {
    geckoterminal_url: String,
    dexscreener_url: String,
    client: Client,
    /// Policy for lookup endpoints. OHLCV ignores it.
    retry: RetryPolicy,
}

impl JournalHttp {
    pub fn new(
        geckoterminal_url: &str,
        dexscreener_url: &str,
        timeout: Duration,
        retry: RetryPolicy,
    ) -> Result<Self, HttpError> {
        let client = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(4)
            .build()?;

        Ok(Self {
            geckoterminal_url: geckoterminal_url.trim_end_matches('/').to_string(),
            dexscreener_url: dexscreener_url.trim_end_matches('/').to_string(),
            client,
            retry,
        })
    }

    pub fn geckoterminal_url(&self) -> &str {
        &self.geckoterminal_url
    }

    pub fn dexscreener_url(&self) -> &str {
        &self.dexscreener_url
    }

    // ── GeckoTerminal ────────────────────────────────────────────────────

    /// One request, never retried.
    pub async fn get_ohlcv(&self, query: &OhlcvQuery) -> Result<OhlcvResponse, HttpError> {
        let url = format!(
            "{}/networks/{}/pools/{}/ohlcv/{}?aggregate={}&limit={}&currency={}",
            self.geckoterminal_url,
            urlencoding::encode(query.network.as_str()),
            urlencoding::encode(query.pool_address.as_str()),
            query.timeframe.as_str(),
            query.aggregate,
            query.limit,
            query.currency.as_str()
        );
        self.get(&url, &RetryPolicy::None).await
    }

    pub async fn get_pool(
        &self,
        network: &NetworkId,
        pool: &Address,
    ) -> Result<PoolEnvelope, HttpError> {
        let url = format!(
            "{}/networks/{}/pools/{}",
            self.geckoterminal_url,
            urlencoding::encode(network.as_str()),
            urlencoding::encode(pool.as_str())
        );
        self.get(&url, &self.retry).await
    }

    pub async fn search_pools(
        &self,
        network: &NetworkId,
        query: &str,
    ) -> Result<PoolListEnvelope, HttpError> {
        let url = format!(
            "{}/search/pools?query={}&network={}",
            self.geckoterminal_url,
            urlencoding::encode(query),
            urlencoding::encode(network.as_str())
        );
        self.get(&url, &self.retry).await
    }

    pub async fn get_token_pools(
        &self,
        network: &NetworkId,
        token: &Address,
    ) -> Result<PoolListEnvelope, HttpError> {
        let url = format!(
            "{}/networks/{}/tokens/{}/pools",
            self.geckoterminal_url,
            urlencoding::encode(network.as_str()),
            urlencoding::encode(token.as_str())
        );
        self.get(&url, &self.retry).await
    }

    /// Recent swaps in `pool`. The volume filter is sent only when positive.
    pub async fn get_pool_trades(
        &self,
        network: &NetworkId,
        pool: &Address,
        min_volume_usd: Decimal,
    ) -> Result<PoolTradesEnvelope, HttpError> {
        let mut url = format!(
            "{}/networks/{}/pools/{}/trades",
            self.geckoterminal_url,
            urlencoding::encode(network.as_str()),
            urlencoding::encode(pool.as_str())
        );
        if min_volume_usd > Decimal::ZERO {
            url.push_str(&format!(
                "?trade_volume_in_usd_greater_than={}",
                min_volume_usd.normalize()
            ));
        }
        self.get(&url, &self.retry).await
    }

    // ── DexScreener ──────────────────────────────────────────────────────

    pub async fn search_pairs(&self, query: &str) -> Result<PairsEnvelope, HttpError> {
        let url = format!(
            "{}/latest/dex/search?q={}",
            self.dexscreener_url,
            urlencoding::encode(query)
        );
        self.get(&url, &self.retry).await
    }

    pub async fn get_token_pairs(
        &self,
        chain: &NetworkId,
        token: &Address,
    ) -> Result<Vec<PairResponse>, HttpError> {
        let url = format!(
            "{}/token-pairs/v1/{}/{}",
            self.dexscreener_url,
            urlencoding::encode(chain.as_str()),
            urlencoding::encode(token.as_str())
        );
        self.get_list(&url).await
    }

    pub async fn get_pair(
        &self,
        chain: &NetworkId,
        pair: &Address,
    ) -> Result<PairsEnvelope, HttpError> {
        let url = format!(
            "{}/latest/dex/pairs/{}/{}",
            self.dexscreener_url,
            urlencoding::encode(chain.as_str()),
            urlencoding::encode(pair.as_str())
        );
        self.get(&url, &self.retry).await
    }

    /// Addresses beyond [`MAX_TOKENS_PER_REQUEST`] are dropped.
    pub async fn get_tokens(
        &self,
        chain: &NetworkId,
        tokens: &[Address],
    ) -> Result<Vec<PairResponse>, HttpError> {
        if tokens.len() > MAX_TOKENS_PER_REQUEST {
            tracing::debug!(
                requested = tokens.len(),
                "Truncating token batch to {}",
                MAX_TOKENS_PER_REQUEST
            );
        }
        let joined = tokens
            .iter()
            .take(MAX_TOKENS_PER_REQUEST)
            .map(|a| urlencoding::encode(a.as_str()).into_owned())
            .collect::<Vec<_>>()
            .join(",");
        let url = format!(
            "{}/tokens/v1/{}/{}",
            self.dexscreener_url,
            urlencoding::encode(chain.as_str()),
            joined
        );
        self.get_list(&url).await
    }

    pub async fn get_latest_boosted(&self) -> Result<Vec<BoostResponse>, HttpError> {
        let url = format!("{}/token-boosts/latest/v1", self.dexscreener_url);
        self.get_list(&url).await
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    /// DexScreener list endpoints answer `null` instead of `[]` for unknown tokens.
    async fn get_list<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>, HttpError> {
        let list: Option<Vec<T>> = self.get(url, &self.retry).await?;
        Ok(list.unwrap_or_default())
    }

    async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        retry: &RetryPolicy,
    ) -> Result<T, HttpError> {
        let config = match retry.config() {
            Some(c) => c,
            None => return self.do_get(url).await,
        };

        let mut last_error = None;

        for attempt in 0..=config.max_retries {
            match self.do_get::<T>(url).await {
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    let should_retry = match &e {
                        HttpError::ServerError { status, .. } => {
                            config.is_retryable_status(*status)
                        }
                        HttpError::RateLimited { .. } => config.is_retryable_status(429),
                        HttpError::Timeout => true,
                        HttpError::Reqwest(re) => re.is_connect() || re.is_request(),
                        _ => false,
                    };

                    if should_retry && attempt < config.max_retries {
                        let retry_after = match &e {
                            HttpError::RateLimited { retry_after_ms } => {
                                retry_after_ms.map(Duration::from_millis)
                            }
                            _ => None,
                        };
                        let delay = config.delay_with_hint(attempt, retry_after);
                        tracing::debug!(
                            attempt = attempt + 1,
                            max = config.max_retries,
                            delay_ms = delay.as_millis() as u64,
                            "Retrying request to {}",
                            url
                        );
                        futures_timer::Delay::new(delay).await;
                        last_error = Some(e);
                    } else {
                        return Err(e);
                    }
                }
            }
        }

        Err(HttpError::MaxRetriesExceeded {
            attempts: config.max_retries + 1,
            last_error: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        })
    }

    async fn do_get<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
        let resp = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport)?;
        let status = resp.status();

        if status.is_success() {
            return resp.json::<T>().await.map_err(map_transport);
        }

        let status_code = status.as_u16();
        let retry_after_ms = resp
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(|secs| secs.saturating_mul(1000));
        let body_text = resp.text().await.unwrap_or_default();

        match status_code {
            404 => Err(HttpError::NotFound(body_text)),
            429 => Err(HttpError::RateLimited { retry_after_ms }),
            400..=499 => Err(HttpError::BadRequest(body_text)),
            _ => Err(HttpError::ServerError {
                status: status_code,
                body: body_text,
            }),
        }
    }
}

fn map_transport(err: reqwest::Error) -> HttpError {
    if err.is_timeout() {
        HttpError::Timeout
    } else {
        HttpError::Reqwest(err)
    }
}

//! Price history sub-client: OHLCV candles for a pool.

use super::{CandleSeries, OhlcvQuery};
use crate::client::JournalClient;
use crate::error::JournalError;
use crate::shared::Address;

/// Sub-client for candle queries.
pub struct PriceHistory<'a> {
    pub(crate) client: &'a JournalClient,
}

impl<'a> PriceHistory<'a> {
    /// Query for `pool` on the client's network with the configured defaults.
    pub fn query(&self, pool: &Address) -> OhlcvQuery {
        self.client
            .ohlcv_defaults
            .query_for(self.client.network.clone(), pool.clone())
    }

    /// Fetch and normalize candles, surfacing every failure.
    ///
    /// Exactly one request; rows that cannot be read as candles are dropped.
    pub async fn try_fetch(&self, query: &OhlcvQuery) -> Result<CandleSeries, JournalError> {
        query
            .validate()
            .map_err(|e| JournalError::Validation(e.to_string()))?;
        let resp = self.client.http.get_ohlcv(query).await?;
        let series = CandleSeries::from(resp);
        tracing::debug!(
            pool = %query.pool_address,
            timeframe = %query.timeframe,
            candles = series.len(),
            "Fetched OHLCV"
        );
        Ok(series)
    }

    /// Like [`try_fetch`](Self::try_fetch) but never fails: any error is
    /// logged and becomes an empty series, which callers read as "no data".
    pub async fn fetch(&self, query: &OhlcvQuery) -> CandleSeries {
        match self.try_fetch(query).await {
            Ok(series) => series,
            Err(e) => {
                tracing::warn!(pool = %query.pool_address, "OHLCV fetch failed: {}", e);
                CandleSeries::empty()
            }
        }
    }

    /// [`fetch`](Self::fetch) with the default query for `pool`.
    pub async fn for_pool(&self, pool: &Address) -> CandleSeries {
        self.fetch(&self.query(pool)).await
    }
}

//! Pools sub-client: GeckoTerminal pool lookups.

use super::{PoolInfo, PoolTrade};
use crate::client::JournalClient;
use crate::error::{HttpError, JournalError};
use crate::shared::Address;
use rust_decimal::Decimal;

pub struct Pools<'a> {
    pub(crate) client: &'a JournalClient,
}

impl<'a> Pools<'a> {
    /// `Ok(None)` when GeckoTerminal does not know the pool.
    pub async fn get(&self, pool: &Address) -> Result<Option<PoolInfo>, JournalError> {
        let network = &self.client.network;
        match self.client.http.get_pool(network, pool).await {
            Ok(env) => Ok(env.data.map(|r| PoolInfo::from_resource(r, network))),
            Err(HttpError::NotFound(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn search(&self, query: &str) -> Result<Vec<PoolInfo>, JournalError> {
        let network = &self.client.network;
        let resp = self.client.http.search_pools(network, query).await?;
        Ok(resp
            .data
            .into_iter()
            .map(|r| PoolInfo::from_resource(r, network))
            .collect())
    }

    /// Pools trading `token` on the client's network.
    pub async fn for_token(&self, token: &Address) -> Result<Vec<PoolInfo>, JournalError> {
        let network = &self.client.network;
        let resp = self.client.http.get_token_pools(network, token).await?;
        Ok(resp
            .data
            .into_iter()
            .map(|r| PoolInfo::from_resource(r, network))
            .collect())
    }

    /// Recent swaps in `pool`. Pass `Decimal::ZERO` for no volume filter.
    pub async fn trades(
        &self,
        pool: &Address,
        min_volume_usd: Decimal,
    ) -> Result<Vec<PoolTrade>, JournalError> {
        let network = &self.client.network;
        let resp = self
            .client
            .http
            .get_pool_trades(network, pool, min_volume_usd)
            .await?;
        Ok(resp.data.into_iter().map(PoolTrade::from_resource).collect())
    }
}

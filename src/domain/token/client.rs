//! Tokens sub-client: DexScreener search and pair lookups.

use super::{BoostedToken, TokenPair};
use crate::client::JournalClient;
use crate::error::JournalError;
use crate::shared::Address;
use rust_decimal::Decimal;

pub struct Tokens<'a> {
    pub(crate) client: &'a JournalClient,
}

impl<'a> Tokens<'a> {
    /// Search by name, symbol or address. Pairs on other chains are dropped.
    pub async fn search(&self, query: &str) -> Result<Vec<TokenPair>, JournalError> {
        let network = &self.client.network;
        let resp = self.client.http.search_pairs(query).await?;
        Ok(resp
            .into_pairs()
            .into_iter()
            .map(TokenPair::from)
            .filter(|p| p.is_on(network))
            .collect())
    }

    /// All pairs trading `token`, most liquid first.
    pub async fn pairs(&self, token: &Address) -> Result<Vec<TokenPair>, JournalError> {
        let resp = self
            .client
            .http
            .get_token_pairs(&self.client.network, token)
            .await?;
        Ok(resp.into_iter().map(TokenPair::from).collect())
    }

    pub async fn pair(&self, pair_address: &Address) -> Result<Option<TokenPair>, JournalError> {
        let resp = self
            .client
            .http
            .get_pair(&self.client.network, pair_address)
            .await?;
        Ok(resp.into_pairs().into_iter().next().map(TokenPair::from))
    }

    /// Pairs for up to 30 tokens in one request.
    pub async fn tokens(&self, tokens: &[Address]) -> Result<Vec<TokenPair>, JournalError> {
        let resp = self
            .client
            .http
            .get_tokens(&self.client.network, tokens)
            .await?;
        Ok(resp.into_iter().map(TokenPair::from).collect())
    }

    pub async fn latest_boosted(&self) -> Result<Vec<BoostedToken>, JournalError> {
        let resp = self.client.http.get_latest_boosted().await?;
        Ok(resp.into_iter().map(BoostedToken::from).collect())
    }

    /// USD price of the token's first listed pair.
    pub async fn current_price(&self, token: &Address) -> Result<Option<Decimal>, JournalError> {
        let pairs = self.pairs(token).await?;
        Ok(pairs.into_iter().next().and_then(|p| p.price_usd))
    }
}

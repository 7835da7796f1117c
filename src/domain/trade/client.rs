//! Trades sub-client: turn user input into journal records.

use super::{NewTrade, TradeRecord};
use crate::client::JournalClient;
use crate::error::{JournalError, TradeValidationError};
use chrono::Utc;

pub struct Trades<'a> {
    pub(crate) client: &'a JournalClient,
}

impl<'a> Trades<'a> {
    /// Validate `new`, resolve the token's most liquid pair and build the record.
    ///
    /// Fails with [`TradeValidationError::TokenNotFound`] when DexScreener lists
    /// no pair for the token.
    pub async fn record(&self, new: NewTrade) -> Result<TradeRecord, JournalError> {
        new.validate()?;

        let pairs = self.client.tokens().pairs(&new.token_address).await?;
        let pair = pairs
            .into_iter()
            .next()
            .ok_or_else(|| TradeValidationError::TokenNotFound(new.token_address.to_string()))?;

        let record = TradeRecord::from_new(new, &pair, Utc::now());
        tracing::info!(
            trade = %record.id,
            symbol = %record.token.symbol,
            pool = %record.pool_address,
            status = %record.status(),
            "Recorded trade"
        );
        Ok(record)
    }

    /// [`record`](Self::record) followed by an immediate analysis.
    pub async fn record_and_analyze(&self, new: NewTrade) -> Result<TradeRecord, JournalError> {
        let record = self.record(new).await?;
        Ok(self.client.analysis().analyze_trade(record).await)
    }
}

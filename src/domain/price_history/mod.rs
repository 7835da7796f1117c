//! Price history domain: OHLCV candles for a pool and the query that fetches them.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod wire;

use crate::shared::{Address, Currency, NetworkId, Timeframe, MAX_OHLCV_LIMIT};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

// ─── Candle ──────────────────────────────────────────────────────────────────

/// One time-bucketed OHLC(V) observation.
///
/// Providers are expected to keep `low <= open, close <= high`, but nothing
/// enforces it; a malformed candle only distorts the extrema it contributes to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: DateTime<Utc>,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<Decimal>,
}

// ─── CandleSeries ────────────────────────────────────────────────────────────

/// Candles for one pool, in whatever order the provider returned them.
///
/// GeckoTerminal sends newest first. Consumers must not rely on either order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandleSeries {
    candles: Vec<Candle>,
}

impl CandleSeries {
    pub fn new(candles: Vec<Candle>) -> Self {
        Self { candles }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candle> {
        self.candles.iter()
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    /// Candles whose timestamp lies in `[start, end]`, both ends inclusive,
    /// keeping provider order.
    pub fn within(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<&Candle> {
        self.candles
            .iter()
            .filter(|c| c.timestamp >= start && c.timestamp <= end)
            .collect()
    }

    /// A copy ordered by ascending timestamp. The sort is stable, so
    /// duplicate timestamps keep their provider order.
    pub fn sorted(&self) -> Self {
        let mut candles = self.candles.clone();
        candles.sort_by_key(|c| c.timestamp);
        Self { candles }
    }

    pub fn first_timestamp(&self) -> Option<DateTime<Utc>> {
        self.candles.iter().map(|c| c.timestamp).min()
    }

    pub fn last_timestamp(&self) -> Option<DateTime<Utc>> {
        self.candles.iter().map(|c| c.timestamp).max()
    }
}

impl From<Vec<Candle>> for CandleSeries {
    fn from(candles: Vec<Candle>) -> Self {
        Self::new(candles)
    }
}

impl IntoIterator for CandleSeries {
    type Item = Candle;
    type IntoIter = std::vec::IntoIter<Candle>;

    fn into_iter(self) -> Self::IntoIter {
        self.candles.into_iter()
    }
}

impl<'a> IntoIterator for &'a CandleSeries {
    type Item = &'a Candle;
    type IntoIter = std::slice::Iter<'a, Candle>;

    fn into_iter(self) -> Self::IntoIter {
        self.candles.iter()
    }
}

// ─── OhlcvQuery ──────────────────────────────────────────────────────────────

/// Parameters for one OHLCV request against a pool.
#[derive(Debug, Clone, PartialEq)]
pub struct OhlcvQuery {
    pub network: NetworkId,
    pub pool_address: Address,
    pub timeframe: Timeframe,
    pub aggregate: u32,
    pub limit: u32,
    pub currency: Currency,
}

impl OhlcvQuery {
    /// Hourly, unaggregated, 100 buckets, priced in USD.
    pub fn new(network: NetworkId, pool_address: Address) -> Self {
        Self {
            network,
            pool_address,
            timeframe: Timeframe::Hour,
            aggregate: 1,
            limit: 100,
            currency: Currency::Usd,
        }
    }

    pub fn with_timeframe(mut self, timeframe: Timeframe) -> Self {
        self.timeframe = timeframe;
        self
    }

    pub fn with_aggregate(mut self, aggregate: u32) -> Self {
        self.aggregate = aggregate;
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn validate(&self) -> Result<(), QueryError> {
        if self.pool_address.is_empty() {
            return Err(QueryError::MissingPool);
        }
        if !self.timeframe.allowed_aggregates().contains(&self.aggregate) {
            return Err(QueryError::UnsupportedAggregate {
                timeframe: self.timeframe,
                aggregate: self.aggregate,
            });
        }
        if self.limit == 0 || self.limit > MAX_OHLCV_LIMIT {
            return Err(QueryError::LimitOutOfRange(self.limit));
        }
        Ok(())
    }
}

/// Candle granularity used when the journal fetches history for a trade.
///
/// Hourly candles, unaggregated, the provider maximum of 1000 buckets
/// (about six weeks), priced in USD.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OhlcvDefaults {
    pub timeframe: Timeframe,
    pub aggregate: u32,
    pub limit: u32,
    pub currency: Currency,
}

impl Default for OhlcvDefaults {
    fn default() -> Self {
        Self {
            timeframe: Timeframe::Hour,
            aggregate: 1,
            limit: MAX_OHLCV_LIMIT,
            currency: Currency::Usd,
        }
    }
}

impl OhlcvDefaults {
    pub fn query_for(&self, network: NetworkId, pool_address: Address) -> OhlcvQuery {
        OhlcvQuery::new(network, pool_address)
            .with_timeframe(self.timeframe)
            .with_aggregate(self.aggregate)
            .with_limit(self.limit)
            .with_currency(self.currency)
    }
}

/// Rejected OHLCV query parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryError {
    MissingPool,
    UnsupportedAggregate { timeframe: Timeframe, aggregate: u32 },
    LimitOutOfRange(u32),
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::MissingPool => write!(f, "Missing pool address"),
            QueryError::UnsupportedAggregate {
                timeframe,
                aggregate,
            } => write!(
                f,
                "Aggregate {} not supported for {} candles (allowed: {:?})",
                aggregate,
                timeframe,
                timeframe.allowed_aggregates()
            ),
            QueryError::LimitOutOfRange(limit) => {
                write!(f, "Limit {} outside 1..={}", limit, MAX_OHLCV_LIMIT)
            }
        }
    }
}

impl std::error::Error for QueryError {}

//! Conversion: positional OHLCV rows → Candle / CandleSeries.

use super::wire::{OhlcvResponse, OhlcvRow};
use super::{Candle, CandleSeries};
use crate::shared::decimal_from_f64;
use crate::shared::serde_util::datetime_from_epoch;
use rust_decimal::Decimal;
use serde_json::Value;
use std::fmt;

/// Why a single OHLCV row was dropped during normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum RowError {
    TooShort(usize),
    NotNumeric(&'static str),
    BadTimestamp(String),
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowError::TooShort(len) => write!(f, "expected at least 5 fields, got {}", len),
            RowError::NotNumeric(field) => write!(f, "{} is not a finite number", field),
            RowError::BadTimestamp(raw) => write!(f, "timestamp {} out of range", raw),
        }
    }
}

impl std::error::Error for RowError {}

const FIELDS: [&str; 6] = ["timestamp", "open", "high", "low", "close", "volume"];

fn price(row: &[Value], idx: usize) -> Result<Decimal, RowError> {
    row[idx]
        .as_f64()
        .and_then(decimal_from_f64)
        .ok_or(RowError::NotNumeric(FIELDS[idx]))
}

fn timestamp(raw: &Value) -> Result<chrono::DateTime<chrono::Utc>, RowError> {
    let secs = match raw.as_i64() {
        Some(v) => v,
        None => raw
            .as_f64()
            .filter(|v| v.is_finite())
            .map(|v| v.trunc() as i64)
            .ok_or(RowError::NotNumeric(FIELDS[0]))?,
    };
    datetime_from_epoch(secs).ok_or_else(|| RowError::BadTimestamp(raw.to_string()))
}

impl TryFrom<&[Value]> for Candle {
    type Error = RowError;

    fn try_from(row: &[Value]) -> Result<Self, Self::Error> {
        if row.len() < 5 {
            return Err(RowError::TooShort(row.len()));
        }

        // A missing or unreadable volume does not invalidate the prices.
        let volume = row
            .get(5)
            .and_then(Value::as_f64)
            .and_then(decimal_from_f64);

        Ok(Candle {
            timestamp: timestamp(&row[0])?,
            open: price(row, 1)?,
            high: price(row, 2)?,
            low: price(row, 3)?,
            close: price(row, 4)?,
            volume,
        })
    }
}

impl FromIterator<OhlcvRow> for CandleSeries {
    fn from_iter<I: IntoIterator<Item = OhlcvRow>>(rows: I) -> Self {
        let mut candles = Vec::new();
        for (idx, row) in rows.into_iter().enumerate() {
            match Candle::try_from(row.as_slice()) {
                Ok(candle) => candles.push(candle),
                Err(err) => tracing::debug!(row = idx, "Dropping OHLCV row: {}", err),
            }
        }
        CandleSeries::new(candles)
    }
}

impl From<OhlcvResponse> for CandleSeries {
    fn from(resp: OhlcvResponse) -> Self {
        resp.into_rows().into_iter().collect()
    }
}

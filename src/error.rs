//! Unified journal error types.

use thiserror::Error;

/// Top-level journal error.
#[derive(Error, Debug)]
pub enum JournalError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Trade rejected: {0}")]
    Trade(#[from] TradeValidationError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Timeout")]
    Timeout,

    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded { attempts: u32, last_error: String },
}

/// Rejections raised by the trade input boundary.
///
/// A `TradeRecord` that reaches the analyzer is assumed to have passed these checks.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TradeValidationError {
    #[error("Token address is empty")]
    MissingTokenAddress,

    #[error("Invalid Solana address: {0}")]
    InvalidAddress(String),

    #[error("Buy price must be positive, got {0}")]
    NonPositiveBuyPrice(String),

    #[error("Buy amount must not be negative, got {0}")]
    NegativeBuyAmount(String),

    #[error("Sell price must be positive, got {0}")]
    NonPositiveSellPrice(String),

    #[error("Sell amount must not be negative, got {0}")]
    NegativeSellAmount(String),

    #[error("Sell timestamp {sell} precedes buy timestamp {buy}")]
    SellBeforeBuy { buy: String, sell: String },

    #[error("Token not found: {0}")]
    TokenNotFound(String),
}

/// Trade repository errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed journal file: {0}")]
    Serde(#[from] serde_json::Error),
}

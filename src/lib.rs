//! # DEX Trade Journal
//!
//! Record Solana DEX token trades and look back at what the price did while
//! you held them: highest high, lowest low, realized P&L and how much of the
//! available upside the exit captured.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core**: Shared newtypes, domain models and the pure analyzer (no I/O)
//! 2. **Storage**: `TradeRepository` with JSON-file and in-memory backends
//! 3. **HTTP API**: `JournalHttp` for GeckoTerminal and DexScreener, with retry policies
//! 4. **High-Level Client**: `JournalClient` with nested sub-clients
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dex_trade_journal::prelude::*;
//!
//! let client = JournalClient::builder().build()?;
//!
//! let trade = client
//!     .trades()
//!     .record(NewTrade::buy(mint, buy_price, amount_usd, bought_at))
//!     .await?;
//! let trade = client.analysis().analyze_trade(trade).await;
//! println!("{}", TradeReport::new(&trade));
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes, serde helpers and display formatting.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, sub-clients.
pub mod domain;

/// Unified journal error types.
pub mod error;

/// Provider URL constants and environment variable names.
pub mod network;

// ── Layer 2: Storage ─────────────────────────────────────────────────────────

/// Trade repositories.
pub mod store;

// ── Layer 3: HTTP API ────────────────────────────────────────────────────────

/// HTTP client with retry policies.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 4: High-Level Client ───────────────────────────────────────────────

/// `JournalClient`, the primary entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{Address, Currency, NetworkId, Timeframe};

    // Domain types: candles
    pub use crate::domain::price_history::{
        Candle, CandleSeries, OhlcvDefaults, OhlcvQuery, QueryError,
    };

    // Domain types: trades and analysis
    pub use crate::domain::analysis::{
        analyze, percent_change, PerformanceSummary, PostSellPerformance,
    };
    pub use crate::domain::trade::{
        BuyLeg, NewTrade, SellLeg, TradeRecord, TradeReport, TradeStatus,
    };

    // Domain types: market data
    pub use crate::domain::pool::{PoolInfo, PoolTrade, SwapKind};
    pub use crate::domain::token::{BoostedToken, TokenPair, TokenRef};

    // Portfolio
    pub use crate::domain::portfolio::PortfolioSummary;

    // Storage
    pub use crate::store::{JsonFileRepository, MemoryRepository, TradeRepository};

    // Errors
    pub use crate::error::{HttpError, JournalError, StoreError, TradeValidationError};

    // Network
    pub use crate::network::{DEFAULT_DEXSCREENER_URL, DEFAULT_GECKOTERMINAL_URL};

    // HTTP client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::client::{
        AnalysisClient, JournalClient, JournalClientBuilder, PoolsClient, PriceHistoryClient,
        TokensClient, TradesClient,
    };
    #[cfg(feature = "http")]
    pub use crate::http::retry::{RetryConfig, RetryPolicy};
}

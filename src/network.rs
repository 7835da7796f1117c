//! Network URL constants and environment overrides.

/// Default GeckoTerminal REST API base URL (OHLCV, pools).
pub const DEFAULT_GECKOTERMINAL_URL: &str = "https://api.geckoterminal.com/api/v2";

/// Default DexScreener REST API base URL (token search, pairs).
pub const DEFAULT_DEXSCREENER_URL: &str = "https://api.dexscreener.com";

/// Default chain. GeckoTerminal and DexScreener both call it `solana`.
pub const DEFAULT_NETWORK: &str = "solana";

/// Environment variable overriding [`DEFAULT_GECKOTERMINAL_URL`].
pub const GECKOTERMINAL_URL_ENV: &str = "GECKOTERMINAL_API_URL";

/// Environment variable overriding [`DEFAULT_DEXSCREENER_URL`].
pub const DEXSCREENER_URL_ENV: &str = "DEXSCREENER_API_URL";

/// Environment variable overriding [`DEFAULT_NETWORK`].
pub const NETWORK_ENV: &str = "JOURNAL_NETWORK";

//! Search DexScreener for a token and list its pairs on the configured network.
//!
//! Run: cargo run --example search_token --features native -- bonk

use dex_trade_journal::prelude::*;
use dex_trade_journal::shared::fmt::{abbr_number, display_percent, display_price};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), JournalError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let query = std::env::args().nth(1).unwrap_or_else(|| "bonk".to_string());
    let client = JournalClientBuilder::from_env().build()?;

    let pairs = client.tokens().search(&query).await?;
    println!("{} pairs on {} for {:?}", pairs.len(), client.network(), query);

    for pair in pairs.iter().take(10) {
        println!(
            "{:<10} {:<12} {:>14} {:>10} liq {:>8}  {}",
            format!("{}/{}", pair.base_token.symbol, pair.quote_token.symbol),
            pair.dex_id,
            pair.price_usd.as_ref().map(display_price).unwrap_or_else(|| "-".into()),
            pair.price_change_24h.as_ref().map(display_percent).unwrap_or_else(|| "-".into()),
            pair.liquidity_usd.as_ref().map(|l| abbr_number(l, 2)).unwrap_or_else(|| "-".into()),
            pair.pair_address,
        );
    }

    if let Some(top) = pairs.first() {
        let pools = client.pools().for_token(&top.base_token.address).await?;
        println!("\nGeckoTerminal pools for {}: {}", top.base_token.symbol, pools.len());
        for pool in pools.iter().take(5) {
            println!("  {:<24} {}", pool.name, pool.address);
        }
    }

    Ok(())
}

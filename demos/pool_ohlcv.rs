//! Fetch hourly candles for a pool and print the most recent ones.
//!
//! Run: cargo run --example pool_ohlcv --features native -- <POOL_ADDRESS>

use dex_trade_journal::prelude::*;
use dex_trade_journal::shared::fmt::display_price;
use tracing_subscriber::EnvFilter;

const BONK_SOL_POOL: &str = "6oFWm7KPLfxnwMb3z5xwBoXNSPP3JJyirAPqPSiVcnsp";

#[tokio::main]
async fn main() -> Result<(), JournalError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let pool = Address::new(&std::env::args().nth(1).unwrap_or_else(|| BONK_SOL_POOL.to_string()));
    let client = JournalClientBuilder::from_env().build()?;

    if let Some(info) = client.pools().get(&pool).await? {
        println!("{} ({})", info.name, info.dex_id.as_deref().unwrap_or("unknown dex"));
    }

    let query = client.price_history().query(&pool).with_limit(24);
    let series = client.price_history().try_fetch(&query).await?.sorted();

    println!("{} candles ({} x{})", series.len(), query.timeframe, query.aggregate);
    for candle in series.iter() {
        println!(
            "{}  O {:>14}  H {:>14}  L {:>14}  C {:>14}",
            candle.timestamp.format("%Y-%m-%d %H:%M"),
            display_price(&candle.open),
            display_price(&candle.high),
            display_price(&candle.low),
            display_price(&candle.close),
        );
    }

    Ok(())
}

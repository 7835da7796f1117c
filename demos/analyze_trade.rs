//! Record a trade, analyze its holding window and keep it in a JSON journal.
//!
//! Run: cargo run --example analyze_trade --features native
//!
//! `JOURNAL_FILE` overrides the journal path (default `trades.json`).

use chrono::{Duration, Utc};
use dex_trade_journal::prelude::*;
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

const BONK_MINT: &str = "DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263";

#[tokio::main]
async fn main() -> Result<(), JournalError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let client = JournalClientBuilder::from_env().build()?;
    let repo = JsonFileRepository::new(
        std::env::var("JOURNAL_FILE").unwrap_or_else(|_| "trades.json".to_string()),
    );

    let current = client
        .tokens()
        .current_price(&Address::new(BONK_MINT))
        .await?
        .ok_or_else(|| JournalError::Other("No price for token".to_string()))?;

    // Pretend we bought two days ago at 80% of today's price and sold yesterday at 95%.
    let now = Utc::now();
    let new_trade = NewTrade::buy(
        BONK_MINT,
        current * Decimal::new(80, 2),
        Decimal::from(250),
        now - Duration::days(2),
    )
    .sold(current * Decimal::new(95, 2), None, now - Duration::days(1))
    .with_notes("demo trade");

    let trade = client.trades().record_and_analyze(new_trade).await?;
    let post_sell = client.analysis().post_sell_performance(&trade).await;
    println!("{}", TradeReport::new(&trade).with_post_sell(post_sell.as_ref()));

    let mut journal = repo.load()?;
    journal.push(trade);
    let journal = client.analysis().analyze_all(journal).await;
    repo.save(&journal)?;

    println!("{}", PortfolioSummary::from_trades(&journal));
    println!("Journal saved to {}", repo.path().display());
    Ok(())
}

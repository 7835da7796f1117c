//! HTTP behaviour against a local mock of GeckoTerminal and DexScreener.

use dex_trade_journal::error::HttpError;
use dex_trade_journal::prelude::*;
use mockito::{Matcher, Server, ServerGuard};
use rust_decimal::Decimal;
use std::str::FromStr;
use std::time::Duration;

const BONK_MINT: &str = "DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263";
const POOL: &str = "6oFWm7KPLfxnwMb3z5xwBoXNSPP3JJyirAPqPSiVcnsp";
const OHLCV_PATH: &str = "/networks/solana/pools/6oFWm7KPLfxnwMb3z5xwBoXNSPP3JJyirAPqPSiVcnsp/ohlcv/hour";

fn client_for(server: &ServerGuard) -> JournalClient {
    JournalClient::builder()
        .geckoterminal_url(&server.url())
        .dexscreener_url(&server.url())
        .timeout(Duration::from_secs(5))
        .retry_policy(RetryPolicy::Custom(RetryConfig {
            max_retries: 2,
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(5),
            backoff_factor: 2.0,
            jitter: false,
            retryable_statuses: vec![429, 502, 503, 504],
        }))
        .build()
        .unwrap()
}

fn ohlcv_body() -> String {
    serde_json::json!({
        "data": {
            "id": "x",
            "type": "ohlcv_request_response",
            "attributes": {
                "ohlcv_list": [
                    [1705320000, 0.0000280, 0.0000291, 0.0000276, 0.0000289, 201118.0],
                    [1705316400, 0.0000273, 0.0000282, 0.0000270, 0.0000280, 164320.1]
                ]
            }
        }
    })
    .to_string()
}

fn pair_json(chain: &str, pair: &str, price: &str) -> serde_json::Value {
    serde_json::json!({
        "chainId": chain,
        "dexId": "raydium",
        "pairAddress": pair,
        "baseToken": {"address": BONK_MINT, "name": "Bonk", "symbol": "Bonk"},
        "quoteToken": {"address": "So11111111111111111111111111111111111111112", "name": "Wrapped SOL", "symbol": "SOL"},
        "priceUsd": price,
        "marketCap": 1987654321
    })
}

fn query() -> OhlcvQuery {
    OhlcvQuery::new(NetworkId::default(), Address::new(POOL)).with_limit(1000)
}

// ─── OHLCV ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_ohlcv_sends_query_and_normalizes() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", OHLCV_PATH)
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("aggregate".into(), "1".into()),
            Matcher::UrlEncoded("limit".into(), "1000".into()),
            Matcher::UrlEncoded("currency".into(), "usd".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(ohlcv_body())
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    let series = client.price_history().fetch(&query()).await;

    mock.assert_async().await;
    assert_eq!(series.len(), 2);
    assert_eq!(series.candles()[0].timestamp.timestamp(), 1705320000);
    assert_eq!(series.candles()[0].high, Decimal::from_str("0.0000291").unwrap());
}

#[tokio::test]
async fn test_ohlcv_server_error_is_empty_and_not_retried() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", OHLCV_PATH)
        .match_query(Matcher::Any)
        .with_status(503)
        .with_body("upstream unavailable")
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    let series = client.price_history().fetch(&query()).await;

    mock.assert_async().await;
    assert!(series.is_empty());
}

#[tokio::test]
async fn test_ohlcv_rate_limit_is_empty_and_not_retried() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", OHLCV_PATH)
        .match_query(Matcher::Any)
        .with_status(429)
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.price_history().try_fetch(&query()).await.unwrap_err();
    assert!(matches!(
        err,
        JournalError::Http(HttpError::RateLimited { .. })
    ));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_ohlcv_huge_retry_after_is_empty() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", OHLCV_PATH)
        .match_query(Matcher::Any)
        .with_status(429)
        .with_header("retry-after", "18446744073709551615")
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    let series = client.price_history().fetch(&query()).await;
    assert!(series.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_ohlcv_malformed_json_is_empty() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", OHLCV_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("{\"data\": [oops")
        .create_async()
        .await;

    let client = client_for(&server);
    assert!(client.price_history().try_fetch(&query()).await.is_err());
    assert!(client.price_history().fetch(&query()).await.is_empty());
}

#[tokio::test]
async fn test_ohlcv_invalid_query_makes_no_request() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server);
    let bad = query().with_timeframe(Timeframe::Day).with_aggregate(4);
    assert!(matches!(
        client.price_history().try_fetch(&bad).await,
        Err(JournalError::Validation(_))
    ));
    assert!(client.price_history().fetch(&bad).await.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_ohlcv_unreachable_host_is_empty() {
    let client = JournalClient::builder()
        .geckoterminal_url("http://127.0.0.1:9")
        .timeout(Duration::from_secs(2))
        .build()
        .unwrap();
    assert!(client.price_history().fetch(&query()).await.is_empty());
}

// ─── Lookups ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_search_keeps_configured_chain_only() {
    let mut server = Server::new_async().await;
    let body = serde_json::json!({
        "schemaVersion": "1.0.0",
        "pairs": [
            pair_json("solana", POOL, "0.0000289"),
            pair_json("ethereum", "0xabc", "0.0000290")
        ]
    });
    let _mock = server
        .mock("GET", "/latest/dex/search")
        .match_query(Matcher::UrlEncoded("q".into(), "bonk sol".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await;

    let client = client_for(&server);
    let pairs = client.tokens().search("bonk sol").await.unwrap();
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].pair_address.as_str(), POOL);
}

#[tokio::test]
async fn test_token_pairs_null_body_is_empty() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", format!("/token-pairs/v1/solana/{}", BONK_MINT).as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("null")
        .create_async()
        .await;

    let client = client_for(&server);
    let pairs = client.tokens().pairs(&Address::new(BONK_MINT)).await.unwrap();
    assert!(pairs.is_empty());
}

#[tokio::test]
async fn test_current_price_uses_first_pair() {
    let mut server = Server::new_async().await;
    let body = serde_json::json!([
        pair_json("solana", POOL, "0.0000301"),
        pair_json("solana", "other", "0.0000299")
    ]);
    let _mock = server
        .mock("GET", format!("/token-pairs/v1/solana/{}", BONK_MINT).as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await;

    let client = client_for(&server);
    let price = client
        .tokens()
        .current_price(&Address::new(BONK_MINT))
        .await
        .unwrap();
    assert_eq!(price, Some(Decimal::from_str("0.0000301").unwrap()));
}

#[tokio::test]
async fn test_tokens_batch_joins_addresses() {
    let mut server = Server::new_async().await;
    let addresses: Vec<Address> = (0..35).map(|i| Address::new(&format!("tok{}", i))).collect();
    let expected: Vec<String> = (0..30).map(|i| format!("tok{}", i)).collect();
    let mock = server
        .mock("GET", format!("/tokens/v1/solana/{}", expected.join(",")).as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    assert!(client.tokens().tokens(&addresses).await.unwrap().is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_lookup_retries_then_gives_up() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/token-boosts/latest/v1")
        .with_status(503)
        .expect(3)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.tokens().latest_boosted().await.unwrap_err();
    assert!(matches!(
        err,
        JournalError::Http(HttpError::ServerError { status: 503, .. })
    ));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_lookup_retry_after_is_capped_by_max_delay() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/token-boosts/latest/v1")
        .with_status(429)
        .with_header("retry-after", "3600")
        .expect(3)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = tokio::time::timeout(Duration::from_secs(5), client.tokens().latest_boosted())
        .await
        .expect("retry loop waited out the full Retry-After")
        .unwrap_err();
    assert!(matches!(
        err,
        JournalError::Http(HttpError::RateLimited {
            retry_after_ms: Some(3_600_000)
        })
    ));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_lookup_rate_limit_not_retried_when_status_not_retryable() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/token-boosts/latest/v1")
        .with_status(429)
        .with_header("retry-after", "3600")
        .expect(1)
        .create_async()
        .await;

    let client = JournalClient::builder()
        .dexscreener_url(&server.url())
        .retry_policy(RetryPolicy::Custom(RetryConfig {
            retryable_statuses: vec![503],
            ..RetryConfig::default()
        }))
        .build()
        .unwrap();
    let res = tokio::time::timeout(Duration::from_secs(5), client.tokens().latest_boosted()).await;
    assert!(matches!(
        res,
        Ok(Err(JournalError::Http(HttpError::RateLimited { .. })))
    ));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_pool_not_found_is_none() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/networks/solana/pools/missing")
        .with_status(404)
        .with_body("{\"errors\":[{\"status\":\"404\",\"title\":\"Not Found\"}]}")
        .create_async()
        .await;

    let client = client_for(&server);
    let pool = client.pools().get(&Address::new("missing")).await.unwrap();
    assert!(pool.is_none());
}

#[tokio::test]
async fn test_pools_for_token() {
    let mut server = Server::new_async().await;
    let body = serde_json::json!({
        "data": [{
            "id": format!("solana_{}", POOL),
            "type": "pool",
            "attributes": {"address": POOL, "name": "Bonk / SOL", "reserve_in_usd": "4123456.78"}
        }]
    });
    let _mock = server
        .mock("GET", format!("/networks/solana/tokens/{}/pools", BONK_MINT).as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await;

    let client = client_for(&server);
    let pools = client.pools().for_token(&Address::new(BONK_MINT)).await.unwrap();
    assert_eq!(pools.len(), 1);
    assert_eq!(pools[0].address.as_str(), POOL);
    assert_eq!(pools[0].name, "Bonk / SOL");
}

fn trades_body() -> String {
    serde_json::json!({
        "data": [
            {
                "id": "solana_285412345_5xTx_0",
                "type": "trade",
                "attributes": {
                    "block_number": 285412345,
                    "tx_hash": "5xTx",
                    "tx_from_address": "WaLLet111",
                    "from_token_amount": "1.5",
                    "to_token_amount": "64102.56",
                    "price_from_in_usd": "150.0",
                    "price_to_in_usd": "0.00351",
                    "block_timestamp": "2024-09-01T12:00:00Z",
                    "kind": "buy",
                    "volume_in_usd": "225.0"
                }
            },
            {
                "id": "solana_285412350_7yTx_0",
                "type": "trade",
                "attributes": {
                    "tx_hash": "7yTx",
                    "price_from_in_usd": "0.00349",
                    "price_to_in_usd": "150.0",
                    "kind": "sell",
                    "volume_in_usd": "1200.5"
                }
            }
        ]
    })
    .to_string()
}

#[tokio::test]
async fn test_pool_trades_sends_volume_filter() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", format!("/networks/solana/pools/{}/trades", POOL).as_str())
        .match_query(Matcher::UrlEncoded(
            "trade_volume_in_usd_greater_than".into(),
            "100".into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(trades_body())
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    let trades = client
        .pools()
        .trades(&Address::new(POOL), Decimal::from(100))
        .await
        .unwrap();
    mock.assert_async().await;

    assert_eq!(trades.len(), 2);
    assert_eq!(trades[0].tx_hash, "5xTx");
    assert_eq!(trades[0].kind, Some(SwapKind::Buy));
    assert_eq!(trades[0].token_price_usd, Some(Decimal::from_str("0.00351").unwrap()));
    assert_eq!(trades[1].kind, Some(SwapKind::Sell));
    assert_eq!(trades[1].volume_usd, Some(Decimal::from_str("1200.5").unwrap()));
}

#[tokio::test]
async fn test_pool_trades_without_filter() {
    let mut server = Server::new_async().await;
    let filtered = server
        .mock("GET", format!("/networks/solana/pools/{}/trades", POOL).as_str())
        .match_query(Matcher::Regex("trade_volume_in_usd_greater_than".into()))
        .expect(0)
        .create_async()
        .await;
    let plain = server
        .mock("GET", format!("/networks/solana/pools/{}/trades", POOL).as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("{\"data\": []}")
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    let trades = client
        .pools()
        .trades(&Address::new(POOL), Decimal::ZERO)
        .await
        .unwrap();
    assert!(trades.is_empty());
    filtered.assert_async().await;
    plain.assert_async().await;
}

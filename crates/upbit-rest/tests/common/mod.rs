//! Shared fixtures for integration tests

use httpmock::prelude::*;
use serde_json::{json, Value};
use upbit_rest::{ClientConfig, Credentials, UpbitClient};

/// Market list served by the mock exchange
pub fn market_list() -> Value {
    json!([
        {"market": "KRW-BTC", "korean_name": "비트코인", "english_name": "Bitcoin"},
        {"market": "KRW-ETH", "korean_name": "이더리움", "english_name": "Ethereum"},
        {"market": "BTC-ETH", "korean_name": "이더리움", "english_name": "Ethereum"}
    ])
}

/// Full ticker record for one market
pub fn ticker(market: &str) -> Value {
    json!({
        "market": market,
        "trade_date": "20180418", "trade_time": "102340",
        "trade_date_kst": "20180418", "trade_time_kst": "192340",
        "opening_price": 8450000, "high_price": 8679000, "low_price": 8445000,
        "trade_price": 8616000, "prev_closing_price": 8450000,
        "change": "RISE", "change_price": 166000, "change_rate": 0.0196449704,
        "signed_change_price": 166000, "signed_change_rate": 0.0196449704,
        "trade_volume": 0.02722337,
        "acc_trade_price": 19255371040.89, "acc_trade_price_24h": 21006225936.85,
        "acc_trade_volume": 2195.36295861, "acc_trade_volume_24h": 2463.31655736,
        "highest_52_week_price": 28885000, "highest_52_week_date": "2018-01-06",
        "lowest_52_week_price": 4175000, "lowest_52_week_date": "2017-09-25",
        "timestamp": 1524047026072u64
    })
}

/// Open order record
pub fn order(uuid: &str, state: &str) -> Value {
    json!({
        "uuid": uuid,
        "side": "bid", "ord_type": "limit", "price": "10000.0",
        "state": state, "market": "KRW-BTC",
        "created_at": "2018-04-10T15:42:23+09:00",
        "volume": "0.01", "remaining_volume": "0.01",
        "reserved_fee": "0.05", "remaining_fee": "0.05", "paid_fee": "0.0",
        "locked": "100.05", "executed_volume": "0.0", "trades_count": 0
    })
}

/// KRW account record
pub fn krw_account() -> Value {
    json!({
        "currency": "KRW",
        "balance": "1000000.0",
        "locked": "0.0",
        "avg_buy_price": "0",
        "avg_buy_price_modified": false,
        "unit_currency": "KRW"
    })
}

/// Test credentials; the mock server does not verify signatures
pub fn credentials() -> Credentials {
    Credentials::new("test_access_key", "test_secret_key")
}

/// Mount the market-list mock and build an unauthenticated client against
/// the mock server
pub async fn mock_client(server: &MockServer) -> UpbitClient {
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/market/all");
            then.status(200).json_body(market_list());
        })
        .await;

    UpbitClient::with_config(ClientConfig::new().with_base_url(server.base_url()))
        .await
        .expect("client construction against mock server")
}

/// Same as [`mock_client`] but with credentials configured
pub async fn mock_auth_client(server: &MockServer) -> UpbitClient {
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/market/all");
            then.status(200).json_body(market_list());
        })
        .await;

    UpbitClient::with_config(
        ClientConfig::new()
            .with_base_url(server.base_url())
            .with_credentials(credentials()),
    )
    .await
    .expect("client construction against mock server")
}

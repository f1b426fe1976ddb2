//! Compare each KRW market's short-interval volume against its weekly average
//!
//! Polls one minute candle per market and reports the traded volume as a
//! percentage of the market's average volume over the last 7 days. Reads the
//! client's rate-limit tracker and sleeps when the candles quota runs out.
//!
//! Run: cargo run --bin volume_ratio

use chrono::{Local, Timelike};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info};
use upbit_rest::UpbitClient;

/// Reporting interval in minutes
const INTERVAL_MIN: u32 = 5;

/// Sleep until the next interval boundary on the wall clock
async fn wait_for_boundary(interval_min: u32) {
    let now = Local::now();
    let mut remain = 60 - now.second();
    remain += 60 * (interval_min - (now.minute() % interval_min + 1));
    tokio::time::sleep(Duration::from_secs(u64::from(remain))).await;
}

/// Back off for a second when the candles throttle group is exhausted
async fn respect_candles_quota(client: &UpbitClient) {
    if let Some(remaining) = client.remaining_req("candles") {
        if remaining.is_exhausted() {
            debug!("candles quota exhausted, sleeping 1 second");
            tokio::time::sleep(Duration::from_secs(1)).await;
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let client = UpbitClient::new().await?;
    let krw_markets: Vec<String> = client
        .markets()
        .iter()
        .filter(|m| m.starts_with("KRW"))
        .cloned()
        .collect();

    // Weekly volume baseline per market
    let mut weekly_volume: HashMap<String, Decimal> = HashMap::new();
    for market in &krw_markets {
        let candles = client.get_weeks_candles(market, None, Some(1)).await?;
        if let Some(candle) = candles.first() {
            weekly_volume.insert(market.clone(), candle.candle_acc_trade_volume);
        }
        respect_candles_quota(&client).await;
    }

    let interval = Decimal::from(INTERVAL_MIN);
    loop {
        info!(
            "volume over the last {} minutes versus weekly average ====================",
            INTERVAL_MIN
        );
        for market in &krw_markets {
            let Some(weekly) = weekly_volume.get(market) else {
                continue;
            };

            let candles = client.get_minutes_candles(1, market, None, Some(1)).await?;
            let Some(candle) = candles.first() else {
                continue;
            };

            let volume = candle.candle_acc_trade_volume;
            let average = *weekly / dec!(7) / dec!(24) / dec!(60) * interval;
            if average.is_zero() {
                continue;
            }
            let ratio = volume / average * dec!(100);

            info!(
                "[{}] {:.2}% (volume: {:.2}, average: {:.2})",
                market, ratio, volume, average
            );
            respect_candles_quota(&client).await;
        }
        wait_for_boundary(INTERVAL_MIN).await;
    }
}

//! Poll the latest KRW-BTC minute candle on each interval boundary
//!
//! Run: cargo run --bin minute_candles

use chrono::{Local, Timelike};
use std::time::Duration;
use tracing::info;
use upbit_rest::UpbitClient;

/// Candle width in minutes (1, 3, 5, 10, 15, 30, 60 or 240)
const INTERVAL_MIN: u32 = 1;

const MARKET: &str = "KRW-BTC";

/// Sleep until the next interval boundary on the wall clock
///
/// With a 5-minute interval, a call at 07:12:35 sleeps 2 minutes 25 seconds.
async fn wait_for_boundary(interval_min: u32) {
    let now = Local::now();
    let mut remain = 60 - now.second();
    remain += 60 * (interval_min - (now.minute() % interval_min + 1));
    tokio::time::sleep(Duration::from_secs(u64::from(remain))).await;
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

    loop {
        let candles = client
            .get_minutes_candles(INTERVAL_MIN, MARKET, None, Some(1))
            .await?;

        if let Some(candle) = candles.first() {
            info!(
                "[{}] {}",
                Local::now().format("%Y%m%d %H:%M:%S"),
                MARKET
            );
            info!("\topening_price: {}", candle.opening_price);
            info!("\ttrade_price: {}", candle.trade_price);
            info!("\thigh_price: {}", candle.high_price);
            info!("\tlow_price: {}", candle.low_price);
            info!("\ttimestamp: {}", candle.timestamp);
        }

        wait_for_boundary(INTERVAL_MIN).await;
    }
}

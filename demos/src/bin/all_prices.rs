//! Print the latest price of every market, grouped by quote currency
//!
//! Run: cargo run --bin all_prices

use tracing::info;
use upbit_rest::{Ticker, UpbitClient};

/// Quote currencies, in print order
const QUOTES: [&str; 4] = ["KRW", "BTC", "ETH", "USDT"];

fn print_tickers(tickers: &[Ticker]) {
    for ticker in tickers {
        if ticker.market.starts_with("KRW") {
            info!("{}: {} KRW", ticker.market, ticker.trade_price);
        } else if ticker.market.starts_with("BTC") {
            info!("{}: {:.8} BTC", ticker.market, ticker.trade_price);
        } else if ticker.market.starts_with("ETH") {
            info!("{}: {:.8} ETH", ticker.market, ticker.trade_price);
        } else if ticker.market.starts_with("USDT") {
            info!("{}: {:.3} USDT", ticker.market, ticker.trade_price);
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

    for quote in QUOTES {
        let group: Vec<&str> = client
            .markets()
            .iter()
            .filter(|m| m.starts_with(quote))
            .map(String::as_str)
            .collect();
        if group.is_empty() {
            continue;
        }

        info!("{} markets:", quote);
        let tickers = client.get_ticker(&group).await?;
        print_tickers(&tickers);
    }

    Ok(())
}

//! REST API client for the Upbit cryptocurrency exchange
//!
//! This crate provides a typed client for Upbit's REST API, covering both
//! the public quotation endpoints and the authenticated exchange endpoints.
//!
//! # Features
//!
//! - **Quotation**: Market list, minute/day/week/month candles, trade ticks,
//!   ticker and orderbook snapshots
//! - **Exchange**: Account balances, order chance, order placement/lookup/
//!   cancellation, withdrawals and deposits
//! - **Validation**: Market identifiers, enum parameters and KRW tick-size
//!   prices are checked locally before any request is sent
//!
//! # Authentication
//!
//! Exchange endpoints require an access-key/secret pair from Upbit's Open
//! API console. Each request is signed into a short-lived JWT (HMAC-SHA256)
//! carried as an `Authorization: Bearer` header.
//!
//! # Example
//!
//! ```no_run
//! use upbit_rest::{Credentials, UpbitClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Quotation endpoints (no auth required)
//!     let client = UpbitClient::new().await?;
//!     let tickers = client.get_ticker(&["KRW-BTC", "KRW-ETH"]).await?;
//!     println!("KRW-BTC: {}", tickers[0].trade_price);
//!
//!     // Exchange endpoints (auth required)
//!     let creds = Credentials::from_env()?;
//!     let auth_client = UpbitClient::with_credentials(creds).await?;
//!     let accounts = auth_client.get_accounts().await?;
//!     println!("Balances: {:?}", accounts);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Rate Limiting
//!
//! The client performs no throttling of its own. Every response's
//! `Remaining-Req` header is recorded and exposed via
//! [`UpbitClient::remaining_req`] so callers can sleep between requests;
//! the demo pollers show the pattern.

pub mod auth;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod market;
pub mod rate;
pub mod types;

// Re-export main types
pub use auth::Credentials;
pub use client::{ClientConfig, UpbitClient};
pub use error::{RestError, RestResult};
pub use market::{is_valid_price, tick_size, MarketCache};
pub use rate::RemainingReq;

// Re-export endpoint-specific types
pub use types::{
    // Quotation
    DayCandle, MarketInfo, MinuteCandle, Orderbook, OrderbookUnit, PeriodCandle, Ticker,
    TradeTick,
    // Exchange
    Account, Deposit, OrderChance, OrderInfo, OrderRequest, OrderSide, OrderState, OrderTrade,
    SortOrder, Withdraw, WithdrawChance, WithdrawState,
};

//! Main REST client implementation

use crate::auth::Credentials;
use crate::endpoints::{AccountEndpoints, FundingEndpoints, QuotationEndpoints, TradingEndpoints};
use crate::error::{RestError, RestResult};
use crate::market::MarketCache;
use crate::rate::{RateLimitTracker, RemainingReq};
use crate::types::{
    Account, DayCandle, Deposit, MarketInfo, MinuteCandle, Orderbook, OrderChance, OrderInfo,
    OrderRequest, OrderState, PeriodCandle, SortOrder, Ticker, TradeTick, Withdraw,
    WithdrawChance, WithdrawState,
};
use reqwest::Client;
use rust_decimal::Decimal;
use std::time::Duration;
use tracing::info;

/// Default API host
const DEFAULT_BASE_URL: &str = "https://api.upbit.com";

/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Upbit REST API client
///
/// Provides access to both quotation (public) and exchange (authenticated)
/// endpoints. Construction fetches the tradable market list once and caches
/// it; every market parameter is validated against that snapshot before a
/// request goes out. The snapshot is immutable — a client that must see
/// newly listed markets has to be reconstructed.
///
/// # Example
///
/// ```no_run
/// use upbit_rest::{Credentials, UpbitClient};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Quotation endpoints only
///     let client = UpbitClient::new().await?;
///     let tickers = client.get_ticker(&["KRW-BTC"]).await?;
///
///     // With authentication for exchange endpoints
///     let creds = Credentials::from_env()?;
///     let auth_client = UpbitClient::with_credentials(creds).await?;
///     let accounts = auth_client.get_accounts().await?;
///
///     Ok(())
/// }
/// ```
pub struct UpbitClient {
    http: Client,
    base_url: String,
    credentials: Option<Credentials>,
    markets: MarketCache,
    rate: RateLimitTracker,
}

impl UpbitClient {
    /// Create a new client without authentication
    ///
    /// Only quotation endpoints will be available. Fails if the market list
    /// cannot be fetched and decoded — there is no half-initialized client.
    pub async fn new() -> RestResult<Self> {
        Self::with_config(ClientConfig::default()).await
    }

    /// Create a new client with credentials
    ///
    /// All endpoints (quotation and exchange) will be available.
    pub async fn with_credentials(credentials: Credentials) -> RestResult<Self> {
        Self::with_config(ClientConfig::default().with_credentials(credentials)).await
    }

    /// Create a new client with custom configuration
    pub async fn with_config(config: ClientConfig) -> RestResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_deref().unwrap_or("upbit-rest/0.1.0"))
            .build()
            .map_err(RestError::Http)?;

        let rate = RateLimitTracker::default();
        let market_all =
            crate::endpoints::quotation::fetch_markets(&http, &config.base_url, &rate).await?;
        let markets = MarketCache::new(market_all.into_iter().map(|m| m.market).collect());

        info!("Created Upbit REST client with {} markets", markets.len());

        Ok(Self {
            http,
            base_url: config.base_url,
            credentials: config.credentials,
            markets,
            rate,
        })
    }

    /// Check if the client has credentials for exchange endpoints
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Cached market identifiers, in exchange listing order
    pub fn markets(&self) -> &[String] {
        self.markets.ids()
    }

    /// Check a market identifier against the cached snapshot
    pub fn validate_market(&self, market: &str) -> bool {
        self.markets.contains(market)
    }

    /// Latest `Remaining-Req` rate-limit value observed for a throttle group
    ///
    /// The client never throttles on its own; pollers inspect this and sleep
    /// between calls.
    pub fn remaining_req(&self, group: &str) -> Option<RemainingReq> {
        self.rate.get(group)
    }

    // ========================================================================
    // Quotation Endpoints (public)
    // ========================================================================

    /// Get quotation endpoints
    pub fn quotation(&self) -> QuotationEndpoints<'_> {
        QuotationEndpoints::new(&self.http, &self.base_url, &self.markets, &self.rate)
    }

    /// Get the full tradable market list
    pub async fn get_market_all(&self) -> RestResult<Vec<MarketInfo>> {
        self.quotation().get_market_all().await
    }

    /// Get minute candles
    ///
    /// # Arguments
    /// * `unit` - Candle width in minutes: 1, 3, 5, 10, 15, 30, 60 or 240
    /// * `market` - Market identifier (e.g. "KRW-BTC")
    /// * `to` - Last candle time, exclusive (optional)
    /// * `count` - Number of candles, max 200 (optional)
    pub async fn get_minutes_candles(
        &self,
        unit: u32,
        market: &str,
        to: Option<&str>,
        count: Option<u32>,
    ) -> RestResult<Vec<MinuteCandle>> {
        self.quotation()
            .get_minutes_candles(unit, market, to, count)
            .await
    }

    /// Get day candles
    pub async fn get_days_candles(
        &self,
        market: &str,
        to: Option<&str>,
        count: Option<u32>,
    ) -> RestResult<Vec<DayCandle>> {
        self.quotation().get_days_candles(market, to, count).await
    }

    /// Get week candles
    pub async fn get_weeks_candles(
        &self,
        market: &str,
        to: Option<&str>,
        count: Option<u32>,
    ) -> RestResult<Vec<PeriodCandle>> {
        self.quotation().get_weeks_candles(market, to, count).await
    }

    /// Get month candles
    pub async fn get_months_candles(
        &self,
        market: &str,
        to: Option<&str>,
        count: Option<u32>,
    ) -> RestResult<Vec<PeriodCandle>> {
        self.quotation().get_months_candles(market, to, count).await
    }

    /// Get recent trade ticks
    pub async fn get_trades_ticks(
        &self,
        market: &str,
        to: Option<&str>,
        count: Option<u32>,
        cursor: Option<&str>,
    ) -> RestResult<Vec<TradeTick>> {
        self.quotation()
            .get_trades_ticks(market, to, count, cursor)
            .await
    }

    /// Get ticker snapshots for one or more markets
    pub async fn get_ticker(&self, markets: &[&str]) -> RestResult<Vec<Ticker>> {
        self.quotation().get_ticker(markets).await
    }

    /// Get orderbook snapshots for one or more markets
    pub async fn get_orderbook(&self, markets: &[&str]) -> RestResult<Vec<Orderbook>> {
        self.quotation().get_orderbook(markets).await
    }

    // ========================================================================
    // Exchange Endpoints (authenticated)
    // ========================================================================

    /// Get account endpoints (requires credentials)
    pub fn account(&self) -> RestResult<AccountEndpoints<'_>> {
        let creds = self.credentials.as_ref().ok_or(RestError::AuthRequired)?;
        Ok(AccountEndpoints::new(
            &self.http,
            &self.base_url,
            &self.rate,
            creds,
        ))
    }

    /// Get trading endpoints (requires credentials)
    pub fn trading(&self) -> RestResult<TradingEndpoints<'_>> {
        let creds = self.credentials.as_ref().ok_or(RestError::AuthRequired)?;
        Ok(TradingEndpoints::new(
            &self.http,
            &self.base_url,
            &self.markets,
            &self.rate,
            creds,
        ))
    }

    /// Get funding endpoints (requires credentials)
    pub fn funding(&self) -> RestResult<FundingEndpoints<'_>> {
        let creds = self.credentials.as_ref().ok_or(RestError::AuthRequired)?;
        Ok(FundingEndpoints::new(
            &self.http,
            &self.base_url,
            &self.rate,
            creds,
        ))
    }

    /// List account balances
    pub async fn get_accounts(&self) -> RestResult<Vec<Account>> {
        self.account()?.get_accounts().await
    }

    /// Get order-placement constraints for a market
    pub async fn get_order_chance(&self, market: &str) -> RestResult<OrderChance> {
        self.trading()?.get_order_chance(market).await
    }

    /// Get one order by its identifier
    pub async fn get_order(&self, uuid: &str) -> RestResult<OrderInfo> {
        self.trading()?.get_order(uuid).await
    }

    /// List orders for a market, filtered by state
    pub async fn get_orders(
        &self,
        market: &str,
        state: OrderState,
        page: u32,
        order_by: SortOrder,
    ) -> RestResult<Vec<OrderInfo>> {
        self.trading()?.get_orders(market, state, page, order_by).await
    }

    /// Place a limit order
    pub async fn place_order(&self, order: &OrderRequest) -> RestResult<OrderInfo> {
        self.trading()?.place_order(order).await
    }

    /// Cancel an order by its identifier
    pub async fn cancel_order(&self, uuid: &str) -> RestResult<OrderInfo> {
        self.trading()?.cancel_order(uuid).await
    }

    /// List withdrawals
    pub async fn get_withdraws(
        &self,
        currency: Option<&str>,
        state: Option<WithdrawState>,
        limit: Option<u32>,
    ) -> RestResult<Vec<Withdraw>> {
        self.funding()?.get_withdraws(currency, state, limit).await
    }

    /// Get one withdrawal by its identifier
    pub async fn get_withdraw(&self, uuid: &str) -> RestResult<Withdraw> {
        self.funding()?.get_withdraw(uuid).await
    }

    /// Get withdrawal constraints for a currency
    pub async fn get_withdraw_chance(&self, currency: &str) -> RestResult<WithdrawChance> {
        self.funding()?.get_withdraw_chance(currency).await
    }

    /// Submit a coin withdrawal
    pub async fn withdraw_coin(
        &self,
        currency: &str,
        amount: Decimal,
        address: &str,
        secondary_address: Option<&str>,
    ) -> RestResult<Withdraw> {
        self.funding()?
            .withdraw_coin(currency, amount, address, secondary_address)
            .await
    }

    /// Submit a KRW withdrawal to the registered bank account
    pub async fn withdraw_krw(&self, amount: Decimal) -> RestResult<Withdraw> {
        self.funding()?.withdraw_krw(amount).await
    }

    /// List deposits
    pub async fn get_deposits(
        &self,
        currency: Option<&str>,
        limit: Option<u32>,
        page: Option<u32>,
        order_by: Option<SortOrder>,
    ) -> RestResult<Vec<Deposit>> {
        self.funding()?
            .get_deposits(currency, limit, page, order_by)
            .await
    }

    /// Get one deposit by its identifier
    pub async fn get_deposit(&self, uuid: &str) -> RestResult<Deposit> {
        self.funding()?.get_deposit(uuid).await
    }
}

impl std::fmt::Debug for UpbitClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpbitClient")
            .field("base_url", &self.base_url)
            .field("has_credentials", &self.has_credentials())
            .field("markets", &self.markets.len())
            .finish()
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API credentials (optional)
    pub credentials: Option<Credentials>,
    /// API host, `https://api.upbit.com` unless overridden
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Custom user agent
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set credentials
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Override the API host (used by tests to point at a mock server)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_builder() {
        let config = ClientConfig::new()
            .with_base_url("http://127.0.0.1:8080")
            .with_timeout(60)
            .with_user_agent("test-agent");

        assert_eq!(config.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.user_agent, Some("test-agent".to_string()));
    }

    #[test]
    fn test_default_config_targets_production_host() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.credentials.is_none());
    }
}

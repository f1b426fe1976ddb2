//! Public quotation endpoints
//!
//! These endpoints don't require authentication.

use crate::endpoints::read_response;
use crate::error::{RestError, RestResult};
use crate::market::MarketCache;
use crate::rate::RateLimitTracker;
use crate::types::{DayCandle, MarketInfo, MinuteCandle, Orderbook, PeriodCandle, TradeTick, Ticker};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

/// Minute-candle widths accepted by the exchange
const VALID_MINUTE_UNITS: [u32; 8] = [1, 3, 5, 10, 15, 30, 60, 240];

/// Public quotation endpoints
pub struct QuotationEndpoints<'a> {
    http: &'a Client,
    base_url: &'a str,
    markets: &'a MarketCache,
    rate: &'a RateLimitTracker,
}

impl<'a> QuotationEndpoints<'a> {
    pub(crate) fn new(
        http: &'a Client,
        base_url: &'a str,
        markets: &'a MarketCache,
        rate: &'a RateLimitTracker,
    ) -> Self {
        Self {
            http,
            base_url,
            markets,
            rate,
        }
    }

    /// Make an unauthenticated GET request
    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> RestResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Fetching {}", path);

        let response = self.http.get(&url).query(params).send().await?;
        read_response(response, self.rate).await
    }

    /// Get the full tradable market list
    ///
    /// Always re-fetches; the client's cached snapshot is taken once at
    /// construction and not updated by this call.
    #[instrument(skip(self))]
    pub async fn get_market_all(&self) -> RestResult<Vec<MarketInfo>> {
        fetch_markets(self.http, self.base_url, self.rate).await
    }

    /// Get minute candles
    ///
    /// # Arguments
    /// * `unit` - Candle width in minutes: 1, 3, 5, 10, 15, 30, 60 or 240
    /// * `market` - Market identifier (e.g. "KRW-BTC")
    /// * `to` - Last candle time, exclusive (`yyyy-MM-dd'T'HH:mm:ssXXX`);
    ///   `None` for the most recent candles
    /// * `count` - Number of candles (max 200)
    #[instrument(skip(self))]
    pub async fn get_minutes_candles(
        &self,
        unit: u32,
        market: &str,
        to: Option<&str>,
        count: Option<u32>,
    ) -> RestResult<Vec<MinuteCandle>> {
        if !VALID_MINUTE_UNITS.contains(&unit) {
            return Err(RestError::InvalidParameter(format!("invalid unit: {}", unit)));
        }
        self.markets.ensure(market)?;

        let path = format!("/v1/candles/minutes/{}", unit);
        let params = candle_params(market, to, count);
        self.get(&path, &params).await
    }

    /// Get day candles
    #[instrument(skip(self))]
    pub async fn get_days_candles(
        &self,
        market: &str,
        to: Option<&str>,
        count: Option<u32>,
    ) -> RestResult<Vec<DayCandle>> {
        self.markets.ensure(market)?;
        let params = candle_params(market, to, count);
        self.get("/v1/candles/days", &params).await
    }

    /// Get week candles
    #[instrument(skip(self))]
    pub async fn get_weeks_candles(
        &self,
        market: &str,
        to: Option<&str>,
        count: Option<u32>,
    ) -> RestResult<Vec<PeriodCandle>> {
        self.markets.ensure(market)?;
        let params = candle_params(market, to, count);
        self.get("/v1/candles/weeks", &params).await
    }

    /// Get month candles
    #[instrument(skip(self))]
    pub async fn get_months_candles(
        &self,
        market: &str,
        to: Option<&str>,
        count: Option<u32>,
    ) -> RestResult<Vec<PeriodCandle>> {
        self.markets.ensure(market)?;
        let params = candle_params(market, to, count);
        self.get("/v1/candles/months", &params).await
    }

    /// Get recent trade ticks
    ///
    /// # Arguments
    /// * `market` - Market identifier
    /// * `to` - Last trade time (`HHmmss` or `HH:mm:ss`); `None` for the
    ///   most recent trades
    /// * `count` - Number of trades
    /// * `cursor` - Pagination cursor (`sequential_id` of a previous page)
    #[instrument(skip(self))]
    pub async fn get_trades_ticks(
        &self,
        market: &str,
        to: Option<&str>,
        count: Option<u32>,
        cursor: Option<&str>,
    ) -> RestResult<Vec<TradeTick>> {
        self.markets.ensure(market)?;

        let mut params = vec![("market", market.to_string())];
        if let Some(to) = to {
            params.push(("to", to.to_string()));
        }
        if let Some(count) = count {
            params.push(("count", count.to_string()));
        }
        if let Some(cursor) = cursor {
            params.push(("cursor", cursor.to_string()));
        }
        self.get("/v1/trades/ticks", &params).await
    }

    /// Get ticker snapshots for one or more markets
    ///
    /// The list must be non-empty and every element a known market.
    #[instrument(skip(self), fields(count = markets.len()))]
    pub async fn get_ticker(&self, markets: &[&str]) -> RestResult<Vec<Ticker>> {
        let joined = self.markets.ensure_all(markets)?;
        let params = [("markets", joined)];
        self.get("/v1/ticker", &params).await
    }

    /// Get orderbook snapshots for one or more markets
    #[instrument(skip(self), fields(count = markets.len()))]
    pub async fn get_orderbook(&self, markets: &[&str]) -> RestResult<Vec<Orderbook>> {
        let joined = self.markets.ensure_all(markets)?;
        let params = [("markets", joined)];
        self.get("/v1/orderbook", &params).await
    }
}

/// Common candle query parameters, in transmission order
fn candle_params(market: &str, to: Option<&str>, count: Option<u32>) -> Vec<(&'static str, String)> {
    let mut params = vec![("market", market.to_string())];
    if let Some(to) = to {
        params.push(("to", to.to_string()));
    }
    if let Some(count) = count {
        params.push(("count", count.to_string()));
    }
    params
}

/// Fetch the market list without a constructed client
///
/// Used during client construction, before the market cache exists.
pub(crate) async fn fetch_markets(
    http: &Client,
    base_url: &str,
    rate: &RateLimitTracker,
) -> RestResult<Vec<MarketInfo>> {
    let url = format!("{}/v1/market/all", base_url);
    debug!("Fetching market list");

    let response = http.get(&url).send().await?;
    read_response(response, rate).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candle_params_order() {
        let params = candle_params("KRW-BTC", Some("2023-01-01T00:00:00Z"), Some(10));
        let keys: Vec<&str> = params.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, ["market", "to", "count"]);
    }

    #[test]
    fn test_candle_params_optional_fields() {
        let params = candle_params("KRW-BTC", None, None);
        assert_eq!(params, vec![("market", "KRW-BTC".to_string())]);
    }

    #[test]
    fn test_valid_minute_units() {
        assert!(VALID_MINUTE_UNITS.contains(&240));
        assert!(!VALID_MINUTE_UNITS.contains(&2));
    }
}

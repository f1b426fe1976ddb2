//! Trading endpoints for order management
//!
//! These endpoints require authentication.

use crate::auth::Credentials;
use crate::endpoints::{encode_params, read_response};
use crate::error::RestResult;
use crate::market::{self, MarketCache};
use crate::rate::RateLimitTracker;
use crate::types::{OrderChance, OrderInfo, OrderRequest, OrderState, SortOrder};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

/// Trading endpoints for order management
pub struct TradingEndpoints<'a> {
    http: &'a Client,
    base_url: &'a str,
    markets: &'a MarketCache,
    rate: &'a RateLimitTracker,
    credentials: &'a Credentials,
}

impl<'a> TradingEndpoints<'a> {
    pub(crate) fn new(
        http: &'a Client,
        base_url: &'a str,
        markets: &'a MarketCache,
        rate: &'a RateLimitTracker,
        credentials: &'a Credentials,
    ) -> Self {
        Self {
            http,
            base_url,
            markets,
            rate,
            credentials,
        }
    }

    /// Make an authenticated GET request, parameters as URL query
    async fn signed_get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> RestResult<T> {
        let query = encode_params(params)?;
        let token = self.credentials.bearer_token(query.as_deref());
        let url = format!("{}{}", self.base_url, path);

        debug!("Making authenticated request to {}", path);

        let response = self
            .http
            .get(&url)
            .query(params)
            .bearer_auth(token)
            .send()
            .await?;
        read_response(response, self.rate).await
    }

    /// Make an authenticated POST request, parameters as form body
    async fn signed_post<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> RestResult<T> {
        let query = encode_params(params)?;
        let token = self.credentials.bearer_token(query.as_deref());
        let url = format!("{}{}", self.base_url, path);

        debug!("Making authenticated request to {}", path);

        let response = self
            .http
            .post(&url)
            .form(params)
            .bearer_auth(token)
            .send()
            .await?;
        read_response(response, self.rate).await
    }

    /// Make an authenticated DELETE request, parameters as form body
    async fn signed_delete<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> RestResult<T> {
        let query = encode_params(params)?;
        let token = self.credentials.bearer_token(query.as_deref());
        let url = format!("{}{}", self.base_url, path);

        debug!("Making authenticated request to {}", path);

        let response = self
            .http
            .delete(&url)
            .form(params)
            .bearer_auth(token)
            .send()
            .await?;
        read_response(response, self.rate).await
    }

    /// Get order-placement constraints for a market
    #[instrument(skip(self))]
    pub async fn get_order_chance(&self, market: &str) -> RestResult<OrderChance> {
        self.markets.ensure(market)?;
        let params = [("market", market.to_string())];
        self.signed_get("/v1/orders/chance", &params).await
    }

    /// Get one order by its identifier
    #[instrument(skip(self))]
    pub async fn get_order(&self, uuid: &str) -> RestResult<OrderInfo> {
        let params = [("uuid", uuid.to_string())];
        self.signed_get("/v1/order", &params).await
    }

    /// List orders for a market, filtered by state
    ///
    /// # Arguments
    /// * `market` - Market identifier
    /// * `state` - Order state filter
    /// * `page` - Page number, starting at 1
    /// * `order_by` - Result ordering
    #[instrument(skip(self))]
    pub async fn get_orders(
        &self,
        market: &str,
        state: OrderState,
        page: u32,
        order_by: SortOrder,
    ) -> RestResult<Vec<OrderInfo>> {
        self.markets.ensure(market)?;

        let params = [
            ("market", market.to_string()),
            ("state", state.as_str().to_string()),
            ("page", page.to_string()),
            ("order_by", order_by.as_str().to_string()),
        ];
        self.signed_get("/v1/orders", &params).await
    }

    /// Place a limit order
    ///
    /// The market must be in the cached list, and on KRW-quoted markets the
    /// price must lie on the tick-size grid. Both checks run before any
    /// network call; a rejected order performs zero round trips.
    #[instrument(skip(self, order), fields(market = %order.market, side = %order.side))]
    pub async fn place_order(&self, order: &OrderRequest) -> RestResult<OrderInfo> {
        self.markets.ensure(&order.market)?;
        if market::is_krw_market(&order.market) {
            market::ensure_valid_price(order.price)?;
        }

        debug!(
            "Placing {} order for {} {} at {}",
            order.side, order.volume, order.market, order.price
        );

        self.signed_post("/v1/orders", &order.to_params()).await
    }

    /// Cancel an order by its identifier
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, uuid: &str) -> RestResult<OrderInfo> {
        let params = [("uuid", uuid.to_string())];
        debug!("Cancelling order {}", uuid);
        self.signed_delete("/v1/order", &params).await
    }
}

//! Funding endpoints for withdrawals and deposits
//!
//! These endpoints require authentication.

use crate::auth::Credentials;
use crate::endpoints::{encode_params, read_response};
use crate::error::{RestError, RestResult};
use crate::rate::RateLimitTracker;
use crate::types::{Deposit, SortOrder, Withdraw, WithdrawChance, WithdrawState};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

/// Maximum `limit` accepted by the withdrawal and deposit listings
const LIMIT_MAX: u32 = 100;

/// Funding endpoints for withdrawals and deposits
pub struct FundingEndpoints<'a> {
    http: &'a Client,
    base_url: &'a str,
    rate: &'a RateLimitTracker,
    credentials: &'a Credentials,
}

impl<'a> FundingEndpoints<'a> {
    pub(crate) fn new(
        http: &'a Client,
        base_url: &'a str,
        rate: &'a RateLimitTracker,
        credentials: &'a Credentials,
    ) -> Self {
        Self {
            http,
            base_url,
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

    /// List withdrawals
    ///
    /// # Arguments
    /// * `currency` - Filter by currency code (optional)
    /// * `state` - Filter by withdrawal state (optional)
    /// * `limit` - Page size, 1 to 100 (optional)
    #[instrument(skip(self))]
    pub async fn get_withdraws(
        &self,
        currency: Option<&str>,
        state: Option<WithdrawState>,
        limit: Option<u32>,
    ) -> RestResult<Vec<Withdraw>> {
        let mut params: Vec<(&str, String)> = Vec::new();

        if let Some(currency) = currency {
            params.push(("currency", currency.to_string()));
        }
        if let Some(state) = state {
            params.push(("state", state.as_str().to_string()));
        }
        if let Some(limit) = limit {
            if limit == 0 || limit > LIMIT_MAX {
                return Err(RestError::InvalidParameter(format!(
                    "invalid limit: {}",
                    limit
                )));
            }
            params.push(("limit", limit.to_string()));
        }

        self.signed_get("/v1/withdraws", &params).await
    }

    /// Get one withdrawal by its identifier
    #[instrument(skip(self))]
    pub async fn get_withdraw(&self, uuid: &str) -> RestResult<Withdraw> {
        let params = [("uuid", uuid.to_string())];
        self.signed_get("/v1/withdraw", &params).await
    }

    /// Get withdrawal constraints for a currency
    #[instrument(skip(self))]
    pub async fn get_withdraw_chance(&self, currency: &str) -> RestResult<WithdrawChance> {
        let params = [("currency", currency.to_string())];
        self.signed_get("/v1/withdraws/chance", &params).await
    }

    /// Submit a coin withdrawal
    ///
    /// # Arguments
    /// * `currency` - Currency code
    /// * `amount` - Withdrawal amount
    /// * `address` - Destination wallet address
    /// * `secondary_address` - Secondary address, for currencies that need one
    #[instrument(skip(self))]
    pub async fn withdraw_coin(
        &self,
        currency: &str,
        amount: Decimal,
        address: &str,
        secondary_address: Option<&str>,
    ) -> RestResult<Withdraw> {
        let mut params = vec![
            ("currency", currency.to_string()),
            ("amount", amount.to_string()),
            ("address", address.to_string()),
        ];
        if let Some(secondary) = secondary_address {
            params.push(("secondary_address", secondary.to_string()));
        }

        debug!("Submitting {} {} withdrawal", amount, currency);
        self.signed_post("/v1/withdraws/coin", &params).await
    }

    /// Submit a KRW withdrawal to the registered bank account
    #[instrument(skip(self))]
    pub async fn withdraw_krw(&self, amount: Decimal) -> RestResult<Withdraw> {
        let params = [("amount", amount.to_string())];
        debug!("Submitting {} KRW withdrawal", amount);
        self.signed_post("/v1/withdraws/krw", &params).await
    }

    /// List deposits
    ///
    /// # Arguments
    /// * `currency` - Filter by currency code (optional)
    /// * `limit` - Page size, 1 to 100 (optional)
    /// * `page` - Page number (optional)
    /// * `order_by` - Result ordering (optional)
    #[instrument(skip(self))]
    pub async fn get_deposits(
        &self,
        currency: Option<&str>,
        limit: Option<u32>,
        page: Option<u32>,
        order_by: Option<SortOrder>,
    ) -> RestResult<Vec<Deposit>> {
        let mut params: Vec<(&str, String)> = Vec::new();

        if let Some(currency) = currency {
            params.push(("currency", currency.to_string()));
        }
        if let Some(limit) = limit {
            if limit == 0 || limit > LIMIT_MAX {
                return Err(RestError::InvalidParameter(format!(
                    "invalid limit: {}",
                    limit
                )));
            }
            params.push(("limit", limit.to_string()));
        }
        if let Some(page) = page {
            params.push(("page", page.to_string()));
        }
        if let Some(order_by) = order_by {
            params.push(("order_by", order_by.as_str().to_string()));
        }

        self.signed_get("/v1/deposits", &params).await
    }

    /// Get one deposit by its identifier
    #[instrument(skip(self))]
    pub async fn get_deposit(&self, uuid: &str) -> RestResult<Deposit> {
        let params = [("uuid", uuid.to_string())];
        self.signed_get("/v1/deposit", &params).await
    }
}

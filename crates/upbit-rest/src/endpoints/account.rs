//! Private account endpoints
//!
//! These endpoints require authentication.

use crate::auth::Credentials;
use crate::endpoints::read_response;
use crate::error::RestResult;
use crate::rate::RateLimitTracker;
use crate::types::Account;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

/// Private account endpoints
pub struct AccountEndpoints<'a> {
    http: &'a Client,
    base_url: &'a str,
    rate: &'a RateLimitTracker,
    credentials: &'a Credentials,
}

impl<'a> AccountEndpoints<'a> {
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

    /// Make an authenticated parameterless GET request
    async fn signed_get<T: DeserializeOwned>(&self, path: &str) -> RestResult<T> {
        let token = self.credentials.bearer_token(None);
        let url = format!("{}{}", self.base_url, path);

        debug!("Making authenticated request to {}", path);

        let response = self.http.get(&url).bearer_auth(token).send().await?;
        read_response(response, self.rate).await
    }

    /// List the balances of every currency the account holds
    #[instrument(skip(self))]
    pub async fn get_accounts(&self) -> RestResult<Vec<Account>> {
        self.signed_get("/v1/accounts").await
    }
}

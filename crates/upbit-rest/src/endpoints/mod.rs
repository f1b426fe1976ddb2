//! API endpoint implementations

pub mod account;
pub mod funding;
pub mod quotation;
pub mod trading;

pub use account::AccountEndpoints;
pub use funding::FundingEndpoints;
pub use quotation::QuotationEndpoints;
pub use trading::TradingEndpoints;

use crate::error::{RestError, RestResult};
use crate::rate::RateLimitTracker;
use serde::de::DeserializeOwned;

/// Check the status, record the rate-limit header and decode the body
///
/// Success is exactly HTTP 200 or 201. Any other status becomes an API error
/// carrying the status and raw body; a success status with an undecodable
/// body is a parse error, never partial data.
pub(crate) async fn read_response<T: DeserializeOwned>(
    response: reqwest::Response,
    rate: &RateLimitTracker,
) -> RestResult<T> {
    rate.record(response.headers());

    let status = response.status().as_u16();
    let body = response.text().await?;

    if status != 200 && status != 201 {
        return Err(RestError::from_response(status, body));
    }

    serde_json::from_str(&body).map_err(|e| RestError::Parse(e.to_string()))
}

/// Encode ordered pairs into the canonical `key=value&key=value` form
///
/// This exact string is both transmitted and signed into the token's `query`
/// claim, so the two cannot drift apart. `None` for an empty parameter list,
/// which omits the claim.
pub(crate) fn encode_params(params: &[(&str, String)]) -> RestResult<Option<String>> {
    if params.is_empty() {
        return Ok(None);
    }
    serde_urlencoded::to_string(params)
        .map(Some)
        .map_err(|e| RestError::InvalidParameter(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_preserves_insertion_order() {
        let params = [
            ("market", "KRW-BTC".to_string()),
            ("side", "bid".to_string()),
            ("volume", "0.01".to_string()),
        ];
        assert_eq!(
            encode_params(&params).unwrap().unwrap(),
            "market=KRW-BTC&side=bid&volume=0.01"
        );
    }

    #[test]
    fn test_encode_empty_is_none() {
        assert!(encode_params(&[]).unwrap().is_none());
    }
}

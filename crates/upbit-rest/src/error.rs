//! Error types for REST API operations

use rust_decimal::Decimal;
use serde::Deserialize;

/// Errors that can occur during REST API operations
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// HTTP transport failed before a response was received
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Missing API credentials for an exchange endpoint
    #[error("Authentication required for this endpoint")]
    AuthRequired,

    /// API returned a non-success status
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message, parsed from Upbit's error envelope when present
        message: String,
        /// Raw response body for diagnostics
        body: String,
    },

    /// Response body was not valid JSON despite a success status
    #[error("Parse error: {0}")]
    Parse(String),

    /// Market identifier is not in the cached market list
    #[error("invalid market: {0}")]
    InvalidMarket(String),

    /// Order price does not lie on the KRW tick-size grid
    #[error("invalid price: {0}")]
    InvalidPrice(Decimal),

    /// Invalid request parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Environment variable not set
    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),
}

/// Upbit error envelope: `{"error": {"name": ..., "message": ...}}`
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    name: Option<serde_json::Value>,
    message: Option<String>,
}

impl RestError {
    /// Build an API error from a non-success response.
    ///
    /// Upbit error bodies carry a `{"error": {"name", "message"}}` envelope;
    /// when present the message is lifted out, otherwise the raw body text is
    /// used as the message.
    pub(crate) fn from_response(status: u16, body: String) -> Self {
        // The error name is a string for most failures but a bare number for
        // some gateway-level ones.
        let name_text = |name: serde_json::Value| match name {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        };

        let message = serde_json::from_str::<ErrorEnvelope>(&body)
            .ok()
            .and_then(|env| match (env.error.name, env.error.message) {
                (Some(name), Some(msg)) => Some(format!("{}: {}", name_text(name), msg)),
                (None, Some(msg)) => Some(msg),
                (Some(name), None) => Some(name_text(name)),
                (None, None) => None,
            })
            .unwrap_or_else(|| body.clone());

        Self::Api {
            status,
            message,
            body,
        }
    }

    /// Check if this error indicates rate limiting
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::Api { status: 429, .. })
    }

    /// Check if this error was raised before any network call was made
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidMarket(_) | Self::InvalidPrice(_) | Self::InvalidParameter(_)
        )
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_envelope_parsing() {
        let body = r#"{"error":{"name":"too_many_requests","message":"요청 수 제한을 초과했습니다."}}"#;
        let err = RestError::from_response(429, body.to_string());

        match &err {
            RestError::Api {
                status, message, ..
            } => {
                assert_eq!(*status, 429);
                assert!(message.contains("too_many_requests"));
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
        assert!(err.is_rate_limited());
    }

    #[test]
    fn test_raw_body_fallback() {
        let err = RestError::from_response(502, "Bad Gateway".to_string());

        match err {
            RestError::Api {
                status,
                message,
                body,
            } => {
                assert_eq!(status, 502);
                assert_eq!(message, "Bad Gateway");
                assert_eq!(body, "Bad Gateway");
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_validation_errors() {
        assert!(RestError::InvalidMarket("KRW-ZZZ".to_string()).is_validation());
        assert!(RestError::InvalidParameter("no markets".to_string()).is_validation());
        assert!(!RestError::AuthRequired.is_validation());
    }
}

//! Authentication credentials for the Upbit API
//!
//! Exchange endpoints are authenticated with a per-request JWT signed with
//! HMAC-SHA256 (`HS256`). The token claims are the access key, a millisecond
//! nonce, and — when the request carries parameters — the URL-encoded query
//! string.
//!
//! # Security
//!
//! The secret key is stored using the `secrecy` crate which:
//! - Zeroizes memory on drop (prevents memory scanning)
//! - Prevents accidental logging via Debug impl
//! - Provides explicit access via `expose_secret()`

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use sha2::Sha256;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{RestError, RestResult};

type HmacSha256 = Hmac<Sha256>;

/// Fixed JWT header for HS256, pre-encoded: `{"alg":"HS256","typ":"JWT"}`
const JWT_HEADER: &str = r#"{"alg":"HS256","typ":"JWT"}"#;

/// Token claims. Field order matters for byte-compatibility with tokens
/// produced by the reference implementation.
#[derive(Serialize)]
struct Claims<'a> {
    access_key: &'a str,
    nonce: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    query: Option<&'a str>,
}

/// API credentials for authenticated requests
///
/// The secret is automatically zeroized when the Credentials are dropped,
/// preventing sensitive data from remaining in memory.
pub struct Credentials {
    /// Access key (public)
    access_key: String,
    /// Secret key (zeroized on drop)
    secret: SecretString,
}

impl Credentials {
    /// Create new credentials from an access key and secret key pair
    ///
    /// Both values are opaque strings issued by Upbit's Open API console.
    pub fn new(access_key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            secret: SecretString::from(secret.into()),
        }
    }

    /// Create credentials from environment variables
    ///
    /// Reads `UPBIT_ACCESS_KEY` and `UPBIT_SECRET_KEY` from the environment.
    pub fn from_env() -> RestResult<Self> {
        let access_key = std::env::var("UPBIT_ACCESS_KEY")
            .map_err(|_| RestError::EnvVarNotSet("UPBIT_ACCESS_KEY".to_string()))?;
        let secret = std::env::var("UPBIT_SECRET_KEY")
            .map_err(|_| RestError::EnvVarNotSet("UPBIT_SECRET_KEY".to_string()))?;

        Ok(Self::new(access_key, secret))
    }

    /// Get the access key
    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    /// Current wall-clock time in milliseconds since epoch
    ///
    /// Upbit requires the nonce to be non-decreasing per access key; the
    /// millisecond clock satisfies that for the one-round-trip-per-call model.
    fn nonce() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Time went backwards")
            .as_millis() as u64
    }

    /// Build the bearer token for one request
    ///
    /// # Arguments
    /// * `query` - Canonical `key=value&key=value` encoding of the request
    ///   parameters, in the order they will be transmitted. `None` for
    ///   parameterless requests, which omits the `query` claim entirely.
    ///
    /// # Returns
    /// The compact JWT to place in an `Authorization: Bearer` header. The
    /// token is single-use by convention; a fresh one is signed per request.
    pub fn bearer_token(&self, query: Option<&str>) -> String {
        self.token_with_nonce(Self::nonce(), query)
    }

    /// Sign a token with an explicit nonce
    ///
    /// JWT compact encoding:
    /// 1. base64url(header) and base64url(claims JSON), no padding
    /// 2. HMAC-SHA256(secret, header_b64 + "." + claims_b64)
    /// 3. Append base64url(signature)
    pub(crate) fn token_with_nonce(&self, nonce: u64, query: Option<&str>) -> String {
        let claims = Claims {
            access_key: &self.access_key,
            nonce,
            query,
        };
        let payload = serde_json::to_string(&claims).expect("claims are always serializable");

        let signing_input = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(JWT_HEADER),
            URL_SAFE_NO_PAD.encode(payload)
        );

        let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(signing_input.as_bytes());
        let signature = mac.finalize();

        format!(
            "{}.{}",
            signing_input,
            URL_SAFE_NO_PAD.encode(signature.into_bytes())
        )
    }
}

impl Clone for Credentials {
    fn clone(&self) -> Self {
        Self {
            access_key: self.access_key.clone(),
            secret: SecretString::from(self.secret.expose_secret().to_string()),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field(
                "access_key",
                &format!("{}...", &self.access_key[..8.min(self.access_key.len())]),
            )
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_credentials() -> Credentials {
        Credentials::new("test_access_key", "test_secret_key")
    }

    fn decode_segment(segment: &str) -> serde_json::Value {
        let bytes = URL_SAFE_NO_PAD.decode(segment).expect("valid base64url");
        serde_json::from_slice(&bytes).expect("valid JSON")
    }

    #[test]
    fn test_token_has_three_segments() {
        let token = test_credentials().token_with_nonce(1_616_492_376_594, None);
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn test_header_segment() {
        let token = test_credentials().token_with_nonce(1_616_492_376_594, None);
        let header = decode_segment(token.split('.').next().unwrap());

        assert_eq!(header["alg"], "HS256");
        assert_eq!(header["typ"], "JWT");
    }

    #[test]
    fn test_claims_without_query() {
        let token = test_credentials().token_with_nonce(1_616_492_376_594, None);
        let claims = decode_segment(token.split('.').nth(1).unwrap());

        assert_eq!(claims["access_key"], "test_access_key");
        assert_eq!(claims["nonce"], 1_616_492_376_594u64);
        assert!(claims.get("query").is_none());
    }

    #[test]
    fn test_claims_with_query() {
        let token = test_credentials().token_with_nonce(1, Some("market=KRW-BTC&side=bid"));
        let claims = decode_segment(token.split('.').nth(1).unwrap());

        assert_eq!(claims["query"], "market=KRW-BTC&side=bid");
    }

    #[test]
    fn test_token_is_deterministic() {
        let creds = test_credentials();
        let a = creds.token_with_nonce(42, Some("uuid=abc"));
        let b = creds.token_with_nonce(42, Some("uuid=abc"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_token_depends_on_every_input() {
        let creds = test_credentials();
        let base = creds.token_with_nonce(42, Some("uuid=abc"));

        assert_ne!(base, creds.token_with_nonce(43, Some("uuid=abc")));
        assert_ne!(base, creds.token_with_nonce(42, Some("uuid=abd")));
        assert_ne!(base, creds.token_with_nonce(42, None));

        let other_secret = Credentials::new("test_access_key", "other_secret_key");
        assert_ne!(base, other_secret.token_with_nonce(42, Some("uuid=abc")));

        let other_key = Credentials::new("other_access_key", "test_secret_key");
        assert_ne!(base, other_key.token_with_nonce(42, Some("uuid=abc")));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let debug = format!("{:?}", test_credentials());
        assert!(!debug.contains("test_secret_key"));
        assert!(debug.contains("[REDACTED]"));
    }
}

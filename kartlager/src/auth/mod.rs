//! OAuth2 client-credentials token cache.
//!
//! The geodata APIs authenticate with bearer tokens obtained from the API
//! manager's token endpoint via a client-credentials exchange. Tokens are
//! cached per [`TokenCache`] instance and refreshed when they come within
//! a safety margin of their reported expiry.
//!
//! The cache is an explicit component handed to callers, never module
//! state: tests create isolated instances instead of resetting globals.
//!
//! # Refresh serialization
//!
//! The cache entry's mutex is held across the network exchange, so
//! concurrent callers that miss the cache wait for the in-flight refresh
//! instead of issuing redundant exchanges of their own.

use crate::api::{ApiError, AsyncHttpClient};
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Tokens are refreshed this long before their reported expiry.
pub const EXPIRY_MARGIN: Duration = Duration::from_secs(5 * 60);

/// A cached bearer token with its absolute expiry.
#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at: Instant,
}

/// Token endpoint response body. This wire shape talks to a real external
/// service and must not change.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

/// Caches a bearer token obtained through the client-credentials grant.
pub struct TokenCache<C: AsyncHttpClient> {
    http_client: C,
    token_url: String,
    client_id: Option<String>,
    client_secret: Option<String>,
    cached: Mutex<Option<CachedToken>>,
}

impl<C: AsyncHttpClient> TokenCache<C> {
    /// Creates an empty cache for the given token endpoint.
    ///
    /// Credentials may be absent; `get_token` then fails with a
    /// configuration error before any network call.
    pub fn new(
        http_client: C,
        token_url: impl Into<String>,
        client_id: Option<String>,
        client_secret: Option<String>,
    ) -> Self {
        Self {
            http_client,
            token_url: token_url.into(),
            client_id,
            client_secret,
            cached: Mutex::new(None),
        }
    }

    /// Returns a valid bearer token, reusing the cached one while it has
    /// more than [`EXPIRY_MARGIN`] left before expiry.
    ///
    /// # Errors
    ///
    /// - `ApiError::Configuration` if client id or secret is missing
    ///   (checked before any network traffic)
    /// - `ApiError::Upstream` if the token endpoint answers non-success,
    ///   carrying the HTTP status
    /// - `ApiError::InvalidResponse` if the token body cannot be decoded
    pub async fn get_token(&self) -> Result<String, ApiError> {
        let mut guard = self.cached.lock().await;

        if let Some(entry) = guard.as_ref() {
            if entry.expires_at.saturating_duration_since(Instant::now()) > EXPIRY_MARGIN {
                debug!("Reusing cached access token");
                return Ok(entry.token.clone());
            }
        }

        let client_id = self
            .client_id
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                ApiError::Configuration("client id is not configured".to_string())
            })?;
        let client_secret = self
            .client_secret
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                ApiError::Configuration("client secret is not configured".to_string())
            })?;

        debug!(url = %self.token_url, "Requesting new access token");
        let response = self
            .http_client
            .post_form(
                &self.token_url,
                &[
                    ("grant_type", "client_credentials"),
                    ("client_id", client_id),
                    ("client_secret", client_secret),
                ],
            )
            .await?;

        if !response.is_success() {
            return Err(ApiError::Upstream {
                status: response.status,
                message: "token endpoint refused the credential exchange".to_string(),
            });
        }

        let parsed: TokenResponse = serde_json::from_slice(&response.body)
            .map_err(|e| ApiError::InvalidResponse(format!("Malformed token response: {}", e)))?;

        info!(expires_in = parsed.expires_in, "Access token refreshed");
        let entry = CachedToken {
            token: parsed.access_token,
            expires_at: Instant::now() + Duration::from_secs(parsed.expires_in),
        };
        let token = entry.token.clone();
        *guard = Some(entry);

        Ok(token)
    }

    /// Clears the cached entry unconditionally.
    ///
    /// The next `get_token` call performs a fresh exchange. Used for
    /// forced refresh and test isolation.
    pub async fn invalidate(&self) {
        *self.cached.lock().await = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::CountingHttpClient;
    use std::sync::Arc;

    const TOKEN_URL: &str = "https://apimanager.example.test/oauth2/token";

    fn token_body(token: &str, expires_in: u64) -> String {
        format!(
            r#"{{"access_token":"{}","expires_in":{},"token_type":"Bearer"}}"#,
            token, expires_in
        )
    }

    fn cache_with(client: CountingHttpClient) -> TokenCache<CountingHttpClient> {
        TokenCache::new(
            client,
            TOKEN_URL,
            Some("client-id".to_string()),
            Some("client-secret".to_string()),
        )
    }

    #[tokio::test]
    async fn test_first_call_performs_one_exchange() {
        let client = CountingHttpClient::ok(&token_body("tok-1", 3600));
        let cache = cache_with(client.clone());

        let token = cache.get_token().await.unwrap();
        assert_eq!(token, "tok-1");
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_second_call_reuses_cached_token() {
        let client = CountingHttpClient::ok(&token_body("tok-1", 3600));
        let cache = cache_with(client.clone());

        let first = cache.get_token().await.unwrap();
        let second = cache.get_token().await.unwrap();
        assert_eq!(first, second);
        assert_eq!(client.call_count(), 1, "Cached token must not re-exchange");
    }

    #[tokio::test]
    async fn test_token_within_margin_is_refreshed() {
        // 60s lifetime is inside the 5-minute margin, so the entry is
        // already considered stale on the next call.
        let client = CountingHttpClient::ok(&token_body("tok-short", 60));
        let cache = cache_with(client.clone());

        cache.get_token().await.unwrap();
        cache.get_token().await.unwrap();
        assert_eq!(client.call_count(), 2);
    }

    #[tokio::test]
    async fn test_missing_credentials_fails_without_network() {
        let client = CountingHttpClient::ok(&token_body("tok-1", 3600));
        let cache = TokenCache::new(client.clone(), TOKEN_URL, None, None);

        let result = cache.get_token().await;
        assert!(matches!(result, Err(ApiError::Configuration(_))));
        assert_eq!(client.call_count(), 0, "No network call may be attempted");
    }

    #[tokio::test]
    async fn test_empty_credentials_are_treated_as_missing() {
        let client = CountingHttpClient::ok(&token_body("tok-1", 3600));
        let cache = TokenCache::new(
            client.clone(),
            TOKEN_URL,
            Some(String::new()),
            Some("secret".to_string()),
        );

        assert!(matches!(
            cache.get_token().await,
            Err(ApiError::Configuration(_))
        ));
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn test_non_success_status_is_upstream_error() {
        let client = CountingHttpClient::status(500);
        let cache = cache_with(client.clone());

        match cache.get_token().await {
            Err(ApiError::Upstream { status, .. }) => assert_eq!(status, 500),
            other => panic!("Expected Upstream error, got {:?}", other),
        }
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_malformed_body_is_invalid_response() {
        let client = CountingHttpClient::ok("not json");
        let cache = cache_with(client.clone());

        assert!(matches!(
            cache.get_token().await,
            Err(ApiError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_invalidate_forces_refresh() {
        let client = CountingHttpClient::ok(&token_body("tok-1", 3600));
        let cache = cache_with(client.clone());

        cache.get_token().await.unwrap();
        cache.invalidate().await;
        cache.get_token().await.unwrap();
        assert_eq!(client.call_count(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_first_calls_single_flight() {
        let client = CountingHttpClient::ok(&token_body("tok-1", 3600));
        let cache = Arc::new(cache_with(client.clone()));

        let a = Arc::clone(&cache);
        let b = Arc::clone(&cache);
        let (ra, rb) = tokio::join!(
            tokio::spawn(async move { a.get_token().await }),
            tokio::spawn(async move { b.get_token().await }),
        );

        assert_eq!(ra.unwrap().unwrap(), "tok-1");
        assert_eq!(rb.unwrap().unwrap(), "tok-1");
        assert_eq!(
            client.call_count(),
            1,
            "Concurrent misses must share one exchange"
        );
    }
}

//! HTTP client abstraction for testability
//!
//! Every API client and the token cache receive their HTTP client by
//! injection through [`AsyncHttpClient`], so tests run against mocks and
//! never touch the network.
//!
//! Unlike a plain body-or-error client, responses carry their HTTP status:
//! callers decide how a non-success status maps into an error (or, for
//! search-style queries, into an empty result on 404).

use super::types::ApiError;
use std::future::Future;
use tracing::{debug, trace, warn};

/// An HTTP response: status code plus raw body.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for asynchronous HTTP client operations.
///
/// Implementations return `Ok` for any HTTP status; `Err` is reserved for
/// transport failures (connect, timeout, body read).
pub trait AsyncHttpClient: Send + Sync {
    /// Performs a GET request.
    fn get(&self, url: &str) -> impl Future<Output = Result<HttpResponse, ApiError>> + Send;

    /// Performs a GET request with Bearer token authentication.
    fn get_with_bearer(
        &self,
        url: &str,
        bearer_token: &str,
    ) -> impl Future<Output = Result<HttpResponse, ApiError>> + Send;

    /// Performs a POST request with a form-encoded body.
    fn post_form(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> impl Future<Output = Result<HttpResponse, ApiError>> + Send;

    /// Performs a POST request with a JSON body and Bearer authentication.
    fn post_json_with_bearer(
        &self,
        url: &str,
        json_body: &str,
        bearer_token: &str,
    ) -> impl Future<Output = Result<HttpResponse, ApiError>> + Send;
}

/// Default User-Agent string for HTTP requests.
const DEFAULT_USER_AGENT: &str = concat!("kartlager/", env!("CARGO_PKG_VERSION"));

/// Real HTTP client implementation using reqwest.
#[derive(Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    /// Creates a new ReqwestClient with default configuration.
    pub fn new() -> Result<Self, ApiError> {
        Self::with_timeout(30)
    }

    /// Creates a new ReqwestClient with custom timeout.
    pub fn with_timeout(timeout_secs: u64) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .map_err(|e| ApiError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    async fn read_response(
        url: &str,
        response: reqwest::Response,
    ) -> Result<HttpResponse, ApiError> {
        let status = response.status().as_u16();
        match response.bytes().await {
            Ok(bytes) => {
                trace!(url = url, status = status, bytes = bytes.len(), "HTTP response read");
                Ok(HttpResponse::new(status, bytes.to_vec()))
            }
            Err(e) => {
                warn!(url = url, error = %e, "Failed to read response body");
                Err(ApiError::Http(format!("Failed to read response: {}", e)))
            }
        }
    }
}

impl AsyncHttpClient for ReqwestClient {
    async fn get(&self, url: &str) -> Result<HttpResponse, ApiError> {
        debug!(url = url, "HTTP GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::Http(format!("Request failed: {}", e)))?;

        Self::read_response(url, response).await
    }

    async fn get_with_bearer(
        &self,
        url: &str,
        bearer_token: &str,
    ) -> Result<HttpResponse, ApiError> {
        debug!(url = url, "HTTP GET (bearer)");
        let response = self
            .client
            .get(url)
            .header("Authorization", format!("Bearer {}", bearer_token))
            .send()
            .await
            .map_err(|e| ApiError::Http(format!("Request failed: {}", e)))?;

        Self::read_response(url, response).await
    }

    async fn post_form(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<HttpResponse, ApiError> {
        debug!(url = url, "HTTP POST (form)");
        let response = self
            .client
            .post(url)
            .form(params)
            .send()
            .await
            .map_err(|e| ApiError::Http(format!("POST request failed: {}", e)))?;

        Self::read_response(url, response).await
    }

    async fn post_json_with_bearer(
        &self,
        url: &str,
        json_body: &str,
        bearer_token: &str,
    ) -> Result<HttpResponse, ApiError> {
        debug!(url = url, "HTTP POST (json, bearer)");
        let response = self
            .client
            .post(url)
            .header("Authorization", format!("Bearer {}", bearer_token))
            .header("Content-Type", "application/json")
            .body(json_body.to_string())
            .send()
            .await
            .map_err(|e| ApiError::Http(format!("POST request failed: {}", e)))?;

        Self::read_response(url, response).await
    }
}

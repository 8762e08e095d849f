//! HTTP client for the discovery API.
//!
//! Two endpoints, both `POST` with a JSON body and a JSON response:
//! `/api/ai/discover` for structured searches and `/api/ai/refine` for
//! edits to a previous intent. No retries; each call makes exactly one
//! request bounded by the client timeout.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::Serialize;
use serde_json::Value;

use crate::error::DiscoveryError;
use crate::types::{DiscoverParams, DiscoverRequest, RefineParams, RefineRequest};

/// Total request timeout for every backend call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

const USER_AGENT: &str = "OriginSelect-MCP/1.0";
const DISCOVER_PATH: &str = "api/ai/discover";
const REFINE_PATH: &str = "api/ai/refine";

/// Client for the discovery backend.
///
/// Use [`DiscoveryClient::new`] for the standard 15 second timeout or
/// [`DiscoveryClient::with_timeout`] to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct DiscoveryClient {
    client: Client,
    discover_url: Url,
    refine_url: Url,
    timeout: Duration,
}

impl DiscoveryClient {
    /// Creates a client for the backend at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`DiscoveryError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn new(base_url: &str) -> Result<Self, DiscoveryError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Creates a client with a custom total timeout.
    ///
    /// # Errors
    ///
    /// Same as [`DiscoveryClient::new`].
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, DiscoveryError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .user_agent(USER_AGENT)
            .build()?;

        // Exactly one trailing slash so `join` appends below any path prefix
        // instead of replacing the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let invalid = |reason: String| DiscoveryError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason,
        };
        let base = Url::parse(&normalised).map_err(|e| invalid(e.to_string()))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", base.scheme())));
        }
        let discover_url = base.join(DISCOVER_PATH).map_err(|e| invalid(e.to_string()))?;
        let refine_url = base.join(REFINE_PATH).map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            client,
            discover_url,
            refine_url,
            timeout,
        })
    }

    /// Runs a structured search.
    ///
    /// Returns the backend's JSON body as-is; shape it with
    /// [`crate::shape_products`] or [`crate::shape_brands`].
    ///
    /// # Errors
    ///
    /// - [`DiscoveryError::Timeout`] if no response arrives in time.
    /// - [`DiscoveryError::Http`] on other network failures.
    /// - [`DiscoveryError::Api`] on a non-2xx status.
    /// - [`DiscoveryError::Deserialize`] if the body is not JSON.
    pub async fn discover(&self, params: &DiscoverParams) -> Result<Value, DiscoveryError> {
        let body = DiscoverRequest::from_params(params);
        tracing::debug!(
            query = %body.query,
            intent_type = ?body.structured_intent.intent_type,
            market = %body.market,
            limit = body.limit,
            brands_limit = body.brands_limit,
            "sending discover request"
        );
        self.post_json(&self.discover_url, &body).await
    }

    /// Applies modifications to a previous intent and searches again.
    ///
    /// # Errors
    ///
    /// Same as [`DiscoveryClient::discover`].
    pub async fn refine(&self, params: &RefineParams) -> Result<Value, DiscoveryError> {
        let body = RefineRequest::from_params(params);
        tracing::debug!(
            modifications = body.modifications.len(),
            market = %body.market,
            limit = body.limit,
            "sending refine request"
        );
        self.post_json(&self.refine_url, &body).await
    }

    #[must_use]
    pub fn discover_url(&self) -> &Url {
        &self.discover_url
    }

    #[must_use]
    pub fn refine_url(&self) -> &Url {
        &self.refine_url
    }

    /// Sends a JSON `POST`, asserts a 2xx status, and parses the body.
    async fn post_json<B: Serialize>(&self, url: &Url, body: &B) -> Result<Value, DiscoveryError> {
        let response = self
            .client
            .post(url.clone())
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!(url = %url, status = status.as_u16(), "discovery API returned error status");
            return Err(DiscoveryError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| self.transport_error(url, e))?;
        serde_json::from_str(&text).map_err(|e| DiscoveryError::Deserialize {
            context: format!("response from {}", url.path()),
            source: e,
        })
    }

    fn transport_error(&self, url: &Url, error: reqwest::Error) -> DiscoveryError {
        if error.is_timeout() {
            tracing::warn!(url = %url, timeout = ?self.timeout, "discovery API request timed out");
            DiscoveryError::Timeout {
                endpoint: url.path().to_owned(),
                elapsed: self.timeout,
            }
        } else {
            tracing::warn!(url = %url, error = %error, "discovery API request failed");
            DiscoveryError::Http(error)
        }
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;

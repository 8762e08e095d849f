use std::time::Duration;

use thiserror::Error;

/// Errors returned by the discovery API client.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The request did not complete within the client timeout.
    #[error("request to {endpoint} timed out after {elapsed:?}")]
    Timeout { endpoint: String, elapsed: Duration },

    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },

    /// A 2xx response body was not valid JSON.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

//! Surge HTTP Client
//!
//! A small, type-safe HTTP client for the promotion service API.
//!
//! The remote service gates on requests looking like they come from its own
//! web frontend, so every request carries a fixed set of browser headers
//! (user agent, accept, referer, origin). Those headers, the base URL and
//! the request timeout are injected once at construction via [`ApiSettings`]
//! and never change afterwards.
//!
//! # Example
//!
//! ```no_run
//! use surge_client::{ApiSettings, PromoClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = PromoClient::new(ApiSettings::new(
//!         "http://localhost:8080/api",
//!         "http://localhost:8080",
//!     ))?;
//!
//!     let services = client.fetch_catalog().await?;
//!     println!("catalog has {} service(s)", services.len());
//!     Ok(())
//! }
//! ```

pub mod error;
mod catalog;
mod orders;
mod resolve;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use orders::{OrderOutcome, OrderSubmitter};

use std::time::Duration;

use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, ORIGIN, REFERER, USER_AGENT};
use serde::de::DeserializeOwned;

use surge_core::dto::catalog::ApiEnvelope;

/// Timeout applied to every request
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// User agent presented to the remote service
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Immutable connection settings for [`PromoClient`]
///
/// Built once at startup and consumed by the client constructor. The site
/// URL doubles as the `Referer` and `Origin` header value.
#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// Base URL of the API endpoint (e.g. "https://host/api")
    pub base_url: String,
    /// Public site URL the API expects requests to originate from
    pub site_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl ApiSettings {
    /// Creates settings with the default request timeout
    pub fn new(base_url: impl Into<String>, site_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            site_url: site_url.into(),
            timeout: REQUEST_TIMEOUT,
        }
    }
}

/// HTTP client for the promotion service API
///
/// The client is stateless: one instance is safely shared by every polling
/// task in a run, usually behind an `Arc`.
#[derive(Debug, Clone)]
pub struct PromoClient {
    /// Base URL of the API endpoint
    base_url: String,
    /// HTTP client instance, carries the browser headers and timeout
    client: Client,
}

impl PromoClient {
    /// Create a new client from connection settings
    ///
    /// # Errors
    /// Returns [`ClientError::Config`] when the site URL is not a valid
    /// header value or the underlying HTTP client cannot be built.
    pub fn new(settings: ApiSettings) -> Result<Self> {
        let site = HeaderValue::from_str(settings.site_url.trim_end_matches('/'))
            .map_err(|e| ClientError::Config(format!("site URL: {e}")))?;

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(REFERER, site.clone());
        headers.insert(ORIGIN, site);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(settings.timeout)
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        Ok(Self::with_client(settings.base_url, client))
    }

    /// Create a new client around an already-configured reqwest client
    ///
    /// Used by tests and callers that need custom proxy or TLS settings.
    /// The caller is responsible for the timeout and headers in that case.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the API endpoint
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn http(&self) -> &Client {
        &self.client
    }

    /// Build the URL for a named API action
    pub(crate) fn action_url(&self, action: &str) -> String {
        format!("{}?action={}", self.base_url, action)
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Check the status, decode the envelope and unwrap its payload
    ///
    /// A non-2xx status becomes [`ClientError::Api`], an unparseable body
    /// becomes [`ClientError::Decode`], and a well-formed envelope with
    /// `success: false` becomes [`ClientError::Refused`].
    pub(crate) async fn read_envelope<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        let envelope: ApiEnvelope<T> = response
            .json()
            .await
            .map_err(|e| ClientError::Decode(format!("failed to parse JSON response: {e}")))?;

        Self::unwrap_envelope(envelope)
    }

    /// Unwrap an already-decoded envelope into its payload
    pub(crate) fn unwrap_envelope<T>(envelope: ApiEnvelope<T>) -> Result<T> {
        if !envelope.success {
            let message = envelope
                .message
                .unwrap_or_else(|| "remote reported failure".to_string());
            return Err(ClientError::Refused(message));
        }

        envelope
            .data
            .ok_or_else(|| ClientError::Decode("envelope missing data".to_string()))
    }
}

//! Catalog client abstraction and its HTTP implementation.
//!
//! [`CatalogClient`] is the seam the state managers depend on. The production
//! implementation, [`HttpCatalogClient`], issues plain `GET` requests with
//! `reqwest` and folds every transport, status and decode failure into the
//! user-facing [`ApiError`] set.
//!
//! # Error Mapping
//!
//! | Condition                         | Result                    |
//! |-----------------------------------|---------------------------|
//! | connectivity oracle says offline  | `NoNetwork`               |
//! | URL cannot be built               | `InvalidRequest`          |
//! | connect failure or timeout        | `NoNetwork`               |
//! | non-2xx status                    | `HttpStatus(code)`        |
//! | body is not UTF-8                 | `StringDecodeFailed`      |
//! | body is not the expected JSON     | `DecodeFailed`            |
//! | any other transport failure       | `InvalidResponse`         |
//! | body is empty or `null`           | `Ok(None)`                |

use crate::catalog::connectivity::Connectivity;
use crate::catalog::environment::AppEnvironment;
use crate::catalog::requests::GiveawayRequest;
use crate::domain::error::{ApiError, ApiResult, Result};
use crate::domain::{GiveawayFilter, GiveawayItem};
use reqwest::header::{self, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::Instrument;
use url::Url;

const USER_AGENT: &str = concat!("giveaway/", env!("CARGO_PKG_VERSION"));

/// Read-only access to the giveaway catalog.
///
/// `Ok(None)` means the server answered successfully with no payload.
pub trait CatalogClient: Send + Sync {
    /// All giveaways, or only those matching `filter`.
    fn giveaways(
        &self,
        filter: Option<&GiveawayFilter>,
    ) -> impl Future<Output = ApiResult<Option<Vec<GiveawayItem>>>> + Send;

    /// Full record of one giveaway.
    fn giveaway_detail(
        &self,
        id: i64,
    ) -> impl Future<Output = ApiResult<Option<GiveawayItem>>> + Send;
}

impl<C: CatalogClient> CatalogClient for Arc<C> {
    fn giveaways(
        &self,
        filter: Option<&GiveawayFilter>,
    ) -> impl Future<Output = ApiResult<Option<Vec<GiveawayItem>>>> + Send {
        (**self).giveaways(filter)
    }

    fn giveaway_detail(
        &self,
        id: i64,
    ) -> impl Future<Output = ApiResult<Option<GiveawayItem>>> + Send {
        (**self).giveaway_detail(id)
    }
}

/// [`CatalogClient`] backed by the GamerPower REST API.
pub struct HttpCatalogClient {
    http: reqwest::Client,
    base_url: Url,
    environment: AppEnvironment,
    connectivity: Arc<dyn Connectivity>,
}

impl HttpCatalogClient {
    /// Builds a client rooted at `base_url`.
    ///
    /// A missing trailing slash is added so endpoint paths resolve beneath the
    /// base path rather than replacing its last segment.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` does not parse or the HTTP client cannot
    /// be constructed.
    ///
    /// # Examples
    ///
    /// ```
    /// use giveaway::catalog::{AppEnvironment, HttpCatalogClient, NetworkMonitor};
    /// use std::sync::Arc;
    /// use std::time::Duration;
    ///
    /// let client = HttpCatalogClient::new(
    ///     "https://www.gamerpower.com/api",
    ///     Duration::from_secs(30),
    ///     AppEnvironment::Release,
    ///     Arc::new(NetworkMonitor::default()),
    /// )?;
    /// assert_eq!(client.base_url().as_str(), "https://www.gamerpower.com/api/");
    /// # Ok::<(), giveaway::GiveawayError>(())
    /// ```
    pub fn new(
        base_url: &str,
        timeout: Duration,
        environment: AppEnvironment,
        connectivity: Arc<dyn Connectivity>,
    ) -> Result<Self> {
        let mut raw = base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base_url = Url::parse(&raw)?;

        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("*/*"));
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()?;

        tracing::debug!(
            base_url = %base_url,
            environment = %environment,
            timeout_secs = timeout.as_secs(),
            "catalog client created"
        );

        Ok(Self {
            http,
            base_url,
            environment,
            connectivity,
        })
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[must_use]
    pub const fn environment(&self) -> AppEnvironment {
        self.environment
    }

    fn endpoint(&self, request: &GiveawayRequest) -> ApiResult<Url> {
        let mut url = self.base_url.join(request.path()).map_err(|e| {
            tracing::warn!(error = %e, path = request.path(), "failed to build request URL");
            ApiError::InvalidRequest
        })?;

        let query = request.query();
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    async fn perform<T: DeserializeOwned>(&self, request: GiveawayRequest) -> ApiResult<Option<T>> {
        if self.environment.is_preview() {
            tracing::debug!("preview mode, serving canned response");
            return serde_json::from_value::<Option<T>>(request.mock_response())
                .map_err(|_| ApiError::DecodeFailed);
        }

        if !self.connectivity.is_reachable() {
            tracing::debug!("network unreachable, skipping request");
            return Err(ApiError::NoNetwork);
        }

        let url = self.endpoint(&request)?;
        tracing::debug!(method = "GET", url = %url, "sending request");

        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), url = %url, "request returned error status");
            return Err(ApiError::HttpStatus(status.as_u16()));
        }

        let body = response.bytes().await.map_err(map_transport_error)?;
        tracing::debug!(
            status = status.as_u16(),
            body_len = body.len(),
            "received response"
        );

        decode_body(&body)
    }
}

impl CatalogClient for HttpCatalogClient {
    fn giveaways(
        &self,
        filter: Option<&GiveawayFilter>,
    ) -> impl Future<Output = ApiResult<Option<Vec<GiveawayItem>>>> + Send {
        let request = GiveawayRequest::list(filter);
        let span = tracing::debug_span!("fetch_giveaways", endpoint = request.path());
        async move {
            let result = self.perform::<Vec<GiveawayItem>>(request).await;
            if let Ok(Some(items)) = &result {
                tracing::debug!(count = items.len(), "giveaways fetched");
            }
            result
        }
        .instrument(span)
    }

    fn giveaway_detail(
        &self,
        id: i64,
    ) -> impl Future<Output = ApiResult<Option<GiveawayItem>>> + Send {
        let span = tracing::debug_span!("fetch_giveaway_detail", item_id = id);
        self.perform::<GiveawayItem>(GiveawayRequest::Detail(id))
            .instrument(span)
    }
}

impl std::fmt::Debug for HttpCatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCatalogClient")
            .field("base_url", &self.base_url.as_str())
            .field("environment", &self.environment)
            .field("reachable", &self.connectivity.is_reachable())
            .finish_non_exhaustive()
    }
}

fn map_transport_error(error: reqwest::Error) -> ApiError {
    let mapped = if error.is_connect() || error.is_timeout() {
        ApiError::NoNetwork
    } else if error.is_builder() {
        ApiError::InvalidRequest
    } else if let Some(status) = error.status() {
        ApiError::HttpStatus(status.as_u16())
    } else {
        ApiError::InvalidResponse
    };
    tracing::warn!(error = %error, mapped = ?mapped, "transport failure");
    mapped
}

/// Decodes a response body. Empty and `null` bodies are `Ok(None)`.
fn decode_body<T: DeserializeOwned>(body: &[u8]) -> ApiResult<Option<T>> {
    let text = std::str::from_utf8(body).map_err(|e| {
        tracing::warn!(error = %e, "response body is not UTF-8");
        ApiError::StringDecodeFailed
    })?;

    if text.trim().is_empty() {
        return Ok(None);
    }

    serde_json::from_str::<Option<T>>(text).map_err(|e| {
        tracing::warn!(error = %e, "failed to decode response body");
        ApiError::DecodeFailed
    })
}

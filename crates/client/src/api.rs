//! Configured HTTP client
//!
//! Central point through which all test traffic flows. The client owns a
//! read-only configuration snapshot (base URL, default headers, default
//! timeout) and exposes verb-specific operations that merge per-call
//! overrides with the defaults. Transport failures are logged and returned
//! unchanged; there is no retry and no status-code branching here, so the
//! suite fails loudly the moment the target service misbehaves.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use apicheck_domain::{ApiConfig, ResponseSpec};
use reqwest::{Client, Method};
use url::Url;

use crate::error::{ClientError, TransportError};

/// Per-call overrides merged with the client's defaults.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Query parameters appended to the URL.
    pub query: Vec<(String, String)>,
    /// Headers merged over the defaults; per-call wins on key collision.
    pub headers: BTreeMap<String, String>,
    /// Timeout override for this call.
    pub timeout: Option<Duration>,
    /// JSON request body.
    pub json: Option<serde_json::Value>,
    /// Raw request body, used when `json` is not set.
    pub raw_body: Option<String>,
}

impl RequestOptions {
    /// Creates an empty override bundle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a query parameter.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Adds a per-call header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Overrides the default timeout for this call.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets a JSON body.
    #[must_use]
    pub fn with_json(mut self, body: serde_json::Value) -> Self {
        self.json = Some(body);
        self
    }

    /// Sets a raw text body.
    #[must_use]
    pub fn with_raw_body(mut self, body: impl Into<String>) -> Self {
        self.raw_body = Some(body.into());
        self
    }
}

/// Configured HTTP client shared by the whole test session.
///
/// Constructed once from a validated [`ApiConfig`], never mutated
/// afterwards. Cloning is cheap (the inner reqwest client is an Arc).
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    default_headers: BTreeMap<String, String>,
    default_timeout: Duration,
}

impl ApiClient {
    /// Builds a client from configuration.
    ///
    /// # Errors
    ///
    /// Fails when the configuration has no usable base URL or the
    /// underlying reqwest client cannot be built. Both are fatal; the
    /// suite must not run against a half-configured client.
    pub fn from_config(config: &ApiConfig) -> Result<Self, ClientError> {
        config.validate()?;

        let http = Client::builder()
            .user_agent(concat!("apicheck/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClientError::Build(e.to_string()))?;

        tracing::info!(base_url = %config.base_url, "API client initialized");

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            default_headers: config.headers.clone(),
            default_timeout: config.timeout(),
        })
    }

    /// Returns the configured base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends a GET request.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when the network call fails.
    pub async fn get(
        &self,
        endpoint: &str,
        options: &RequestOptions,
    ) -> Result<ResponseSpec, TransportError> {
        self.send(Method::GET, endpoint, options).await
    }

    /// Sends a POST request.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when the network call fails.
    pub async fn post(
        &self,
        endpoint: &str,
        options: &RequestOptions,
    ) -> Result<ResponseSpec, TransportError> {
        self.send(Method::POST, endpoint, options).await
    }

    /// Sends a PUT request.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when the network call fails.
    pub async fn put(
        &self,
        endpoint: &str,
        options: &RequestOptions,
    ) -> Result<ResponseSpec, TransportError> {
        self.send(Method::PUT, endpoint, options).await
    }

    /// Sends a PATCH request.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when the network call fails.
    pub async fn patch(
        &self,
        endpoint: &str,
        options: &RequestOptions,
    ) -> Result<ResponseSpec, TransportError> {
        self.send(Method::PATCH, endpoint, options).await
    }

    /// Sends a DELETE request.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when the network call fails.
    pub async fn delete(
        &self,
        endpoint: &str,
        options: &RequestOptions,
    ) -> Result<ResponseSpec, TransportError> {
        self.send(Method::DELETE, endpoint, options).await
    }

    /// Builds the target URL: the endpoint fragment is concatenated directly
    /// onto the base URL, no normalization. Callers own the leading slash.
    fn build_url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url)
    }

    /// Merges per-call headers over the defaults; per-call wins.
    fn merged_headers(&self, overrides: &BTreeMap<String, String>) -> BTreeMap<String, String> {
        let mut headers = self.default_headers.clone();
        for (name, value) in overrides {
            headers.insert(name.clone(), value.clone());
        }
        headers
    }

    async fn send(
        &self,
        method: Method,
        endpoint: &str,
        options: &RequestOptions,
    ) -> Result<ResponseSpec, TransportError> {
        let url = self.build_url(endpoint);
        let parsed_url =
            Url::parse(&url).map_err(|e| TransportError::InvalidUrl(format!("{e}: {url}")))?;

        let headers = self.merged_headers(&options.headers);
        let timeout = options.timeout.unwrap_or(self.default_timeout);
        let timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);

        tracing::debug!(method = %method, url = %url, "sending request");
        tracing::debug!(?headers, "request headers");
        if !options.query.is_empty() {
            tracing::debug!(query = ?options.query, "query params");
        }
        if let Some(json) = &options.json {
            tracing::debug!(body = %json, "request body (json)");
        } else if let Some(raw) = &options.raw_body {
            tracing::debug!(body = %raw, "request body (raw)");
        }

        let mut builder = self
            .http
            .request(method, parsed_url)
            .timeout(timeout)
            .query(&options.query);

        for (name, value) in &headers {
            builder = builder.header(name, value);
        }

        if let Some(json) = &options.json {
            builder = builder.json(json);
        } else if let Some(raw) = &options.raw_body {
            builder = builder.body(raw.clone());
        }

        let start = Instant::now();
        let response = builder.send().await.map_err(|e| {
            let err = map_error(e, &url, timeout_ms);
            tracing::error!(error = %err, "request failed");
            err
        })?;

        let status = response.status().as_u16();
        let response_headers = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("<binary>").to_owned()))
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?
            .to_vec();
        let duration = start.elapsed();

        let spec = ResponseSpec::new(status, url, response_headers, body, duration);

        tracing::debug!(status = spec.status, "response received");
        match spec.body_as_json() {
            Ok(json) => tracing::trace!(body = %json, "response body (json)"),
            Err(_) => tracing::trace!(body = %spec.body, "response body (non-json)"),
        }

        Ok(spec)
    }
}

/// Maps reqwest errors to the transport taxonomy.
fn map_error(error: reqwest::Error, url: &str, timeout_ms: u64) -> TransportError {
    let host = error
        .url()
        .and_then(Url::host_str)
        .unwrap_or("unknown")
        .to_owned();

    if error.is_timeout() {
        return TransportError::Timeout {
            url: url.to_owned(),
            timeout_ms,
        };
    }

    if error.is_connect() {
        let message = error.to_string();
        let lowered = message.to_lowercase();
        if lowered.contains("dns") || lowered.contains("resolve") {
            return TransportError::Dns { host, message };
        }
        if lowered.contains("refused") {
            let port = error.url().and_then(Url::port_or_known_default).unwrap_or(80);
            return TransportError::ConnectionRefused { host, port };
        }
        return TransportError::Connection(message);
    }

    TransportError::Other(error.to_string())
}

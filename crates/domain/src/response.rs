//! Response specification type
//!
//! Immutable snapshot of a completed HTTP exchange: status, headers, body
//! and timing, plus the request URL for diagnostics. This is the only view
//! of a response the assertion utilities ever see.

use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;

use crate::error::DecodeError;

/// A completed HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseSpec {
    /// HTTP status code.
    pub status: u16,
    /// URL the request was sent to.
    pub request_url: String,
    /// Response headers.
    pub headers_map: HashMap<String, String>,
    /// Response body decoded as UTF-8 (lossy for binary bodies).
    pub body: String,
    /// Raw response body bytes.
    pub body_bytes: Vec<u8>,
    /// Wall-clock time of the exchange.
    pub duration: Duration,
    /// Content-Type header value, extracted for convenience.
    pub content_type: Option<String>,
}

impl ResponseSpec {
    /// Creates a `ResponseSpec` from raw response data.
    #[must_use]
    pub fn new(
        status: u16,
        request_url: impl Into<String>,
        headers: HashMap<String, String>,
        body: Vec<u8>,
        duration: Duration,
    ) -> Self {
        let content_type = headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-type"))
            .map(|(_, v)| v.clone());
        let body_string = String::from_utf8_lossy(&body).into_owned();

        Self {
            status,
            request_url: request_url.into(),
            headers_map: headers,
            body: body_string,
            body_bytes: body,
            duration,
            content_type,
        }
    }

    /// Returns true if the status code indicates success (2xx).
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Gets a header value by name (case-insensitive).
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers_map
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Decodes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] when the body is not valid JSON. Callers
    /// must surface this distinctly; an undecodable body is never treated
    /// as an empty document.
    pub fn body_as_json(&self) -> Result<Value, DecodeError> {
        serde_json::from_str(&self.body).map_err(|e| DecodeError {
            reason: e.to_string(),
        })
    }

    /// Returns the body truncated to `limit` bytes for failure messages.
    ///
    /// Truncation respects character boundaries and appends `...` when
    /// anything was cut.
    #[must_use]
    pub fn body_preview(&self, limit: usize) -> String {
        if self.body.len() <= limit {
            return self.body.clone();
        }
        let mut end = limit;
        while !self.body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &self.body[..end])
    }
}

//! Upstream transport policy.
//!
//! Carries the resolved JSON-RPC batching window and the request headers to
//! inject on every call to an upstream.

use http::header::{HeaderMap, HeaderName, HeaderValue};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::time::{Duration, Instant};

const REDACTED: &str = "****";

/// Header names whose values are always marked sensitive.
const SENSITIVE_HEADERS: [&str; 4] = ["authorization", "cookie", "proxy-authorization", "x-api-key"];

/// How requests to an upstream are coalesced into JSON-RPC batches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchPolicy {
    pub max_size: u32,
    #[serde(with = "humantime_serde")]
    pub max_wait: Duration,
}

impl BatchPolicy {
    #[must_use]
    pub const fn new(max_size: u32, max_wait: Duration) -> Self {
        Self { max_size, max_wait }
    }

    /// Whether a pending batch must be dispatched now.
    ///
    /// A batch is flushed once it is full, or once its oldest request has
    /// waited for the whole window.
    #[must_use]
    pub fn should_flush(&self, pending: usize, oldest_age: Duration) -> bool {
        if pending == 0 {
            return false;
        }
        pending >= usize::try_from(self.max_size).unwrap_or(usize::MAX) || oldest_age >= self.max_wait
    }

    /// Latest dispatch time for a batch opened at `opened_at`, or `None` when
    /// the window does not fit in an `Instant`.
    #[must_use]
    pub fn deadline(&self, opened_at: Instant) -> Option<Instant> {
        opened_at.checked_add(self.max_wait)
    }
}

/// Resolved JSON-RPC transport settings for one upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportPolicy {
    pub batch: Option<BatchPolicy>,
    pub headers: HeaderMap,
}

impl TransportPolicy {
    #[must_use]
    pub const fn supports_batch(&self) -> bool {
        self.batch.is_some()
    }

    /// Adds configured headers to an outgoing request, replacing existing values.
    pub fn inject_headers(&self, request: &mut HeaderMap) {
        for (name, value) in &self.headers {
            request.insert(name.clone(), value.clone());
        }
    }

    /// Builds a header map from declared name/value pairs.
    ///
    /// # Errors
    ///
    /// Returns the offending header name when a name or value is not valid HTTP.
    pub fn build_headers<'a, I>(pairs: I) -> Result<HeaderMap, String>
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        let mut headers = HeaderMap::new();
        for (name, value) in pairs {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|_| name.clone())?;
            let mut header_value = HeaderValue::from_str(value).map_err(|_| name.clone())?;
            if SENSITIVE_HEADERS.contains(&header_name.as_str()) {
                header_value.set_sensitive(true);
            }
            headers.insert(header_name, header_value);
        }
        Ok(headers)
    }
}

impl Serialize for TransportPolicy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("supportsBatch", &self.supports_batch())?;
        if let Some(batch) = &self.batch {
            map.serialize_entry("batchMaxSize", &batch.max_size)?;
            map.serialize_entry(
                "batchMaxWait",
                &humantime::format_duration(batch.max_wait).to_string(),
            )?;
        }
        if !self.headers.is_empty() {
            // Header values may carry credentials under any name; only names are shown.
            let shown: std::collections::BTreeMap<&str, &str> = self
                .headers
                .keys()
                .map(|name| (name.as_str(), REDACTED))
                .collect();
            map.serialize_entry("headers", &shown)?;
        }
        map.end()
    }
}

//! Provider wire requests.

use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use url::Url;

/// Fully-built HTTP request for one upstream call.
///
/// Built fresh per call by an adapter and dropped after the send. May hold a
/// credential in the URL or headers, so `Debug` redacts both.
#[derive(Clone, PartialEq)]
pub struct ProviderWireRequest {
    /// Target URL
    pub url: String,
    /// Request headers
    pub headers: BTreeMap<String, String>,
    /// JSON body
    pub body: Value,
}

const REDACTED: &str = "[REDACTED]";
const SENSITIVE_QUERY_KEYS: [&str; 2] = ["key", "api_key"];
const SENSITIVE_HEADERS: [&str; 3] = ["authorization", "api-key", "x-goog-api-key"];

impl ProviderWireRequest {
    /// Create a request with a JSON content type
    #[must_use]
    pub fn json(url: impl Into<String>, body: Value) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self {
            url: url.into(),
            headers,
            body,
        }
    }

    /// Add a header
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Get a header by case-insensitive name
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// URL with credential-bearing query parameters masked, safe to log
    #[must_use]
    pub fn redacted_url(&self) -> String {
        let Ok(mut url) = Url::parse(&self.url) else {
            return REDACTED.to_string();
        };

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| {
                let value = if SENSITIVE_QUERY_KEYS.contains(&k.as_ref()) {
                    REDACTED.to_string()
                } else {
                    v.into_owned()
                };
                (k.into_owned(), value)
            })
            .collect();

        if pairs.is_empty() {
            return url.to_string();
        }

        url.query_pairs_mut().clear().extend_pairs(pairs);
        url.to_string()
    }
}

impl fmt::Debug for ProviderWireRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: BTreeMap<&str, &str> = self
            .headers
            .iter()
            .map(|(k, v)| {
                let value = if SENSITIVE_HEADERS.contains(&k.to_ascii_lowercase().as_str()) {
                    REDACTED
                } else {
                    v.as_str()
                };
                (k.as_str(), value)
            })
            .collect();

        f.debug_struct("ProviderWireRequest")
            .field("url", &self.redacted_url())
            .field("headers", &headers)
            .field("body", &self.body)
            .finish()
    }
}

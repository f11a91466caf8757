//! API Client
//!
//! Main client for the reference API, combining the HTTP wrapper with the
//! root URL, headers and timeout every request is sent with.

use super::http::{ApiHttpClient, ApiResponse};
use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use std::time::Duration;
use url::Url;

/// Public reference API root
pub const DEFAULT_ROOT: &str = "https://www.dnd5eapi.co";

/// How many linked resources are fetched at once by default
pub const DEFAULT_LINK_CONCURRENCY: usize = 4;

/// Main API client
#[derive(Clone, Debug)]
pub struct ApiClient {
    pub http: ApiHttpClient,
    root: String,
    headers: HeaderMap,
    timeout: Option<Duration>,
    link_concurrency: usize,
}

impl ApiClient {
    /// Create a new client for the given root URL.
    /// Requests default to `Accept: application/json`, no timeout.
    pub fn new(root: &str) -> Result<Self> {
        let root = root.trim_end_matches('/');
        Url::parse(root).with_context(|| format!("Invalid API root URL: {}", root))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        Ok(Self {
            http: ApiHttpClient::new()?,
            root: root.to_string(),
            headers,
            timeout: None,
            link_concurrency: DEFAULT_LINK_CONCURRENCY,
        })
    }

    /// Replace the request headers
    pub fn with_headers<I, K, V>(mut self, headers: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.headers = HeaderMap::new();
        self.add_headers(headers)
    }

    /// Set headers on top of the current ones; a name already present is
    /// overwritten
    pub fn add_headers<I, K, V>(mut self, headers: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in headers {
            let (key, value) = (key.as_ref(), value.as_ref());
            let name = HeaderName::from_bytes(key.as_bytes())
                .with_context(|| format!("Invalid header name: {}", key))?;
            let value = HeaderValue::from_str(value)
                .with_context(|| format!("Invalid value for header {}", key))?;
            self.headers.insert(name, value);
        }
        Ok(self)
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set how many linked resources are fetched at once (at least one)
    pub fn with_link_concurrency(mut self, width: usize) -> Self {
        self.link_concurrency = width.max(1);
        self
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn link_concurrency(&self) -> usize {
        self.link_concurrency
    }

    /// Build the full URL for an API path
    pub fn url_for(&self, path: &str) -> Result<String> {
        let joined = if path.starts_with('/') || path.is_empty() {
            format!("{}{}", self.root, path)
        } else {
            format!("{}/{}", self.root, path)
        };
        let url = Url::parse(&joined).with_context(|| format!("Invalid API path: {}", path))?;
        Ok(url.to_string())
    }

    /// Make a GET request for an API path
    pub async fn get(&self, path: &str) -> Result<ApiResponse> {
        let url = self.url_for(path)?;
        self.http.get(&url, &self.headers, self.timeout).await
    }
}

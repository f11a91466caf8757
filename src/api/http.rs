//! HTTP utilities for reference API calls

use anyhow::{Context, Result};
use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;

/// Maximum length of response body to log
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and drops control characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.chars().count() > MAX_LOG_BODY_LENGTH {
        let head: String = body.chars().take(MAX_LOG_BODY_LENGTH).collect();
        format!("{}... [truncated, {} bytes total]", head, body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// Outcome of a GET request that reached the server
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Final URL, after any redirects
    pub url: String,
    /// True when the final URL differs from the requested one
    pub redirected: bool,
    /// Decoded JSON body. Only present for status 200.
    pub body: Option<Value>,
}

impl ApiResponse {
    /// Only a 200 counts as a usable response
    pub fn is_ok(&self) -> bool {
        self.status == StatusCode::OK.as_u16()
    }
}

/// HTTP client wrapper for reference API calls
#[derive(Clone, Debug)]
pub struct ApiHttpClient {
    client: Client,
}

impl ApiHttpClient {
    /// Create a new HTTP client
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("dnd5e/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// Make a GET request.
    ///
    /// Transport failures and undecodable 200 bodies are errors. Any status
    /// other than 200 is returned as an [`ApiResponse`] without a body so the
    /// caller can degrade it into data.
    pub async fn get(
        &self,
        url: &str,
        headers: &HeaderMap,
        timeout: Option<Duration>,
    ) -> Result<ApiResponse> {
        tracing::debug!("GET {}", url);

        let mut request = self.client.get(url).headers(headers.clone());
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.context("Failed to send request")?;

        let status = response.status();
        let final_url = response.url().to_string();
        let redirected = final_url != url;
        let body = response
            .text()
            .await
            .context("Failed to read response body")?;

        if status != StatusCode::OK {
            tracing::warn!("API error: {} - {}", status, sanitize_for_log(&body));
            return Ok(ApiResponse {
                status: status.as_u16(),
                url: final_url,
                redirected,
                body: None,
            });
        }

        let value = serde_json::from_str(&body).context("Failed to parse response JSON")?;

        Ok(ApiResponse {
            status: status.as_u16(),
            url: final_url,
            redirected,
            body: Some(value),
        })
    }
}

/// Format an API error for display
pub fn format_api_error(error: &anyhow::Error) -> String {
    for cause in error.chain() {
        if let Some(err) = cause.downcast_ref::<reqwest::Error>() {
            if err.is_timeout() {
                return "Request timed out. Try a larger --timeout.".to_string();
            }
            if err.is_connect() {
                return "Could not connect to the API. Check --root and your network connection."
                    .to_string();
            }
        }
        if cause.is::<serde_json::Error>() {
            return "The API answered with a body that is not JSON.".to_string();
        }
        if cause.is::<url::ParseError>() {
            return "Invalid API root URL.".to_string();
        }
    }

    let error_str = error.to_string();
    let sanitized = error_str
        .chars()
        .filter(|c| c.is_ascii_graphic() || *c == ' ')
        .take(80)
        .collect::<String>();

    if sanitized.len() < error_str.len() {
        format!("{}...", sanitized)
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_truncates_long_bodies() {
        let body = "x".repeat(500);
        let sanitized = sanitize_for_log(&body);
        assert!(sanitized.starts_with(&"x".repeat(MAX_LOG_BODY_LENGTH)));
        assert!(sanitized.contains("[truncated, 500 bytes total]"));
    }

    #[test]
    fn test_sanitize_strips_control_characters() {
        assert_eq!(sanitize_for_log("not\nfound\t!"), "notfound!");
    }

    #[test]
    fn test_sanitize_handles_multibyte_boundaries() {
        let body = "é".repeat(300);
        let sanitized = sanitize_for_log(&body);
        assert!(sanitized.contains("[truncated, 600 bytes total]"));
    }

    #[test]
    fn test_response_ok_only_for_200() {
        let mut response = ApiResponse {
            status: 200,
            url: "https://www.dnd5eapi.co/api".to_string(),
            redirected: false,
            body: None,
        };
        assert!(response.is_ok());
        response.status = 204;
        assert!(!response.is_ok());
    }

    #[test]
    fn test_format_plain_error_is_truncated() {
        let error = anyhow::anyhow!("{}", "a".repeat(120));
        let message = format_api_error(&error);
        assert_eq!(message.len(), 83);
        assert!(message.ends_with("..."));
    }

    #[test]
    fn test_format_json_error() {
        let json_err = serde_json::from_str::<Value>("<html>").unwrap_err();
        let error = anyhow::Error::new(json_err).context("Failed to parse response JSON");
        assert_eq!(
            format_api_error(&error),
            "The API answered with a body that is not JSON."
        );
    }
}

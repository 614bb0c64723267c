//! HTTP client for fetching newsroom pages as text.

use std::time::Duration;

use url::Url;

use crate::{user_agent::get_user_agent, Error};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches HTML pages with browser-like headers.
///
/// One `reqwest::Client` is shared across requests. Only absolute http(s)
/// URLs are accepted; resolving relative links is the caller's job.
pub struct Client {
    http: reqwest::Client,
}

impl Client {
    /// Creates a client with the default 30-second timeout.
    pub fn new() -> Result<Self, Error> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Creates a client with a custom request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .user_agent(get_user_agent())
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Build(e.to_string()))?;
        Ok(Self { http })
    }

    /// Fetches `url` and returns the response body as text.
    ///
    /// Non-2xx responses are returned as [`Error::HttpStatus`] with a
    /// truncated body snippet.
    pub async fn fetch_html(&self, url: &str) -> Result<String, Error> {
        let parsed = parse_absolute(url)?;
        let resp = self
            .http
            .get(parsed)
            .header("accept", "text/html,application/xhtml+xml")
            .header("accept-language", "en-US,en;q=0.9")
            .header("upgrade-insecure-requests", "1")
            .header("cache-control", "no-cache")
            .header("pragma", "no-cache")
            .send()
            .await
            .map_err(|e| {
                tracing::debug!("Failed to get {}: {}", url, e);
                Error::RequestFailed(e.to_string())
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::debug!("Failed to read response body from {}: {}", url, e);
            Error::RequestFailed(e.to_string())
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::debug!("{} returned status {}: {}", url, status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        Ok(body)
    }
}

fn parse_absolute(url: &str) -> Result<Url, Error> {
    match Url::parse(url) {
        Ok(u) if matches!(u.scheme(), "http" | "https") => Ok(u),
        _ => Err(Error::InvalidUrl {
            url: url.to_string(),
        }),
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated]", &body[..end])
}

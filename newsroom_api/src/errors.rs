//! Error types for the page client.

/// Errors that can occur when fetching a page.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The URL could not be parsed as an absolute http(s) URL.
    #[error("Invalid URL: {url}")]
    InvalidUrl { url: String },
    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Build(String),
    /// The request failed before a response arrived (DNS, connect, timeout, body read).
    #[error("Request failed: {0}")]
    RequestFailed(String),
    /// The server answered with a non-success status. `body` holds a truncated snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
}

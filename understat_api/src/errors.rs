//! Error types for the HTTP client.

/// Errors that can occur when fetching an Understat page.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request URL could not be built from the base URL.
    #[error("invalid url {url}")]
    InvalidUrl { url: String },
    /// The request did not complete within the configured timeout.
    #[error("request to {url} timed out")]
    Timeout { url: String },
    /// The request failed at the transport level (connect, TLS, body read).
    #[error("request to {url} failed: {source}")]
    RequestFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The server returned a non-success status with a body snippet.
    #[error("request to {url} failed with status {status}")]
    HttpStatus {
        url: String,
        status: u16,
        body: String,
    },
}

impl Error {
    /// The URL of the request that failed.
    pub fn url(&self) -> &str {
        match self {
            Self::InvalidUrl { url }
            | Self::Timeout { url }
            | Self::RequestFailed { url, .. }
            | Self::HttpStatus { url, .. } => url,
        }
    }
}

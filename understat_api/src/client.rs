//! HTTP client for Understat league and match pages.

use std::time::Duration;

use url::Url;

use crate::{types::MatchId, user_agent::get_user_agent, Error};

/// Production site root.
pub const DEFAULT_BASE_URL: &str = "https://understat.com";

/// Timeout applied to every request unless overridden.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for Understat HTML pages.
///
/// Sends requests with browser-like headers and a randomized user agent.
/// Each request builds a fresh `reqwest::Client` bounded by the configured
/// timeout. Nothing is cached and failed requests are never retried.
#[derive(Clone, Debug)]
pub struct Client {
    /// Base URL for the site. Defaults to `https://understat.com`.
    base_url: String,
    timeout: Duration,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Creates a new client pointing at the production site.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Replaces the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Listing page for one league-season: `{base}/league/{league_id}/{year}`.
    pub fn league_url(&self, league_id: &str, year: i32) -> Result<Url, Error> {
        self.get_url(&format!("/league/{}/{}", league_id, year))
    }

    /// Page for a single match: `{base}/match/{match_id}`.
    pub fn match_url(&self, match_id: MatchId) -> Result<Url, Error> {
        self.get_url(&format!("/match/{}", match_id))
    }

    fn get_url(&self, path: &str) -> Result<Url, Error> {
        let raw = format!("{}{}", self.base_url, path);
        Url::parse(&raw).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::InvalidUrl { url: raw }
        })
    }

    /// Issues one GET and returns the raw response body.
    ///
    /// Connection failures, timeouts and non-2xx statuses are all errors.
    pub async fn fetch(&self, url: &Url) -> Result<Vec<u8>, Error> {
        let url_str = url.to_string();
        let client = reqwest::Client::builder()
            .user_agent(get_user_agent())
            .timeout(self.timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed {
                    url: url_str.clone(),
                    source: e,
                }
            })?;

        tracing::debug!("GET {}", url_str);
        let resp = client
            .get(url.clone())
            .header("accept", "text/html,application/xhtml+xml")
            .header("accept-language", "en-US,en;q=0.9")
            .header("upgrade-insecure-requests", "1")
            .header("cache-control", "no-cache")
            .header("pragma", "no-cache")
            .send()
            .await
            .map_err(|e| transport_error(&url_str, e))?;

        let status = resp.status();
        let body = resp
            .bytes()
            .await
            .map_err(|e| transport_error(&url_str, e))?;

        if !status.is_success() {
            let snippet = truncate_body(&String::from_utf8_lossy(&body));
            tracing::error!("Request to {} failed with status {}: {}", url_str, status, snippet);
            return Err(Error::HttpStatus {
                url: url_str,
                status: status.as_u16(),
                body: snippet,
            });
        }

        Ok(body.to_vec())
    }

    /// Fetches the listing page for a league-season.
    pub async fn get_league_page(&self, league_id: &str, year: i32) -> Result<Vec<u8>, Error> {
        let url = self.league_url(league_id, year)?;
        self.fetch(&url).await
    }

    /// Fetches the page for a single match.
    pub async fn get_match_page(&self, match_id: MatchId) -> Result<Vec<u8>, Error> {
        let url = self.match_url(match_id)?;
        self.fetch(&url).await
    }
}

fn transport_error(url: &str, e: reqwest::Error) -> Error {
    if e.is_timeout() {
        tracing::error!("Request to {} timed out", url);
        Error::Timeout {
            url: url.to_string(),
        }
    } else {
        tracing::error!("Failed to get resource {}: {}", url, e);
        Error::RequestFailed {
            url: url.to_string(),
            source: e,
        }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}

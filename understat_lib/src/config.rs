//! Fetch settings, overridable through `UNDERSTAT_*` environment variables.

use std::time::Duration;

use understat_api::{Client, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

/// Upper bound on concurrent match fetches.
pub const MAX_CONCURRENCY: usize = 8;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchConfig {
    pub base_url: String,
    pub timeout: Duration,
    /// Matches fetched at once by the aggregator. 1 means strictly sequential.
    pub concurrency: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            concurrency: 1,
        }
    }
}

impl FetchConfig {
    /// Reads `UNDERSTAT_BASE_URL`, `UNDERSTAT_TIMEOUT_SECS` and
    /// `UNDERSTAT_CONCURRENCY`. Unset or unparsable values keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let base_url = lookup("UNDERSTAT_BASE_URL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.base_url);
        let timeout = lookup("UNDERSTAT_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);
        let concurrency = lookup("UNDERSTAT_CONCURRENCY")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .map(|n| n.clamp(1, MAX_CONCURRENCY))
            .unwrap_or(defaults.concurrency);
        Self {
            base_url,
            timeout,
            concurrency,
        }
    }

    /// Builds the transport client these settings describe.
    pub fn client(&self) -> Client {
        Client::with_base_url(&self.base_url).with_timeout(self.timeout)
    }
}

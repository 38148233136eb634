//! Page-level operations: fetch one Understat page and turn it into typed data.

use serde_json::Value;
use url::Url;

use understat_api::types::{MatchId, MatchSummary, ShotRecord};
use understat_api::Client;

use crate::config::FetchConfig;
use crate::error::UnderstatError;
use crate::extract::{locate_payload, PayloadLocator};
use crate::normalize::{normalize_matches, normalize_shots, parse_match_list};

/// Fetches listing and match pages and decodes their embedded payloads.
///
/// Holds no state beyond the transport settings, so it can be shared freely
/// between tasks.
#[derive(Clone, Debug, Default)]
pub struct ScrapeClient {
    http: Client,
}

impl ScrapeClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            http: Client::with_base_url(base_url),
        }
    }

    pub fn from_config(config: &FetchConfig) -> Self {
        Self {
            http: config.client(),
        }
    }

    pub fn http(&self) -> &Client {
        &self.http
    }

    /// Every listed match of a league-season, played or not.
    pub async fn league_listing(
        &self,
        league: &str,
        year: i32,
    ) -> Result<Vec<MatchSummary>, UnderstatError> {
        let url = self.http.league_url(league, year)?;
        let payload = self.page_payload(&url, &PayloadLocator::LISTING).await?;
        parse_match_list(&payload).map_err(|e| e.at(url.as_str()))
    }

    /// Matches of a league-season that have a completed result.
    pub async fn league_matches(
        &self,
        league: &str,
        year: i32,
    ) -> Result<Vec<MatchSummary>, UnderstatError> {
        let url = self.http.league_url(league, year)?;
        let payload = self.page_payload(&url, &PayloadLocator::LISTING).await?;
        let matches = normalize_matches(&payload).map_err(|e| e.at(url.as_str()))?;
        tracing::debug!("{} {}: {} completed matches", league, year, matches.len());
        Ok(matches)
    }

    /// Home shots then away shots for one match.
    ///
    /// Every record must carry the requested match id; a record pointing at a
    /// different match is a schema error.
    pub async fn match_shots(&self, match_id: MatchId) -> Result<Vec<ShotRecord>, UnderstatError> {
        let url = self.http.match_url(match_id)?;
        let payload = self.page_payload(&url, &PayloadLocator::MATCH_SHOTS).await?;
        let shots = normalize_shots(&payload).map_err(|e| e.at(url.as_str()))?;

        if let Some(stray) = shots.iter().find(|s| s.match_id != match_id) {
            return Err(UnderstatError::Schema(format!(
                "shot {} belongs to match {}, expected {}",
                stray.id, stray.match_id, match_id
            ))
            .at(url.as_str()));
        }
        tracing::debug!("match {}: {} shots", match_id, shots.len());
        Ok(shots)
    }

    async fn page_payload(
        &self,
        url: &Url,
        locator: &PayloadLocator,
    ) -> Result<Value, UnderstatError> {
        let html = self.http.fetch(url).await?;
        locate_payload(&html, locator).map_err(|e| e.at(url.as_str()))
    }
}

use chrono::{Datelike, Utc};

use understat_api::types::MatchId;

use crate::error::UnderstatError;

pub const MAX_FILTER_LENGTH: usize = 100;

/// First season Understat publishes shot data for.
pub const FIRST_SEASON: i32 = 2014;

/// League codes as they appear in listing URLs.
pub const LEAGUES: &[&str] = &["EPL", "La_liga", "Bundesliga", "Serie_A", "Ligue_1", "RFPL"];

/// Strip ASCII control characters (except space), trim whitespace,
/// and enforce a byte-length limit.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, UnderstatError> {
    if input.len() > max_len {
        return Err(UnderstatError::InvalidInput(format!(
            "input exceeds maximum length of {} bytes",
            max_len
        )));
    }
    let sanitized: String = input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string();
    if sanitized.is_empty() {
        return Err(UnderstatError::InvalidInput(
            "input is empty after sanitization".to_string(),
        ));
    }
    Ok(sanitized)
}

/// Validate a team or player filter.
pub fn validate_filter(input: &str) -> Result<String, UnderstatError> {
    sanitize_text(input, MAX_FILTER_LENGTH)
}

/// Validate a league code: case-insensitive, returns the canonical spelling.
pub fn validate_league(input: &str) -> Result<&'static str, UnderstatError> {
    let trimmed = input.trim();
    LEAGUES
        .iter()
        .find(|code| code.eq_ignore_ascii_case(trimmed))
        .copied()
        .ok_or_else(|| {
            UnderstatError::InvalidInput(format!(
                "unknown league '{}'. Valid leagues: {}",
                input,
                LEAGUES.join(", ")
            ))
        })
}

/// Validate a season start year (2014 through the current year).
pub fn validate_year(year: i32) -> Result<i32, UnderstatError> {
    let current = Utc::now().year();
    if !(FIRST_SEASON..=current).contains(&year) {
        return Err(UnderstatError::InvalidInput(format!(
            "year must be between {} and {}",
            FIRST_SEASON, current
        )));
    }
    Ok(year)
}

/// Validate a match id (must be >= 1).
pub fn validate_match_id(match_id: MatchId) -> Result<MatchId, UnderstatError> {
    if match_id < 1 {
        return Err(UnderstatError::InvalidInput(format!(
            "match id must be a positive integer, got {}",
            match_id
        )));
    }
    Ok(match_id)
}

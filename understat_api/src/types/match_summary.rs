use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{lenient, MatchId};

/// One fixture from a league-season listing (`datesData`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    #[serde(deserialize_with = "lenient::int")]
    pub id: MatchId,

    /// True once the match has been played and has a final score.
    #[serde(rename = "isResult")]
    pub is_result: bool,

    #[serde(rename = "h")]
    pub home: TeamRef,

    #[serde(rename = "a")]
    pub away: TeamRef,

    #[serde(default)]
    pub goals: Option<SideGoals>,

    #[serde(rename = "xG", default)]
    pub xg: Option<SideXg>,

    #[serde(with = "lenient::datetime")]
    pub datetime: NaiveDateTime,

    #[serde(default)]
    pub forecast: Option<Forecast>,
}

impl MatchSummary {
    pub fn home_goals(&self) -> Option<i64> {
        self.goals.as_ref().and_then(|g| g.h)
    }

    pub fn away_goals(&self) -> Option<i64> {
        self.goals.as_ref().and_then(|g| g.a)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamRef {
    #[serde(deserialize_with = "lenient::int")]
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub short_title: Option<String>,
}

/// Final score; both sides are null before kickoff.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SideGoals {
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub h: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub a: Option<i64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SideXg {
    #[serde(default, deserialize_with = "lenient::opt_float")]
    pub h: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_float")]
    pub a: Option<f64>,
}

/// Pre-match win/draw/loss probabilities from the home side's view.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    #[serde(deserialize_with = "lenient::float")]
    pub w: f64,
    #[serde(deserialize_with = "lenient::float")]
    pub d: f64,
    #[serde(deserialize_with = "lenient::float")]
    pub l: f64,
}

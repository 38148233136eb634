use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{lenient, MatchId};

/// Declares a string-backed categorical enum. Values Understat has not been
/// seen to emit are kept verbatim in `Other` rather than rejected.
macro_rules! categorical {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            Other(String),
        }

        impl $name {
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $text,)+
                    Self::Other(raw) => raw,
                }
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                match raw.as_str() {
                    $($text => Self::$variant,)+
                    _ => Self::Other(raw),
                }
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                match value {
                    $name::Other(raw) => raw,
                    other => other.as_str().to_string(),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

categorical!(
    /// Outcome of a shot.
    ShotResult {
        Goal => "Goal",
        MissedShots => "MissedShots",
        SavedShot => "SavedShot",
        BlockedShot => "BlockedShot",
        ShotOnPost => "ShotOnPost",
        OwnGoal => "OwnGoal",
    }
);

categorical!(
    /// Phase of play the shot came from.
    Situation {
        OpenPlay => "OpenPlay",
        FromCorner => "FromCorner",
        SetPiece => "SetPiece",
        DirectFreekick => "DirectFreekick",
        Penalty => "Penalty",
    }
);

categorical!(
    ShotType {
        LeftFoot => "LeftFoot",
        RightFoot => "RightFoot",
        Head => "Head",
        OtherBodyPart => "OtherBodyPart",
    }
);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    #[serde(rename = "h")]
    Home,
    #[serde(rename = "a")]
    Away,
}

impl Side {
    /// Key of this side's shot group in a match payload.
    pub fn key(self) -> &'static str {
        match self {
            Self::Home => "h",
            Self::Away => "a",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One shot from a match page's `shotsData`.
///
/// Field names on the wire follow Understat (`X`, `xG`, `h_a`, `shotType`,
/// `lastAction`). Keys this struct does not model are kept in `extra` so
/// that tables built from these records never lose upstream columns.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShotRecord {
    #[serde(deserialize_with = "lenient::int")]
    pub id: i64,

    #[serde(deserialize_with = "lenient::int")]
    pub minute: i64,

    pub result: ShotResult,

    #[serde(rename = "X", deserialize_with = "lenient::float")]
    pub x: f64,

    #[serde(rename = "Y", deserialize_with = "lenient::float")]
    pub y: f64,

    /// Expected goals as published. `None` means upstream gave no value,
    /// which is not the same as 0.0.
    #[serde(rename = "xG", default, deserialize_with = "lenient::opt_float")]
    pub xg: Option<f64>,

    pub player: String,

    #[serde(rename = "h_a")]
    pub side: Side,

    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub player_id: Option<i64>,

    #[serde(default)]
    pub situation: Option<Situation>,

    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub season: Option<i64>,

    #[serde(rename = "shotType", default)]
    pub shot_type: Option<ShotType>,

    #[serde(deserialize_with = "lenient::int")]
    pub match_id: MatchId,

    #[serde(default)]
    pub h_team: Option<String>,

    #[serde(default)]
    pub a_team: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub h_goals: Option<i64>,

    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub a_goals: Option<i64>,

    #[serde(default, with = "lenient::opt_datetime")]
    pub date: Option<NaiveDateTime>,

    #[serde(default, alias = "playerAssisted")]
    pub player_assisted: Option<String>,

    #[serde(rename = "lastAction", default)]
    pub last_action: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl ShotRecord {
    /// Wire names of the modelled fields, in Understat's column order.
    pub const COLUMNS: &'static [&'static str] = &[
        "id",
        "minute",
        "result",
        "X",
        "Y",
        "xG",
        "player",
        "h_a",
        "player_id",
        "situation",
        "season",
        "shotType",
        "match_id",
        "h_team",
        "a_team",
        "h_goals",
        "a_goals",
        "date",
        "player_assisted",
        "lastAction",
    ];

    /// Name of the team that took the shot.
    pub fn team(&self) -> Option<&str> {
        match self.side {
            Side::Home => self.h_team.as_deref(),
            Side::Away => self.a_team.as_deref(),
        }
    }

    pub fn is_goal(&self) -> bool {
        self.result == ShotResult::Goal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> serde_json::Value {
        serde_json::json!({
            "id": "611862",
            "minute": "1",
            "result": "MissedShots",
            "X": "0.885",
            "Y": "0.5",
            "xG": "0.0576",
            "player": "Bruno Fernandes",
            "h_a": "h",
            "player_id": "1228",
            "situation": "OpenPlay",
            "season": "2024",
            "shotType": "RightFoot",
            "match_id": "26602",
            "h_team": "Manchester United",
            "a_team": "Fulham",
            "h_goals": "1",
            "a_goals": "0",
            "date": "2024-08-16 19:02:00",
            "player_assisted": "Amad Diallo",
            "lastAction": "Pass"
        })
    }

    #[test]
    fn deserialize_upstream_shot() {
        let shot: ShotRecord = serde_json::from_value(sample()).unwrap();
        assert_eq!(shot.id, 611862);
        assert_eq!(shot.minute, 1);
        assert_eq!(shot.result, ShotResult::MissedShots);
        assert_eq!(shot.x, 0.885);
        assert_eq!(shot.xg, Some(0.0576));
        assert_eq!(shot.side, Side::Home);
        assert_eq!(shot.situation, Some(Situation::OpenPlay));
        assert_eq!(shot.shot_type, Some(ShotType::RightFoot));
        assert_eq!(shot.match_id, 26602);
        assert_eq!(shot.team(), Some("Manchester United"));
        assert!(shot.extra.is_empty());
    }

    #[test]
    fn unknown_categories_are_preserved() {
        let mut json = sample();
        json["result"] = "Deflected".into();
        json["shotType"] = "Chest".into();
        let shot: ShotRecord = serde_json::from_value(json).unwrap();
        assert_eq!(shot.result, ShotResult::Other("Deflected".into()));
        assert_eq!(shot.shot_type.as_ref().unwrap().as_str(), "Chest");
        let back = serde_json::to_value(&shot).unwrap();
        assert_eq!(back["result"], "Deflected");
    }

    #[test]
    fn unmodelled_keys_land_in_extra() {
        let mut json = sample();
        json["distance"] = "12.4".into();
        let shot: ShotRecord = serde_json::from_value(json).unwrap();
        assert_eq!(shot.extra.get("distance"), Some(&serde_json::json!("12.4")));
        let back = serde_json::to_value(&shot).unwrap();
        assert_eq!(back["distance"], "12.4");
    }

    #[test]
    fn camel_case_assist_alias() {
        let mut json = sample();
        let obj = json.as_object_mut().unwrap();
        obj.remove("player_assisted");
        obj.insert("playerAssisted".into(), "Mason Mount".into());
        let shot: ShotRecord = serde_json::from_value(json).unwrap();
        assert_eq!(shot.player_assisted.as_deref(), Some("Mason Mount"));
    }

    #[test]
    fn missing_xg_is_none_not_zero() {
        let mut json = sample();
        json.as_object_mut().unwrap().remove("xG");
        let shot: ShotRecord = serde_json::from_value(json).unwrap();
        assert_eq!(shot.xg, None);
    }

    #[test]
    fn missing_required_field_fails() {
        let mut json = sample();
        json.as_object_mut().unwrap().remove("minute");
        assert!(serde_json::from_value::<ShotRecord>(json).is_err());
    }

    #[test]
    fn serialized_keys_cover_columns() {
        let shot: ShotRecord = serde_json::from_value(sample()).unwrap();
        let back = serde_json::to_value(&shot).unwrap();
        for column in ShotRecord::COLUMNS {
            assert!(back.get(*column).is_some(), "missing column {}", column);
        }
    }

    #[test]
    fn away_team_for_away_shot() {
        let mut json = sample();
        json["h_a"] = "a".into();
        let shot: ShotRecord = serde_json::from_value(json).unwrap();
        assert_eq!(shot.team(), Some("Fulham"));
    }
}

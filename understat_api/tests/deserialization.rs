use understat_api::types::{MatchSummary, ShotRecord, ShotResult, Side, Situation};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[test]
fn deserialize_dates_listing() {
    let json = load_fixture("dates_EPL_2024.json");
    let matches: Vec<MatchSummary> = serde_json::from_str(&json).unwrap();
    assert_eq!(matches.len(), 3);

    let spurs = &matches[0];
    assert_eq!(spurs.id, 26779);
    assert!(spurs.is_result);
    assert_eq!(spurs.home.title, "Tottenham");
    assert_eq!(spurs.away.short_title.as_deref(), Some("NFO"));
    assert_eq!(spurs.home_goals(), Some(0));
    assert_eq!(spurs.away_goals(), Some(1));
    assert_eq!(spurs.datetime.to_string(), "2024-12-26 15:00:00");
    assert!(spurs.forecast.is_some());

    let unplayed = &matches[2];
    assert!(!unplayed.is_result);
    assert_eq!(unplayed.home_goals(), None);
    assert!(unplayed.forecast.is_none());
}

#[test]
fn deserialize_shots_groups() {
    let json = load_fixture("shots_26779.json");
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let home: Vec<ShotRecord> = serde_json::from_value(value["h"].clone()).unwrap();
    let away: Vec<ShotRecord> = serde_json::from_value(value["a"].clone()).unwrap();
    assert_eq!(home.len(), 3);
    assert_eq!(away.len(), 2);

    assert!(home.iter().all(|s| s.side == Side::Home));
    assert!(away.iter().all(|s| s.side == Side::Away));

    let wood = &away[0];
    assert_eq!(wood.player, "Chris Wood");
    assert_eq!(wood.result, ShotResult::Goal);
    assert_eq!(wood.minute, 18);
    assert_eq!(wood.xg, Some(0.6102));
    assert_eq!(wood.team(), Some("Nottingham Forest"));
    assert!(wood.is_goal());

    let kulusevski = &home[2];
    assert_eq!(kulusevski.player_assisted, None);
    assert_eq!(kulusevski.situation, Some(Situation::OpenPlay));
}

#[test]
fn listing_numeric_ids_accepted() {
    let json = r#"{"id": 100, "isResult": true,
        "h": {"id": 1, "title": "A", "short_title": "AAA"},
        "a": {"id": 2, "title": "B", "short_title": "BBB"},
        "goals": {"h": 2, "a": 2}, "xG": {"h": 1.5, "a": 0.9},
        "datetime": "2024-08-17 14:00:00"}"#;
    let summary: MatchSummary = serde_json::from_str(json).unwrap();
    assert_eq!(summary.id, 100);
    assert_eq!(summary.xg.unwrap().h, Some(1.5));
}

#[test]
fn listing_missing_result_flag_is_error() {
    let json = r#"{"id": "1",
        "h": {"id": "1", "title": "A"}, "a": {"id": "2", "title": "B"},
        "datetime": "2024-08-17 14:00:00"}"#;
    assert!(serde_json::from_str::<MatchSummary>(json).is_err());
}

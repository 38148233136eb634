//! Team and player selection over a shot table.

use std::collections::BTreeSet;

use understat_api::types::ShotRecord;

use crate::table::ShotTable;

/// Immutable team/player query. `None` matches everything.
///
/// Names compare case-insensitively. A shot's team is its home team for home
/// shots and its away team for away shots.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShotFilter {
    pub team: Option<String>,
    pub player: Option<String>,
}

impl ShotFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    /// An empty name means all players.
    pub fn player(mut self, player: impl Into<String>) -> Self {
        let player = player.into();
        self.player = (!player.is_empty()).then_some(player);
        self
    }

    pub fn matches(&self, shot: &ShotRecord) -> bool {
        let team_ok = match &self.team {
            Some(team) => shot.team().is_some_and(|t| same_name(t, team)),
            None => true,
        };
        let player_ok = match &self.player {
            Some(player) => same_name(&shot.player, player),
            None => true,
        };
        team_ok && player_ok
    }

    /// New table with the same columns and only the matching shots.
    pub fn apply(&self, table: &ShotTable) -> ShotTable {
        table.filtered(|shot| self.matches(shot))
    }
}

fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Distinct team names in the table, sorted.
pub fn teams(table: &ShotTable) -> Vec<String> {
    table
        .rows()
        .iter()
        .filter_map(ShotRecord::team)
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct player names, sorted, optionally limited to one team.
pub fn players(table: &ShotTable, team: Option<&str>) -> Vec<String> {
    let filter = ShotFilter {
        team: team.map(str::to_string),
        player: None,
    };
    table
        .rows()
        .iter()
        .filter(|shot| filter.matches(shot))
        .map(|shot| shot.player.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn shot(id: i64, player: &str, side: &str) -> ShotRecord {
        serde_json::from_value(json!({
            "id": id,
            "minute": 5,
            "result": "MissedShots",
            "X": 0.8,
            "Y": 0.5,
            "xG": 0.1,
            "player": player,
            "h_a": side,
            "match_id": 26779,
            "h_team": "Tottenham",
            "a_team": "Nottingham Forest"
        }))
        .unwrap()
    }

    fn table() -> ShotTable {
        ShotTable::from_records(vec![
            shot(1, "Son Heung-Min", "h"),
            shot(2, "Dominic Solanke", "h"),
            shot(3, "Chris Wood", "a"),
            shot(4, "Son Heung-Min", "h"),
        ])
    }

    #[test]
    fn team_uses_side() {
        let only_forest = ShotFilter::new().team("Nottingham Forest").apply(&table());
        let ids: Vec<i64> = only_forest.rows().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![3]);
    }

    #[test]
    fn team_and_player() {
        let filtered = ShotFilter::new()
            .team("Tottenham")
            .player("Son Heung-Min")
            .apply(&table());
        let ids: Vec<i64> = filtered.rows().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 4]);
    }

    #[test]
    fn empty_player_means_all() {
        let filter = ShotFilter::new().team("Tottenham").player("");
        assert_eq!(filter.player, None);
        assert_eq!(filter.apply(&table()).len(), 3);
    }

    #[test]
    fn names_compare_case_insensitively() {
        let filtered = ShotFilter::new().team("tottenham").apply(&table());
        assert_eq!(filtered.len(), 3);
    }

    #[test]
    fn default_filter_keeps_everything() {
        let original = table();
        assert_eq!(ShotFilter::default().apply(&original), original);
    }

    #[test]
    fn player_from_other_team_matches_nothing() {
        let filtered = ShotFilter::new()
            .team("Tottenham")
            .player("Chris Wood")
            .apply(&table());
        assert!(filtered.is_empty());
    }

    #[test]
    fn team_options_sorted_distinct() {
        assert_eq!(teams(&table()), vec!["Nottingham Forest", "Tottenham"]);
    }

    #[test]
    fn player_options_by_team() {
        assert_eq!(
            players(&table(), Some("Tottenham")),
            vec!["Dominic Solanke", "Son Heung-Min"]
        );
        assert_eq!(players(&table(), None).len(), 3);
    }
}

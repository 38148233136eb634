//! Per-player shot totals.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::table::ShotTable;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlayerSummary {
    pub team: String,
    pub player: String,
    pub shots: usize,
    pub goals: usize,
    /// Sum of the published xG values. Shots without one add nothing.
    pub xg: f64,
    /// Shots whose xG upstream left empty.
    pub missing_xg: usize,
}

/// Groups shots by team and player, sorted by team then player.
///
/// A shot with no team name is grouped under an empty team.
pub fn summarize_players(table: &ShotTable) -> Vec<PlayerSummary> {
    let mut groups: BTreeMap<(String, String), PlayerSummary> = BTreeMap::new();
    for shot in table.rows() {
        let team = shot.team().unwrap_or_default().to_string();
        let entry = groups
            .entry((team.clone(), shot.player.clone()))
            .or_insert_with(|| PlayerSummary {
                team,
                player: shot.player.clone(),
                shots: 0,
                goals: 0,
                xg: 0.0,
                missing_xg: 0,
            });
        entry.shots += 1;
        if shot.is_goal() {
            entry.goals += 1;
        }
        match shot.xg {
            Some(xg) => entry.xg += xg,
            None => entry.missing_xg += 1,
        }
    }
    groups.into_values().collect()
}

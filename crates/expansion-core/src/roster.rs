// League snapshot: team rosters in source order plus display labels.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::player::PlayerDirectory;

/// One existing team's roster. Player order is significant: it drives the
/// default protection choice and the within-position loss order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRoster {
    pub owner_id: String,
    pub players: Vec<String>,
}

impl TeamRoster {
    pub fn new(owner_id: impl Into<String>, players: Vec<String>) -> Self {
        Self {
            owner_id: owner_id.into(),
            players,
        }
    }

    pub fn contains(&self, player_id: &str) -> bool {
        self.players.iter().any(|p| p == player_id)
    }
}

/// Everything the simulation needs from the data source for one league.
#[derive(Debug, Clone, Default)]
pub struct LeagueSnapshot {
    pub league_id: String,
    /// Rosters in the order the data source returned them.
    pub rosters: Vec<TeamRoster>,
    /// Owner id -> team display label. Optional; owners without an entry
    /// are labelled by their id.
    pub team_names: HashMap<String, String>,
    pub players: PlayerDirectory,
}

impl LeagueSnapshot {
    /// Look up a roster by owner id.
    pub fn roster(&self, owner_id: &str) -> Option<&TeamRoster> {
        self.rosters.iter().find(|r| r.owner_id == owner_id)
    }

    /// Display label for an owner: team name when known, else the owner id.
    pub fn team_label<'a>(&'a self, owner_id: &'a str) -> &'a str {
        self.team_names
            .get(owner_id)
            .map(|s| s.as_str())
            .unwrap_or(owner_id)
    }

    /// Total number of rostered players across all teams.
    pub fn rostered_count(&self) -> usize {
        self.rosters.iter().map(|r| r.players.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_lookup_and_labels() {
        let mut snapshot = LeagueSnapshot {
            league_id: "123".into(),
            rosters: vec![
                TeamRoster::new("u1", vec!["a".into(), "b".into()]),
                TeamRoster::new("u2", vec![]),
            ],
            ..Default::default()
        };
        snapshot.team_names.insert("u1".into(), "Gridiron Gang".into());

        assert_eq!(snapshot.roster("u1").map(|r| r.players.len()), Some(2));
        assert!(snapshot.roster("u3").is_none());
        assert_eq!(snapshot.team_label("u1"), "Gridiron Gang");
        assert_eq!(snapshot.team_label("u2"), "u2");
        assert_eq!(snapshot.rostered_count(), 2);
    }

    #[test]
    fn contains_checks_membership() {
        let roster = TeamRoster::new("u1", vec!["a".into(), "b".into()]);
        assert!(roster.contains("a"));
        assert!(!roster.contains("z"));
    }
}

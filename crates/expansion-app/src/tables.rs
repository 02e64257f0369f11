// Display rows shared by the CSV export, the plain-text summary and the
// interactive viewer. Ids are resolved to names and positions once here.

use expansion_core::roster::LeagueSnapshot;
use expansion_core::simulation::SimulationOutcome;

/// One existing team's protected players and losses, by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakdownRow {
    pub owner_id: String,
    pub team: String,
    pub protected: Vec<String>,
    pub losses: Vec<String>,
}

/// One slot of the truncated draft pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolRow {
    /// 1-based position in the pool.
    pub slot: usize,
    pub player: String,
    pub position: String,
}

/// One chronological pick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickRow {
    pub pick: usize,
    pub round: usize,
    pub team: String,
    pub player: String,
    pub position: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterRow {
    pub player: String,
    pub position: String,
}

/// An expansion team's final roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterTable {
    pub label: String,
    pub rows: Vec<RosterRow>,
}

/// Every table for one outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportTables {
    pub breakdown: Vec<BreakdownRow>,
    pub pool: Vec<PoolRow>,
    pub picks: Vec<PickRow>,
    pub rosters: Vec<RosterTable>,
}

impl ReportTables {
    pub fn build(league: &LeagueSnapshot, outcome: &SimulationOutcome) -> Self {
        let players = &league.players;
        let position = |id: &str| players.position(id).display_str().to_string();

        let breakdown = outcome
            .breakdown
            .iter()
            .map(|b| BreakdownRow {
                owner_id: b.owner_id.clone(),
                team: league.team_label(&b.owner_id).to_string(),
                protected: players.display_names(&b.protected),
                losses: players.display_names(&b.losses),
            })
            .collect();

        let pool = outcome
            .pool
            .iter()
            .enumerate()
            .map(|(i, id)| PoolRow {
                slot: i + 1,
                player: players.display_name(id).to_string(),
                position: position(id),
            })
            .collect();

        let picks = outcome
            .picks
            .iter()
            .map(|p| PickRow {
                pick: p.pick_number,
                round: p.round,
                team: p.team_label.clone(),
                player: players.display_name(&p.player_id).to_string(),
                position: position(&p.player_id),
            })
            .collect();

        let rosters = outcome
            .teams
            .iter()
            .map(|team| RosterTable {
                label: team.label.clone(),
                rows: team
                    .players
                    .iter()
                    .map(|id| RosterRow {
                        player: players.display_name(id).to_string(),
                        position: position(id),
                    })
                    .collect(),
            })
            .collect();

        ReportTables {
            breakdown,
            pool,
            picks,
            rosters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use expansion_core::allocate::DraftFormat;
    use expansion_core::caps::PositionCaps;
    use expansion_core::player::{PlayerDirectory, PlayerInfo};
    use expansion_core::roster::TeamRoster;
    use expansion_core::simulation::{simulate, SimulationSettings};

    #[test]
    fn rows_resolve_names_positions_and_labels() {
        let players: PlayerDirectory = [
            PlayerInfo::new("1", "Alpha", "RB"),
            PlayerInfo::new("2", "Bravo", "WR"),
            PlayerInfo::new("3", "Charlie", "TE"),
        ]
        .into_iter()
        .collect();
        let mut team_names = HashMap::new();
        team_names.insert("u1".to_string(), "Gridiron Gang".to_string());
        let league = LeagueSnapshot {
            league_id: "L".into(),
            rosters: vec![TeamRoster::new(
                "u1",
                vec!["1".into(), "2".into(), "3".into(), "x".into()],
            )],
            team_names,
            players,
        };
        let settings = SimulationSettings {
            max_protect: 1,
            num_teams: 2,
            picks_per_team: 2,
            format: DraftFormat::Snake,
            caps: PositionCaps::new(),
        };
        let outcome = simulate(&league, &settings, &HashMap::new()).unwrap();
        let tables = ReportTables::build(&league, &outcome);

        assert_eq!(tables.breakdown[0].team, "Gridiron Gang");
        assert_eq!(tables.breakdown[0].protected, vec!["Alpha"]);
        assert_eq!(tables.breakdown[0].losses, vec!["Bravo", "Charlie", "x"]);

        assert_eq!(tables.pool.len(), 3);
        assert_eq!(
            tables.pool[2],
            PoolRow {
                slot: 3,
                player: "x".into(),
                position: "UNK".into(),
            }
        );

        assert_eq!(tables.picks[1].team, "Expansion Team 2");
        assert_eq!(tables.picks[1].player, "Charlie");
        assert_eq!(tables.picks[2].round, 2);
        assert_eq!(tables.picks[2].team, "Expansion Team 2");

        assert_eq!(tables.rosters[0].label, "Expansion Team 1");
        assert_eq!(
            tables.rosters[0].rows,
            vec![RosterRow {
                player: "Bravo".into(),
                position: "WR".into(),
            }]
        );
    }
}

// Draft allocator: distributes the pool across expansion teams.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Turn order policy, fixed for a whole draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DraftFormat {
    /// Direction flips every round.
    #[default]
    Snake,
    /// Same team order every round.
    Linear,
}

impl DraftFormat {
    /// Parse a format name, case-insensitively.
    pub fn from_str_format(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "snake" => Some(DraftFormat::Snake),
            "linear" => Some(DraftFormat::Linear),
            _ => None,
        }
    }

    pub fn display_str(&self) -> &'static str {
        match self {
            DraftFormat::Snake => "Snake",
            DraftFormat::Linear => "Linear",
        }
    }

    /// Team index that owns overall pick `idx` (0-based).
    ///
    /// `num_teams` must be positive.
    pub fn team_for_pick(&self, idx: usize, num_teams: usize) -> usize {
        let round = idx / num_teams;
        let seat = idx % num_teams;
        match self {
            DraftFormat::Linear => seat,
            DraftFormat::Snake if round % 2 == 0 => seat,
            DraftFormat::Snake => num_teams - 1 - seat,
        }
    }

    /// Team indices in turn order for a given 0-based round.
    pub fn round_order(&self, round: usize, num_teams: usize) -> Vec<usize> {
        (0..num_teams)
            .map(|seat| self.team_for_pick(round * num_teams + seat, num_teams))
            .collect()
    }
}

impl fmt::Display for DraftFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

/// A newly created team and the players it drafted, in pick order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpansionTeam {
    pub label: String,
    pub players: Vec<String>,
}

/// One chronological pick of the expansion draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DraftPick {
    /// Overall pick number (1-indexed).
    pub pick_number: usize,
    /// Round number (1-indexed).
    pub round: usize,
    pub team_label: String,
    pub player_id: String,
}

/// Deterministic expansion team labels: "Expansion Team 1" .. N.
pub fn team_labels(num_teams: usize) -> Vec<String> {
    (1..=num_teams)
        .map(|i| format!("Expansion Team {i}"))
        .collect()
}

/// Assign the pool to `num_teams` expansion teams.
///
/// The pool is truncated to `num_teams * picks_per_team` entries; the rest is
/// dropped silently. Teams may end up short when the pool runs out.
/// Callers reject non-positive team and pick counts up front; a zero team
/// count yields no teams rather than dividing by zero.
pub fn allocate(
    pool: &[String],
    num_teams: usize,
    picks_per_team: usize,
    format: DraftFormat,
) -> Vec<ExpansionTeam> {
    let mut teams: Vec<ExpansionTeam> = team_labels(num_teams)
        .into_iter()
        .map(|label| ExpansionTeam {
            label,
            players: Vec::new(),
        })
        .collect();
    if num_teams == 0 {
        return teams;
    }

    let total = num_teams.saturating_mul(picks_per_team);
    for (idx, player_id) in pool.iter().take(total).enumerate() {
        let team = format.team_for_pick(idx, num_teams);
        teams[team].players.push(player_id.clone());
    }

    teams
}

/// Reconstruct the chronological pick sequence from per-team results.
///
/// Walks rounds in the format's turn order and emits each team's next
/// player, skipping teams that have run out. For the output of `allocate`
/// this reproduces the exact draft order.
pub fn pick_log(teams: &[ExpansionTeam], format: DraftFormat) -> Vec<DraftPick> {
    let num_teams = teams.len();
    let rounds = teams.iter().map(|t| t.players.len()).max().unwrap_or(0);
    let mut picks = Vec::new();

    for round in 0..rounds {
        for team_idx in format.round_order(round, num_teams) {
            let team = &teams[team_idx];
            if let Some(player_id) = team.players.get(round) {
                picks.push(DraftPick {
                    pick_number: picks.len() + 1,
                    round: round + 1,
                    team_label: team.label.clone(),
                    player_id: player_id.clone(),
                });
            }
        }
    }

    picks
}

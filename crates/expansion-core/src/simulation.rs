// Simulation driver: settings, the pure partition -> allocate pipeline,
// and the advisor-backed protection and draft paths with their fallbacks.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::allocate::{allocate, pick_log, team_labels, DraftFormat, DraftPick, ExpansionTeam};
use crate::caps::PositionCaps;
use crate::error::ExpansionError;
use crate::partition::{partition, OwnerBreakdown};
use crate::protection::{default_protections, validate_manual, ProtectionMode};
use crate::roster::{LeagueSnapshot, TeamRoster};
use crate::suggest::{
    parse_name_list, parse_team_assignments, resolve_draft, resolve_protections, Advisor,
    DraftRequest, ProtectionRequest, RosterEntry, SuggestionError,
};

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Parameters for one expansion draft run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationSettings {
    pub max_protect: usize,
    pub num_teams: usize,
    pub picks_per_team: usize,
    pub format: DraftFormat,
    pub caps: PositionCaps,
}

impl SimulationSettings {
    /// Number of picks the draft can make (and the pool truncation length).
    pub fn total_picks(&self) -> usize {
        self.num_teams.saturating_mul(self.picks_per_team)
    }

    /// Reject settings the allocator cannot run with.
    pub fn validate(&self) -> Result<(), ExpansionError> {
        if self.num_teams == 0 {
            return Err(ExpansionError::InvalidSetting {
                field: "num_teams".into(),
                message: "must be greater than 0".into(),
            });
        }
        if self.picks_per_team == 0 {
            return Err(ExpansionError::InvalidSetting {
                field: "picks_per_team".into(),
                message: "must be greater than 0".into(),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Everything a run produces, ready for presentation or export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SimulationOutcome {
    /// Per-owner protected players and losses, in roster order.
    pub breakdown: Vec<OwnerBreakdown>,
    /// The draft pool after truncation to `total_picks`.
    pub pool: Vec<String>,
    /// Expansion teams in creation order.
    pub teams: Vec<ExpansionTeam>,
    /// Chronological picks.
    pub picks: Vec<DraftPick>,
}

impl SimulationOutcome {
    /// Swap in a different team assignment and rebuild the pick log.
    pub fn replace_draft(&mut self, teams: Vec<ExpansionTeam>, format: DraftFormat) {
        self.picks = pick_log(&teams, format);
        self.teams = teams;
    }

    /// Sum of every owner's losses before truncation.
    pub fn total_losses(&self) -> usize {
        self.breakdown.iter().map(|b| b.losses.len()).sum()
    }
}

/// Run partition and allocation for a league with resolved protections.
///
/// Pure: identical inputs always produce identical outcomes.
pub fn simulate(
    league: &LeagueSnapshot,
    settings: &SimulationSettings,
    protections: &HashMap<String, Vec<String>>,
) -> Result<SimulationOutcome, ExpansionError> {
    settings.validate()?;

    let result = partition(
        &league.rosters,
        protections,
        &league.players,
        &settings.caps,
        settings.max_protect,
    );

    let mut pool = result.pool;
    pool.truncate(settings.total_picks());

    let teams = allocate(
        &pool,
        settings.num_teams,
        settings.picks_per_team,
        settings.format,
    );
    let picks = pick_log(&teams, settings.format);

    debug!(
        owners = result.breakdown.len(),
        pool = pool.len(),
        picks = picks.len(),
        "simulation complete"
    );

    Ok(SimulationOutcome {
        breakdown: result.breakdown,
        pool,
        teams,
        picks,
    })
}

// ---------------------------------------------------------------------------
// Protection building
// ---------------------------------------------------------------------------

/// Resolved protections plus a record of where they came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProtectionPlan {
    pub protections: HashMap<String, Vec<String>>,
    /// Owners whose protections came from an accepted advisor suggestion.
    pub assisted_owners: Vec<String>,
    /// Owners for which an advisor suggestion was rejected or failed.
    pub fallback_owners: Vec<String>,
}

/// Build every owner's protection list for the given mode.
///
/// - `Default`: first `max_protect` players of each roster.
/// - `Manual`: `overrides` are validated for exact counts (aborting with
///   every offending owner), then used as-is; owners without an entry get
///   the default.
/// - `Assisted`: each owner is sent to `advisor`; a failed, unparsable or
///   invalid suggestion falls back to the default for that owner only.
///   Without an advisor every owner falls back. Owners with nothing to
///   protect are never consulted and appear in neither list.
pub async fn build_protections(
    league: &LeagueSnapshot,
    settings: &SimulationSettings,
    mode: ProtectionMode,
    overrides: &HashMap<String, Vec<String>>,
    advisor: Option<&dyn Advisor>,
) -> Result<ProtectionPlan, ExpansionError> {
    let mut plan = ProtectionPlan::default();

    match mode {
        ProtectionMode::Default => {
            for roster in &league.rosters {
                plan.protections.insert(
                    roster.owner_id.clone(),
                    default_protections(roster, settings.max_protect),
                );
            }
        }
        ProtectionMode::Manual => {
            validate_manual(&league.rosters, overrides, settings.max_protect)?;
            for roster in &league.rosters {
                let chosen = overrides
                    .get(&roster.owner_id)
                    .cloned()
                    .unwrap_or_else(|| default_protections(roster, settings.max_protect));
                plan.protections.insert(roster.owner_id.clone(), chosen);
            }
        }
        ProtectionMode::Assisted => {
            for roster in &league.rosters {
                if roster.players.is_empty() || settings.max_protect == 0 {
                    debug!(owner = %roster.owner_id, "nothing to protect; advisor not consulted");
                    plan.protections.insert(roster.owner_id.clone(), Vec::new());
                    continue;
                }
                let suggestion = match advisor {
                    Some(advisor) => suggest_for_owner(advisor, league, settings, roster).await,
                    None => Err(SuggestionFailure::NoAdvisor),
                };
                match suggestion {
                    Ok(chosen) => {
                        info!(owner = %roster.owner_id, count = chosen.len(), "advisor protections accepted");
                        plan.assisted_owners.push(roster.owner_id.clone());
                        plan.protections.insert(roster.owner_id.clone(), chosen);
                    }
                    Err(failure) => {
                        warn!(owner = %roster.owner_id, "advisor protections rejected, using default: {failure}");
                        plan.fallback_owners.push(roster.owner_id.clone());
                        plan.protections.insert(
                            roster.owner_id.clone(),
                            default_protections(roster, settings.max_protect),
                        );
                    }
                }
            }
        }
    }

    Ok(plan)
}

/// Why an advisor suggestion was not used.
#[derive(Debug, thiserror::Error)]
enum SuggestionFailure {
    #[error("no advisor configured")]
    NoAdvisor,
    #[error("advisor call failed: {0}")]
    Call(anyhow::Error),
    #[error(transparent)]
    Invalid(#[from] SuggestionError),
}

async fn suggest_for_owner(
    advisor: &dyn Advisor,
    league: &LeagueSnapshot,
    settings: &SimulationSettings,
    roster: &TeamRoster,
) -> Result<Vec<String>, SuggestionFailure> {
    let owner_id = roster.owner_id.as_str();
    let request = ProtectionRequest {
        owner_id: owner_id.to_string(),
        team_label: league.team_label(owner_id).to_string(),
        roster: RosterEntry::from_ids(&roster.players, &league.players),
        max_protect: settings.max_protect,
        position_caps: settings.caps.explicit(),
        other_cap: settings.caps.other(),
    };

    let text = advisor
        .suggest_protections(&request)
        .await
        .map_err(SuggestionFailure::Call)?;
    let names = parse_name_list(&text)?;
    Ok(resolve_protections(
        &names,
        roster,
        &league.players,
        settings.max_protect,
    )?)
}

// ---------------------------------------------------------------------------
// Assisted draft
// ---------------------------------------------------------------------------

/// Ask the advisor to assign `pool` (already truncated) to the expansion
/// teams.
///
/// Returns `None` when the suggestion fails or does not validate; the
/// caller keeps the standard allocation in that case.
pub async fn assisted_draft(
    advisor: &dyn Advisor,
    league: &LeagueSnapshot,
    settings: &SimulationSettings,
    pool: &[String],
) -> Option<Vec<ExpansionTeam>> {
    let labels = team_labels(settings.num_teams);
    let request = DraftRequest {
        team_labels: labels.clone(),
        picks_per_team: settings.picks_per_team,
        format: settings.format,
        pool: RosterEntry::from_ids(pool, &league.players),
    };

    let text = match advisor.suggest_draft(&request).await {
        Ok(text) => text,
        Err(e) => {
            warn!("advisor draft call failed, using {} allocation: {e}", settings.format);
            return None;
        }
    };

    let resolved = parse_team_assignments(&text).and_then(|assignments| {
        resolve_draft(
            &assignments,
            pool,
            &labels,
            settings.picks_per_team,
            &league.players,
        )
    });

    match resolved {
        Ok(teams) => {
            info!(teams = teams.len(), "advisor draft assignment accepted");
            Some(teams)
        }
        Err(e) => {
            warn!("advisor draft rejected, using {} allocation: {e}", settings.format);
            None
        }
    }
}

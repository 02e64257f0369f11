// Advisor boundary: request types, response parsing, and validation.
//
// An advisor (typically an LLM) suggests protections or a full draft
// assignment as player *names*. Nothing it returns is trusted: names are
// resolved against the relevant player ids, unresolved names are dropped,
// and any suggestion that does not meet the expected shape is rejected so
// the caller can fall back to the deterministic path.

use std::collections::HashSet;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::allocate::{DraftFormat, ExpansionTeam};
use crate::player::{normalize_name, PlayerDirectory};
use crate::roster::TeamRoster;

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// A player as presented to the advisor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterEntry {
    pub name: String,
    pub position: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
}

impl RosterEntry {
    /// Describe `ids` using directory metadata (placeholders when missing).
    pub fn from_ids(ids: &[String], players: &PlayerDirectory) -> Vec<RosterEntry> {
        ids.iter()
            .map(|id| RosterEntry {
                name: players.display_name(id).to_string(),
                position: players.position(id).display_str().to_string(),
                rank: players.rank(id),
            })
            .collect()
    }
}

/// Ask for one team's protected players.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectionRequest {
    pub owner_id: String,
    pub team_label: String,
    pub roster: Vec<RosterEntry>,
    pub max_protect: usize,
    /// Explicit loss caps as (position label, cap).
    pub position_caps: Vec<(String, usize)>,
    /// Loss cap for positions without an explicit entry.
    pub other_cap: Option<usize>,
}

/// Ask for a complete assignment of the pool to expansion teams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftRequest {
    pub team_labels: Vec<String>,
    pub picks_per_team: usize,
    pub format: DraftFormat,
    pub pool: Vec<RosterEntry>,
}

/// Pluggable suggestion capability.
///
/// Implementations return the raw response text; parsing and validation
/// happen here in the core so every advisor gets the same fallback rules.
#[async_trait]
pub trait Advisor: Send + Sync {
    /// Expected to contain a JSON array of player names.
    async fn suggest_protections(&self, request: &ProtectionRequest) -> anyhow::Result<String>;

    /// Expected to contain a JSON object of team label -> array of names.
    async fn suggest_draft(&self, request: &DraftRequest) -> anyhow::Result<String>;
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum SuggestionError {
    #[error("no JSON value found in advisor response")]
    NoJson,

    #[error("advisor response is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("advisor response has the wrong shape: expected {expected}")]
    WrongShape { expected: &'static str },

    #[error("suggestion resolved to {resolved} players, expected {expected}")]
    WrongCount { resolved: usize, expected: usize },

    #[error("draft suggestion rejected: {0}")]
    InvalidDraft(String),
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Read the first JSON value out of free-form model output.
///
/// Models wrap JSON in code fences or prose. Each `[` or `{` is tried in
/// turn and the first one that starts a complete value wins; anything after
/// that value is ignored. When none parses, the error from the first
/// opener is returned.
pub fn extract_json(text: &str) -> Result<Value, SuggestionError> {
    let mut first_error = None;
    for (start, _) in text.match_indices(|c: char| c == '[' || c == '{') {
        let mut values = serde_json::Deserializer::from_str(&text[start..]).into_iter::<Value>();
        match values.next() {
            Some(Ok(value)) => return Ok(value),
            Some(Err(e)) => {
                first_error.get_or_insert(e);
            }
            None => {}
        }
    }
    Err(first_error.map_or(SuggestionError::NoJson, SuggestionError::Malformed))
}

/// Parse a JSON array of names. Non-string elements are dropped.
pub fn parse_name_list(text: &str) -> Result<Vec<String>, SuggestionError> {
    let value = extract_json(text)?;
    let items = value.as_array().ok_or(SuggestionError::WrongShape {
        expected: "an array of player names",
    })?;
    Ok(string_items(items))
}

/// Parse a JSON object of team label -> array of names.
///
/// Entries come back sorted by label; callers match them to the real team
/// labels, so the object's own key order carries no meaning.
pub fn parse_team_assignments(text: &str) -> Result<Vec<(String, Vec<String>)>, SuggestionError> {
    let value = extract_json(text)?;
    let object = value.as_object().ok_or(SuggestionError::WrongShape {
        expected: "an object of team label to player names",
    })?;

    object
        .iter()
        .map(|(label, names)| {
            let items = names.as_array().ok_or(SuggestionError::WrongShape {
                expected: "each team to map to an array of player names",
            })?;
            Ok((label.clone(), string_items(items)))
        })
        .collect()
}

fn string_items(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(|v| v.as_str())
        .map(|s| s.to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Turn suggested protection names into roster player ids.
///
/// Unresolved and repeated names are dropped and the list is cut to
/// `max_protect`. The suggestion is accepted only if it then names exactly
/// `min(max_protect, roster size)` players.
pub fn resolve_protections(
    names: &[String],
    roster: &TeamRoster,
    players: &PlayerDirectory,
    max_protect: usize,
) -> Result<Vec<String>, SuggestionError> {
    let mut resolved: Vec<String> = Vec::new();
    for name in names {
        match players.resolve_name(name, &roster.players, |id| resolved.iter().any(|r| r == id)) {
            Some(id) if !resolved.iter().any(|r| r == id) => resolved.push(id.to_string()),
            Some(_) => debug!(owner = %roster.owner_id, name = %name, "duplicate protection suggestion dropped"),
            None => debug!(owner = %roster.owner_id, name = %name, "unresolved protection suggestion dropped"),
        }
    }
    resolved.truncate(max_protect);

    let expected = max_protect.min(roster.players.len());
    if resolved.len() != expected {
        return Err(SuggestionError::WrongCount {
            resolved: resolved.len(),
            expected,
        });
    }
    Ok(resolved)
}

/// Turn a suggested draft assignment into expansion teams.
///
/// Keys are matched to `labels` ignoring case and punctuation; unknown keys
/// and unresolved or repeated names are dropped. The result is accepted
/// only when every pool player lands on exactly one team and no team
/// exceeds `picks_per_team`.
pub fn resolve_draft(
    assignments: &[(String, Vec<String>)],
    pool: &[String],
    labels: &[String],
    picks_per_team: usize,
    players: &PlayerDirectory,
) -> Result<Vec<ExpansionTeam>, SuggestionError> {
    let mut taken: HashSet<String> = HashSet::new();
    let mut teams = Vec::with_capacity(labels.len());

    for (key, _) in assignments {
        if !labels.iter().any(|l| normalize_name(l) == normalize_name(key)) {
            debug!(team = %key, "unknown expansion team in draft suggestion dropped");
        }
    }

    for label in labels {
        let wanted = normalize_name(label);
        let mut team = ExpansionTeam {
            label: label.clone(),
            players: Vec::new(),
        };

        for (_, names) in assignments
            .iter()
            .filter(|(key, _)| normalize_name(key) == wanted)
        {
            for name in names {
                match players.resolve_name(name, pool, |id| taken.contains(id)) {
                    Some(id) if taken.insert(id.to_string()) => team.players.push(id.to_string()),
                    Some(_) => debug!(team = %label, name = %name, "player assigned twice; dropped"),
                    None => debug!(team = %label, name = %name, "unresolved draft suggestion dropped"),
                }
            }
        }

        if team.players.len() > picks_per_team {
            return Err(SuggestionError::InvalidDraft(format!(
                "{} received {} players, limit is {}",
                label,
                team.players.len(),
                picks_per_team
            )));
        }
        teams.push(team);
    }

    if taken.len() != pool.len() {
        return Err(SuggestionError::InvalidDraft(format!(
            "{} of {} pool players assigned",
            taken.len(),
            pool.len()
        )));
    }
    Ok(teams)
}

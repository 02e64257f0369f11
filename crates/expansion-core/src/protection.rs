// Protection modes, manual-count validation, and override sanity checks.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ExpansionError, ProtectionViolation};
use crate::roster::TeamRoster;

/// How each team's protected set is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtectionMode {
    /// First `max_protect` players in roster order.
    #[default]
    Default,
    /// User-supplied overrides; each must list exactly `max_protect` players.
    Manual,
    /// Suggested by the advisor, falling back to `Default` per team.
    Assisted,
}

impl ProtectionMode {
    pub fn from_str_mode(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "default" => Some(ProtectionMode::Default),
            "manual" => Some(ProtectionMode::Manual),
            "assisted" => Some(ProtectionMode::Assisted),
            _ => None,
        }
    }

    pub fn display_str(&self) -> &'static str {
        match self {
            ProtectionMode::Default => "default",
            ProtectionMode::Manual => "manual",
            ProtectionMode::Assisted => "assisted",
        }
    }
}

impl fmt::Display for ProtectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

/// First `max_protect` players of a roster.
pub fn default_protections(roster: &TeamRoster, max_protect: usize) -> Vec<String> {
    roster.players.iter().take(max_protect).cloned().collect()
}

/// Check that every manual override lists exactly `max_protect` players.
///
/// Only owners present in `rosters` that have an override entry are
/// checked; owners without one use the default protection. All violations
/// are collected (in roster order) before failing so the user can fix them
/// in one pass.
pub fn validate_manual(
    rosters: &[TeamRoster],
    overrides: &HashMap<String, Vec<String>>,
    max_protect: usize,
) -> Result<(), ExpansionError> {
    let violations: Vec<ProtectionViolation> = rosters
        .iter()
        .filter_map(|roster| {
            let chosen = overrides.get(&roster.owner_id)?;
            (chosen.len() != max_protect).then(|| ProtectionViolation {
                owner_id: roster.owner_id.clone(),
                expected: max_protect,
                actual: chosen.len(),
            })
        })
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ExpansionError::ProtectionCount {
            expected: max_protect,
            violations,
        })
    }
}

/// An override entry naming a player that is not on the owner's roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignProtection {
    pub owner_id: String,
    pub player_id: String,
}

/// List override entries that reference players outside the owner's roster.
///
/// These are not errors: the partitioner ignores them (the slot is simply
/// wasted). Callers surface them as warnings.
pub fn foreign_protections(
    rosters: &[TeamRoster],
    overrides: &HashMap<String, Vec<String>>,
) -> Vec<ForeignProtection> {
    rosters
        .iter()
        .filter_map(|roster| overrides.get(&roster.owner_id).map(|chosen| (roster, chosen)))
        .flat_map(|(roster, chosen)| {
            chosen
                .iter()
                .filter(|id| !roster.contains(id))
                .map(|id| ForeignProtection {
                    owner_id: roster.owner_id.clone(),
                    player_id: id.clone(),
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Override keys that match no roster owner.
pub fn unknown_override_owners(
    rosters: &[TeamRoster],
    overrides: &HashMap<String, Vec<String>>,
) -> Vec<String> {
    let mut unknown: Vec<String> = overrides
        .keys()
        .filter(|owner| !rosters.iter().any(|r| &r.owner_id == *owner))
        .cloned()
        .collect();
    unknown.sort();
    unknown
}

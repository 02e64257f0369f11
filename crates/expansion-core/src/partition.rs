// Protection & loss partitioner.
//
// For each existing team, in roster-map order: resolve the protected set,
// group the remaining players by position (first-seen group order, roster
// order within a group), take up to the position cap from each group, and
// append the resulting losses to the shared pool.

use std::collections::HashMap;

use serde::Serialize;

use crate::caps::PositionCaps;
use crate::player::{PlayerDirectory, Position};
use crate::roster::TeamRoster;

/// One team's outcome: who it kept and who it exposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnerBreakdown {
    pub owner_id: String,
    pub protected: Vec<String>,
    pub losses: Vec<String>,
}

/// Result of partitioning every roster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Partition {
    /// Per-owner breakdown in roster order.
    pub breakdown: Vec<OwnerBreakdown>,
    /// Every owner's losses concatenated in roster order (untruncated).
    pub pool: Vec<String>,
}

/// Resolve the protected set for one roster.
///
/// Uses the override when present, otherwise the first `max_protect`
/// players in roster order. The result is always truncated to
/// `max_protect` entries.
pub fn resolve_protected(
    roster: &[String],
    protection: Option<&[String]>,
    max_protect: usize,
) -> Vec<String> {
    let source = protection.unwrap_or(roster);
    source.iter().take(max_protect).cloned().collect()
}

/// Select the losses among `candidates` honoring the position caps.
///
/// Losses are emitted group by group in the order positions were first
/// encountered, not in overall roster order.
pub fn owner_losses(
    candidates: &[String],
    players: &PlayerDirectory,
    caps: &PositionCaps,
) -> Vec<String> {
    let mut groups: Vec<(Position, Vec<&String>)> = Vec::new();
    let mut group_index: HashMap<Position, usize> = HashMap::new();

    for id in candidates {
        let pos = players.position(id);
        match group_index.get(&pos) {
            Some(&idx) => groups[idx].1.push(id),
            None => {
                group_index.insert(pos.clone(), groups.len());
                groups.push((pos, vec![id]));
            }
        }
    }

    groups
        .into_iter()
        .flat_map(|(pos, ids)| {
            let take = caps.limit(&pos, ids.len());
            ids.into_iter().take(take).cloned()
        })
        .collect()
}

/// Partition every roster into protected players and pool losses.
///
/// Protection entries that name players outside the owner's roster are
/// tolerated: they only filter candidates, so they occupy a protection slot
/// without protecting anyone.
pub fn partition(
    rosters: &[TeamRoster],
    protections: &HashMap<String, Vec<String>>,
    players: &PlayerDirectory,
    caps: &PositionCaps,
    max_protect: usize,
) -> Partition {
    let mut result = Partition::default();

    for roster in rosters {
        let protected = resolve_protected(
            &roster.players,
            protections.get(&roster.owner_id).map(|p| p.as_slice()),
            max_protect,
        );

        let candidates: Vec<String> = roster
            .players
            .iter()
            .filter(|id| !protected.contains(id))
            .cloned()
            .collect();

        let losses = owner_losses(&candidates, players, caps);
        result.pool.extend(losses.iter().cloned());
        result.breakdown.push(OwnerBreakdown {
            owner_id: roster.owner_id.clone(),
            protected,
            losses,
        });
    }

    result
}

// Prompt templates for protection suggestions and expansion draft
// assignments.
//
// Each prompt lists the players with the metadata the league knows about
// them and asks for a strict JSON answer, so the response can be parsed
// and validated by the core without guessing at prose.

use std::fmt::Write as _;

use expansion_core::suggest::{DraftRequest, ProtectionRequest, RosterEntry};

// ---------------------------------------------------------------------------
// System prompts
// ---------------------------------------------------------------------------

/// System prompt for choosing a team's protected players.
pub fn protection_system_prompt() -> String {
    "You are a fantasy football dynasty league advisor helping an owner prepare for an expansion draft.\n\
     \n\
     Each existing team may protect a fixed number of players. Unprotected players can be lost to the \
     expansion pool, but only up to a per-position cap, so protecting depth at a capped position wastes slots.\n\
     \n\
     Prefer long-term dynasty value: young starters at premium positions, then proven producers.\n\
     \n\
     Respond with ONLY a JSON array of player names copied exactly from the roster, for example:\n\
     [\"Player One\", \"Player Two\"]"
        .to_string()
}

/// System prompt for assigning the draft pool to expansion teams.
pub fn draft_system_prompt() -> String {
    "You are a fantasy football dynasty league commissioner running an expansion draft.\n\
     \n\
     Distribute the available players among the new expansion teams so the teams are as balanced as \
     possible in both current strength and positional needs.\n\
     \n\
     Respond with ONLY a JSON object mapping each team name to an array of player names copied exactly \
     from the pool, for example:\n\
     {\"Expansion Team 1\": [\"Player One\"], \"Expansion Team 2\": [\"Player Two\"]}"
        .to_string()
}

// ---------------------------------------------------------------------------
// User prompts
// ---------------------------------------------------------------------------

/// Build the user prompt for one team's protection suggestion.
pub fn build_protection_prompt(request: &ProtectionRequest) -> String {
    let mut prompt = String::with_capacity(1024);

    let _ = writeln!(prompt, "## TEAM\n{}\n", request.team_label);

    prompt.push_str("## RULES\n");
    let _ = writeln!(
        prompt,
        "Protect exactly {} players.",
        request.max_protect.min(request.roster.len())
    );
    prompt.push_str(&format_caps(&request.position_caps, request.other_cap));
    prompt.push('\n');

    prompt.push_str("## ROSTER\n");
    prompt.push_str(&format_players(&request.roster));

    prompt
}

/// Build the user prompt for a full draft assignment.
pub fn build_draft_prompt(request: &DraftRequest) -> String {
    let mut prompt = String::with_capacity(2048);

    prompt.push_str("## EXPANSION TEAMS\n");
    for label in &request.team_labels {
        let _ = writeln!(prompt, "- {label}");
    }
    prompt.push('\n');

    prompt.push_str("## RULES\n");
    let _ = writeln!(
        prompt,
        "Each team receives at most {} players.",
        request.picks_per_team
    );
    prompt.push_str("Every player in the pool must be assigned to exactly one team.\n");
    let _ = writeln!(
        prompt,
        "The league's default would be a {} draft in pool order.\n",
        request.format.display_str().to_lowercase()
    );

    let _ = writeln!(prompt, "## POOL ({} players)", request.pool.len());
    prompt.push_str(&format_players(&request.pool));

    prompt
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

/// One line per player: `- Name (POS)`, with rank when known.
pub fn format_players(players: &[RosterEntry]) -> String {
    let mut out = String::new();
    for p in players {
        match p.rank {
            Some(rank) => {
                let _ = writeln!(out, "- {} ({}, rank {})", p.name, p.position, rank);
            }
            None => {
                let _ = writeln!(out, "- {} ({})", p.name, p.position);
            }
        }
    }
    out
}

fn format_caps(caps: &[(String, usize)], other: Option<usize>) -> String {
    let mut out = String::new();
    if caps.is_empty() && other.is_none() {
        out.push_str("No positional loss caps.\n");
        return out;
    }
    out.push_str("Maximum players lost per position:");
    for (pos, cap) in caps {
        let _ = write!(out, " {pos} {cap},");
    }
    match other {
        Some(cap) => {
            let _ = writeln!(out, " any other position {cap}");
        }
        None => {
            // Drop the trailing comma.
            out.pop();
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use expansion_core::allocate::DraftFormat;

    fn entry(name: &str, position: &str, rank: Option<u32>) -> RosterEntry {
        RosterEntry {
            name: name.into(),
            position: position.into(),
            rank,
        }
    }

    #[test]
    fn protection_prompt_lists_roster_and_rules() {
        let request = ProtectionRequest {
            owner_id: "u1".into(),
            team_label: "Gridiron Gang".into(),
            roster: vec![
                entry("Bijan Robinson", "RB", Some(3)),
                entry("Puka Nacua", "WR", None),
            ],
            max_protect: 12,
            position_caps: vec![("RB".into(), 2), ("WR".into(), 3)],
            other_cap: Some(5),
        };
        let prompt = build_protection_prompt(&request);
        assert!(prompt.contains("Gridiron Gang"));
        // Capped by roster size.
        assert!(prompt.contains("Protect exactly 2 players."));
        assert!(prompt.contains("RB 2, WR 3, any other position 5"));
        assert!(prompt.contains("- Bijan Robinson (RB, rank 3)"));
        assert!(prompt.contains("- Puka Nacua (WR)"));
    }

    #[test]
    fn caps_without_other_have_no_trailing_comma() {
        assert_eq!(
            format_caps(&[("QB".into(), 1)], None),
            "Maximum players lost per position: QB 1\n"
        );
        assert_eq!(format_caps(&[], None), "No positional loss caps.\n");
    }

    #[test]
    fn draft_prompt_lists_teams_and_pool() {
        let request = DraftRequest {
            team_labels: vec!["Expansion Team 1".into(), "Expansion Team 2".into()],
            picks_per_team: 25,
            format: DraftFormat::Snake,
            pool: vec![entry("Tank Dell", "WR", None)],
        };
        let prompt = build_draft_prompt(&request);
        assert!(prompt.contains("- Expansion Team 1\n- Expansion Team 2\n"));
        assert!(prompt.contains("at most 25 players"));
        assert!(prompt.contains("snake draft"));
        assert!(prompt.contains("## POOL (1 players)"));
        assert!(prompt.contains("- Tank Dell (WR)"));
    }

    #[test]
    fn system_prompts_demand_json() {
        assert!(protection_system_prompt().contains("JSON array"));
        assert!(draft_system_prompt().contains("JSON object"));
    }
}

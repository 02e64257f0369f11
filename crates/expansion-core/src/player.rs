// Player metadata: positions, per-player info, and the lookup directory.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Football positions used for loss grouping and caps.
///
/// The common skill positions get dedicated variants. Any other label the
/// data source reports (IDP positions, "FB", "OL", ...) is kept verbatim in
/// `Other` so each label still forms its own group. `Unknown` is the
/// placeholder for players with no position metadata at all.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Position {
    Quarterback,
    RunningBack,
    WideReceiver,
    TightEnd,
    Kicker,
    Defense,
    Other(String),
    Unknown,
}

impl Position {
    /// Parse a position label.
    ///
    /// Never fails: blank strings and "UNK" map to `Unknown`, unrecognized
    /// labels map to `Other` (uppercased, trimmed).
    pub fn from_str_pos(s: &str) -> Self {
        let upper = s.trim().to_uppercase();
        match upper.as_str() {
            "QB" => Position::Quarterback,
            "RB" => Position::RunningBack,
            "WR" => Position::WideReceiver,
            "TE" => Position::TightEnd,
            "K" | "PK" => Position::Kicker,
            "DEF" | "DST" | "D/ST" => Position::Defense,
            "" | "UNK" => Position::Unknown,
            _ => Position::Other(upper),
        }
    }

    /// Return the display string for this position.
    pub fn display_str(&self) -> &str {
        match self {
            Position::Quarterback => "QB",
            Position::RunningBack => "RB",
            Position::WideReceiver => "WR",
            Position::TightEnd => "TE",
            Position::Kicker => "K",
            Position::Defense => "DEF",
            Position::Other(label) => label.as_str(),
            Position::Unknown => "UNK",
        }
    }

    /// Whether this is one of the four offensive skill positions.
    pub fn is_skill(&self) -> bool {
        matches!(
            self,
            Position::Quarterback
                | Position::RunningBack
                | Position::WideReceiver
                | Position::TightEnd
        )
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

/// Static metadata for one player, as supplied by the data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub id: String,
    pub name: String,
    /// Raw position label from the data source (e.g. "WR", "LB").
    pub position: String,
    /// NFL team abbreviation, if the player is on a team.
    #[serde(default)]
    pub nfl_team: Option<String>,
    /// Overall search/ADP-style rank. Lower is better.
    #[serde(default)]
    pub rank: Option<u32>,
}

impl PlayerInfo {
    pub fn new(id: impl Into<String>, name: impl Into<String>, position: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            position: position.into(),
            nfl_team: None,
            rank: None,
        }
    }

    /// Parsed position category.
    pub fn position(&self) -> Position {
        Position::from_str_pos(&self.position)
    }
}

/// Lookup table from player id to metadata.
///
/// All lookups tolerate ids the directory has never seen: names fall back
/// to the raw id and positions fall back to `Position::Unknown`.
#[derive(Debug, Clone, Default)]
pub struct PlayerDirectory {
    players: HashMap<String, PlayerInfo>,
}

impl PlayerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) a player's metadata.
    pub fn insert(&mut self, info: PlayerInfo) {
        self.players.insert(info.id.clone(), info);
    }

    pub fn get(&self, id: &str) -> Option<&PlayerInfo> {
        self.players.get(id)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Display name for `id`, or the id itself when unknown.
    pub fn display_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.players.get(id).map(|p| p.name.as_str()).unwrap_or(id)
    }

    /// Position category for `id`, or `Position::Unknown` when unknown.
    pub fn position(&self, id: &str) -> Position {
        self.players
            .get(id)
            .map(|p| p.position())
            .unwrap_or(Position::Unknown)
    }

    pub fn rank(&self, id: &str) -> Option<u32> {
        self.players.get(id).and_then(|p| p.rank)
    }

    /// Map a list of ids to display names.
    pub fn display_names(&self, ids: &[String]) -> Vec<String> {
        ids.iter()
            .map(|id| self.display_name(id).to_string())
            .collect()
    }

    /// Resolve a free-form player name to one of the `candidates` ids.
    ///
    /// Tries an exact name match first, then a normalized match (case,
    /// punctuation and repeated whitespace ignored). Only ids in
    /// `candidates` are considered, so duplicate names elsewhere in the
    /// directory cannot shadow the intended player. Ids for which `used`
    /// returns true are passed over while another id with the same name
    /// remains; once every match is used the first one is returned.
    pub fn resolve_name<'a>(
        &self,
        name: &str,
        candidates: &'a [String],
        used: impl Fn(&str) -> bool,
    ) -> Option<&'a str> {
        let wanted = name.trim();
        if wanted.is_empty() {
            return None;
        }
        let normalized = normalize_name(wanted);
        let exact: Vec<&'a str> = candidates
            .iter()
            .filter(|id| self.display_name(id) == wanted)
            .map(|id| id.as_str())
            .collect();
        let loose: Vec<&'a str> = candidates
            .iter()
            .filter(|id| normalize_name(self.display_name(id)) == normalized)
            .map(|id| id.as_str())
            .collect();

        exact
            .iter()
            .chain(loose.iter())
            .find(|id| !used(id))
            .or_else(|| exact.first())
            .or_else(|| loose.first())
            .copied()
    }
}

impl FromIterator<PlayerInfo> for PlayerDirectory {
    fn from_iter<I: IntoIterator<Item = PlayerInfo>>(iter: I) -> Self {
        let mut dir = PlayerDirectory::new();
        for info in iter {
            dir.insert(info);
        }
        dir
    }
}

/// Lowercase, drop punctuation, collapse whitespace.
pub fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_directory() -> PlayerDirectory {
        [
            PlayerInfo::new("4046", "Patrick Mahomes", "QB"),
            PlayerInfo::new("6794", "Justin Jefferson", "WR"),
            PlayerInfo::new("4034", "Christian McCaffrey", "RB"),
            PlayerInfo::new("5850", "Josh Jacobs", "RB"),
            PlayerInfo::new("9999", "Odell Beckham Jr.", "WR"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn from_str_pos_skill_positions() {
        assert_eq!(Position::from_str_pos("QB"), Position::Quarterback);
        assert_eq!(Position::from_str_pos("RB"), Position::RunningBack);
        assert_eq!(Position::from_str_pos("WR"), Position::WideReceiver);
        assert_eq!(Position::from_str_pos("TE"), Position::TightEnd);
    }

    #[test]
    fn from_str_pos_case_insensitive_and_trimmed() {
        assert_eq!(Position::from_str_pos(" wr "), Position::WideReceiver);
        assert_eq!(Position::from_str_pos("def"), Position::Defense);
        assert_eq!(Position::from_str_pos("k"), Position::Kicker);
    }

    #[test]
    fn from_str_pos_unknown_and_other() {
        assert_eq!(Position::from_str_pos(""), Position::Unknown);
        assert_eq!(Position::from_str_pos("UNK"), Position::Unknown);
        assert_eq!(Position::from_str_pos("lb"), Position::Other("LB".into()));
        assert_eq!(Position::from_str_pos("FB"), Position::Other("FB".into()));
    }

    #[test]
    fn display_str_matches_source_labels() {
        for label in ["QB", "RB", "WR", "TE", "K", "DEF", "LB", "UNK"] {
            assert_eq!(Position::from_str_pos(label).display_str(), label);
        }
    }

    #[test]
    fn is_skill_only_for_offensive_skill_positions() {
        assert!(Position::Quarterback.is_skill());
        assert!(Position::TightEnd.is_skill());
        assert!(!Position::Kicker.is_skill());
        assert!(!Position::Unknown.is_skill());
        assert!(!Position::Other("DL".into()).is_skill());
    }

    #[test]
    fn missing_metadata_uses_placeholders() {
        let dir = sample_directory();
        assert_eq!(dir.display_name("nope"), "nope");
        assert_eq!(dir.position("nope"), Position::Unknown);
        assert_eq!(dir.rank("nope"), None);
        assert_eq!(dir.display_name("4046"), "Patrick Mahomes");
        assert_eq!(dir.position("4046"), Position::Quarterback);
    }

    #[test]
    fn resolve_name_exact_and_normalized() {
        let dir = sample_directory();
        let roster: Vec<String> = vec!["4046".into(), "6794".into(), "9999".into()];
        assert_eq!(dir.resolve_name("Justin Jefferson", &roster, |_| false), Some("6794"));
        assert_eq!(dir.resolve_name("  patrick  MAHOMES ", &roster, |_| false), Some("4046"));
        assert_eq!(dir.resolve_name("Odell Beckham Jr", &roster, |_| false), Some("9999"));
    }

    #[test]
    fn resolve_name_is_scoped_to_candidates() {
        let dir = sample_directory();
        let roster: Vec<String> = vec!["4046".into()];
        assert_eq!(dir.resolve_name("Josh Jacobs", &roster, |_| false), None);
        assert_eq!(dir.resolve_name("", &roster, |_| false), None);
    }

    #[test]
    fn resolve_name_passes_over_used_ids() {
        let dir: PlayerDirectory = [
            PlayerInfo::new("qb8", "Lamar Jackson", "QB"),
            PlayerInfo::new("cb1", "Lamar Jackson", "CB"),
        ]
        .into_iter()
        .collect();
        let pool: Vec<String> = vec!["qb8".into(), "cb1".into()];
        assert_eq!(dir.resolve_name("Lamar Jackson", &pool, |_| false), Some("qb8"));
        assert_eq!(dir.resolve_name("Lamar Jackson", &pool, |id| id == "qb8"), Some("cb1"));
        assert_eq!(dir.resolve_name("lamar jackson", &pool, |id| id == "qb8"), Some("cb1"));
        assert_eq!(dir.resolve_name("Lamar Jackson", &pool, |_| true), Some("qb8"));
    }

    #[test]
    fn normalize_name_strips_punctuation() {
        assert_eq!(normalize_name("D'Andre  Swift"), "dandre swift");
        assert_eq!(normalize_name("A.J. Brown"), "aj brown");
    }
}

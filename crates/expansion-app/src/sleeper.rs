// Sleeper API client: league rosters, owners and the NFL player directory.
//
// The raw response shapes are kept private to this module; everything the
// rest of the program sees is a `LeagueSnapshot`.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info};

use expansion_core::player::{PlayerDirectory, PlayerInfo};
use expansion_core::roster::{LeagueSnapshot, TeamRoster};

use crate::source::{LeagueSource, SourceError};

// ---------------------------------------------------------------------------
// Raw response shapes
// ---------------------------------------------------------------------------

/// One entry of `GET /league/{id}/rosters`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRoster {
    pub roster_id: u64,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub players: Option<Vec<String>>,
}

/// One entry of `GET /league/{id}/users`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawUser {
    pub user_id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub metadata: Option<RawUserMetadata>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawUserMetadata {
    #[serde(default)]
    pub team_name: Option<String>,
}

/// One value of the `GET /players/nfl` map.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPlayer {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub search_rank: Option<u32>,
}

impl RawPlayer {
    /// Full name, else "first last", else `None`.
    fn display_name(&self) -> Option<String> {
        if let Some(full) = self.full_name.as_deref().map(str::trim) {
            if !full.is_empty() {
                return Some(full.to_string());
            }
        }
        let joined = format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or("")
        );
        let joined = joined.trim();
        (!joined.is_empty()).then(|| joined.to_string())
    }
}

// ---------------------------------------------------------------------------
// Conversion
// ---------------------------------------------------------------------------

/// Assemble a snapshot from raw Sleeper responses.
///
/// Only rostered players are copied into the directory. Rosters without an
/// owner are keyed `roster-{roster_id}` so they still take part.
pub fn build_snapshot(
    league_id: &str,
    rosters: Vec<RawRoster>,
    users: Vec<RawUser>,
    players: &HashMap<String, RawPlayer>,
) -> LeagueSnapshot {
    let team_rosters: Vec<TeamRoster> = rosters
        .into_iter()
        .map(|raw| {
            let owner_id = raw
                .owner_id
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| format!("roster-{}", raw.roster_id));
            TeamRoster::new(owner_id, raw.players.unwrap_or_default())
        })
        .collect();

    let mut seen = HashSet::new();
    let mut directory = PlayerDirectory::new();
    for id in team_rosters.iter().flat_map(|r| r.players.iter()) {
        if !seen.insert(id.as_str()) {
            continue;
        }
        let Some(raw) = players.get(id) else {
            debug!(player_id = %id, "rostered player missing from directory");
            continue;
        };
        let name = raw.display_name().unwrap_or_else(|| id.clone());
        let mut info = PlayerInfo::new(id.clone(), name, raw.position.clone().unwrap_or_default());
        info.nfl_team = raw.team.clone();
        info.rank = raw.search_rank;
        directory.insert(info);
    }

    let team_names = users
        .into_iter()
        .filter_map(|user| {
            let label = user
                .metadata
                .and_then(|m| m.team_name)
                .filter(|n| !n.trim().is_empty())
                .or(user.display_name.filter(|n| !n.trim().is_empty()))?;
            Some((user.user_id, label))
        })
        .collect();

    LeagueSnapshot {
        league_id: league_id.to_string(),
        rosters: team_rosters,
        team_names,
        players: directory,
    }
}

// ---------------------------------------------------------------------------
// SleeperClient
// ---------------------------------------------------------------------------

/// HTTP client for the public Sleeper API.
pub struct SleeperClient {
    http: reqwest::Client,
    base_url: String,
}

impl SleeperClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| SourceError::Http {
                url: base_url.to_string(),
                source,
            })?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, SourceError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "GET");
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| SourceError::Http {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status { url, status });
        }

        response
            .json::<T>()
            .await
            .map_err(|source| SourceError::Decode { url, source })
    }
}

#[async_trait]
impl LeagueSource for SleeperClient {
    async fn load_league(&self, league_id: &str) -> Result<LeagueSnapshot, SourceError> {
        let rosters_path = format!("/league/{league_id}/rosters");
        let users_path = format!("/league/{league_id}/users");

        // Unknown leagues answer `null` rather than 404.
        let (rosters, users, players) = tokio::try_join!(
            self.get_json::<Option<Vec<RawRoster>>>(&rosters_path),
            self.get_json::<Option<Vec<RawUser>>>(&users_path),
            self.get_json::<HashMap<String, RawPlayer>>("/players/nfl"),
        )?;

        let Some(rosters) = rosters else {
            return Err(SourceError::LeagueNotFound {
                league_id: league_id.to_string(),
            });
        };

        let snapshot = build_snapshot(league_id, rosters, users.unwrap_or_default(), &players);
        info!(
            league_id,
            rosters = snapshot.rosters.len(),
            players = snapshot.rostered_count(),
            "league loaded from Sleeper"
        );
        Ok(snapshot)
    }
}

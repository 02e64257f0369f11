// League data source boundary.

use async_trait::async_trait;
use thiserror::Error;

use expansion_core::roster::LeagueSnapshot;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request to {url} failed: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("{url} returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to decode response from {url}: {source}")]
    Decode { url: String, source: reqwest::Error },

    #[error("league {league_id} not found")]
    LeagueNotFound { league_id: String },
}

/// Anything that can produce a league snapshot by id.
#[async_trait]
pub trait LeagueSource: Send + Sync {
    async fn load_league(&self, league_id: &str) -> Result<LeagueSnapshot, SourceError>;
}

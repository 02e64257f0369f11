// Time-limited memoization of league snapshots.
//
// The simulation itself never assumes caching; this wrapper only saves
// repeated fetches of the same league within one process.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;
use tracing::debug;

use expansion_core::roster::LeagueSnapshot;

use crate::source::{LeagueSource, SourceError};

struct CacheEntry {
    snapshot: LeagueSnapshot,
    fetched_at: DateTime<Utc>,
}

/// Wraps a `LeagueSource` and reuses snapshots younger than `ttl`.
pub struct CachedSource<S> {
    inner: S,
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl<S: LeagueSource> CachedSource<S> {
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Build with a TTL in whole seconds. Zero disables reuse.
    pub fn with_ttl_secs(inner: S, secs: u64) -> Self {
        let secs = i64::try_from(secs).unwrap_or(i64::MAX);
        Self::new(inner, Duration::try_seconds(secs).unwrap_or(Duration::MAX))
    }

    /// Drop the cached snapshot for one league.
    pub async fn invalidate(&self, league_id: &str) {
        self.entries.lock().await.remove(league_id);
    }

    /// Drop every cached snapshot.
    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }

    pub async fn cached_leagues(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// Load relative to an explicit clock reading.
    pub async fn load_at(
        &self,
        league_id: &str,
        now: DateTime<Utc>,
    ) -> Result<LeagueSnapshot, SourceError> {
        {
            let entries = self.entries.lock().await;
            if let Some(entry) = entries.get(league_id) {
                if now.signed_duration_since(entry.fetched_at) < self.ttl {
                    debug!(league_id, "league cache hit");
                    return Ok(entry.snapshot.clone());
                }
            }
        }

        debug!(league_id, "league cache miss");
        let snapshot = self.inner.load_league(league_id).await?;
        self.entries.lock().await.insert(
            league_id.to_string(),
            CacheEntry {
                snapshot: snapshot.clone(),
                fetched_at: now,
            },
        );
        Ok(snapshot)
    }
}

#[async_trait]
impl<S: LeagueSource> LeagueSource for CachedSource<S> {
    async fn load_league(&self, league_id: &str) -> Result<LeagueSnapshot, SourceError> {
        self.load_at(league_id, Utc::now()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl LeagueSource for CountingSource {
        async fn load_league(&self, league_id: &str) -> Result<LeagueSnapshot, SourceError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if league_id == "missing" {
                return Err(SourceError::LeagueNotFound {
                    league_id: league_id.to_string(),
                });
            }
            Ok(LeagueSnapshot {
                league_id: format!("{league_id}#{n}"),
                ..LeagueSnapshot::default()
            })
        }
    }

    fn cached(ttl_secs: u64) -> CachedSource<CountingSource> {
        CachedSource::with_ttl_secs(
            CountingSource {
                calls: AtomicUsize::new(0),
            },
            ttl_secs,
        )
    }

    fn calls(source: &CachedSource<CountingSource>) -> usize {
        source.inner.calls.load(Ordering::SeqCst)
    }

    #[tokio::test]
    async fn reuses_fresh_snapshot() {
        let source = cached(60);
        let t0 = Utc::now();
        let first = source.load_at("L1", t0).await.unwrap();
        let second = source
            .load_at("L1", t0 + Duration::seconds(59))
            .await
            .unwrap();
        assert_eq!(first.league_id, "L1#0");
        assert_eq!(second.league_id, "L1#0");
        assert_eq!(calls(&source), 1);
    }

    #[tokio::test]
    async fn refetches_after_ttl() {
        let source = cached(60);
        let t0 = Utc::now();
        source.load_at("L1", t0).await.unwrap();
        let later = source
            .load_at("L1", t0 + Duration::seconds(60))
            .await
            .unwrap();
        assert_eq!(later.league_id, "L1#1");
        assert_eq!(calls(&source), 2);
    }

    #[tokio::test]
    async fn keys_by_league_id() {
        let source = cached(60);
        let t0 = Utc::now();
        source.load_at("L1", t0).await.unwrap();
        source.load_at("L2", t0).await.unwrap();
        assert_eq!(source.cached_leagues().await, 2);
        assert_eq!(calls(&source), 2);
    }

    #[tokio::test]
    async fn invalidate_and_clear_force_refetch() {
        let source = cached(600);
        let t0 = Utc::now();
        source.load_at("L1", t0).await.unwrap();
        source.load_at("L2", t0).await.unwrap();

        source.invalidate("L1").await;
        assert_eq!(source.load_at("L1", t0).await.unwrap().league_id, "L1#2");
        assert_eq!(source.load_at("L2", t0).await.unwrap().league_id, "L2#1");

        source.clear().await;
        assert_eq!(source.cached_leagues().await, 0);
        assert_eq!(source.load_at("L2", t0).await.unwrap().league_id, "L2#3");
    }

    #[tokio::test]
    async fn zero_ttl_never_reuses() {
        let source = cached(0);
        let t0 = Utc::now();
        source.load_at("L1", t0).await.unwrap();
        source.load_at("L1", t0).await.unwrap();
        assert_eq!(calls(&source), 2);
    }

    #[tokio::test]
    async fn errors_are_not_cached() {
        let source = cached(60);
        assert!(source.load_league("missing").await.is_err());
        assert_eq!(source.cached_leagues().await, 0);
        assert!(source.load_league("missing").await.is_err());
        assert_eq!(calls(&source), 2);
    }
}

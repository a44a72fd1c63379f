use futures::future::join_all;
use tracing::{debug, instrument, warn};

use crate::config::AggregationConfig;
use crate::error::Result;
use crate::model::{Aggregation, MatchRecord, MatchSummary};
use crate::stats::{self, IdentityResolver, MatchLoader, NumberNameResolver};

/// The main entry point for computing team statistics.
///
/// `StatsClient` wraps a [`MatchLoader`] and exposes methods to list a
/// team's matches and aggregate per-player statistics over them.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> handball_stats::Result<()> {
/// use handball_stats::{AggregationConfig, MemoryLoader, RatingWeights, StatsClient};
///
/// let client = StatsClient::new(MemoryLoader::new());
/// let config = AggregationConfig::new("HC Nord", RatingWeights::standard());
/// let stats = client.team_stats(Some("team-1"), &config).await?;
/// println!("{} players over {} matches", stats.rows.len(), stats.included_matches.len());
/// # Ok(())
/// # }
/// ```
pub struct StatsClient<L, R = NumberNameResolver> {
    loader: L,
    resolver: R,
}

impl<L: MatchLoader> StatsClient<L> {
    /// Create a client keying players by number and name.
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            resolver: NumberNameResolver,
        }
    }
}

impl<L, R> StatsClient<L, R>
where
    L: MatchLoader,
    R: IdentityResolver,
{
    /// Create a client using the provided identity resolver.
    pub fn with_resolver(loader: L, resolver: R) -> Self {
        Self { loader, resolver }
    }

    /// List the matches of a team, or every visible match without `team_id`.
    #[instrument(skip(self))]
    pub async fn list_matches(&self, team_id: Option<&str>) -> Result<Vec<MatchSummary>> {
        let summaries = self.loader.list_match_summaries(team_id).await?;
        debug!(count = summaries.len(), "listed matches");
        Ok(summaries)
    }

    /// Aggregate statistics over every match of a team.
    #[instrument(skip(self, config), fields(team = %config.team_name))]
    pub async fn team_stats(
        &self,
        team_id: Option<&str>,
        config: &AggregationConfig,
    ) -> Result<Aggregation> {
        config.weights.validate()?;
        let summaries = self.list_matches(team_id).await?;
        self.aggregate(&summaries, config).await
    }

    /// Aggregate statistics over a chosen subset of matches.
    ///
    /// All records are fetched concurrently, then folded one by one in the
    /// configured fold order.
    #[instrument(skip_all, fields(team = %config.team_name, matches = summaries.len()))]
    pub async fn aggregate(
        &self,
        summaries: &[MatchSummary],
        config: &AggregationConfig,
    ) -> Result<Aggregation> {
        config.weights.validate()?;
        let ordered = stats::fold_order(summaries, config.fold_order);
        let records = join_all(ordered.iter().map(|s| self.load(&s.id))).await;
        stats::fold_loaded(ordered.into_iter().zip(records), config, &self.resolver)
    }

    async fn load(&self, id: &str) -> Option<MatchRecord> {
        match self.loader.load_match(id).await {
            Ok(record) => record,
            Err(e) => {
                warn!(id, error = %e, "failed to load match");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RatingWeights;
    use crate::error::StatsError;
    use crate::model::{
        EventKind, MatchEvent, MatchMetadata, Player, PlayerKey, Position, ShotOutcome,
    };
    use crate::stats::MemoryLoader;

    fn record(id: &str, date: &str, owner: &str, scorer: &str) -> MatchRecord {
        MatchRecord {
            id: id.to_string(),
            metadata: MatchMetadata {
                home_team: "HC Nord".to_string(),
                away_team: "TV Ost".to_string(),
                date: date.to_string(),
                location: None,
                our_side: None,
                owner_team_id: Some(owner.to_string()),
            },
            home_score: 25,
            away_score: 25,
            players: vec![Player {
                id: "p".to_string(),
                name: scorer.to_string(),
                number: 10,
                position: Position::CenterBack,
                playing_time: 600,
            }],
            events: vec![MatchEvent {
                is_opponent: false,
                player_id: Some("p".to_string()),
                timestamp: Some(90),
                kind: EventKind::Shot {
                    outcome: Some(ShotOutcome::Goal),
                    zone: None,
                },
            }],
        }
    }

    fn config() -> AggregationConfig {
        AggregationConfig::new("HC Nord", RatingWeights::standard())
    }

    #[tokio::test]
    async fn test_team_stats_only_uses_team_matches() {
        let loader = MemoryLoader::from_records([
            record("a", "2024-01-06", "team-1", "Ole"),
            record("b", "2024-01-13", "team-2", "Ole"),
            record("c", "2024-01-20", "team-1", "Ole"),
        ]);
        let client = StatsClient::new(loader);

        let stats = client.team_stats(Some("team-1"), &config()).await.unwrap();
        assert_eq!(stats.included_matches.len(), 2);
        assert_eq!(stats.record.draws, 2);
        let ole = stats.row("10-ole").unwrap();
        assert_eq!(ole.goals, 2);
        assert_eq!(ole.matches_played, 2);
    }

    #[tokio::test]
    async fn test_unloadable_match_is_skipped() {
        let mut loader = MemoryLoader::from_records([
            record("a", "2024-01-06", "team-1", "Ole"),
            record("c", "2024-01-20", "team-1", "Ole"),
        ]);
        let mut ghost = record("b", "2024-01-13", "team-1", "Ghost").summary();
        ghost.home_score = 40;
        loader.insert_summary(ghost);
        let client = StatsClient::new(loader);

        let stats = client.team_stats(None, &config()).await.unwrap();
        assert_eq!(stats.included_matches.len(), 2);
        assert_eq!(stats.record.played(), 2);
        assert_eq!(stats.record.wins, 0);
        assert!(stats.row("10-ghost").is_none());
    }

    #[tokio::test]
    async fn test_fold_order_is_chronological() {
        let loader = MemoryLoader::from_records([
            record("late", "2024-03-01", "team-1", "Ole Berg"),
            record("early", "2023-10-01", "team-1", "Ole"),
        ]);
        let client = StatsClient::new(loader);
        let summaries = client.list_matches(None).await.unwrap();

        let stats = client.aggregate(&summaries, &config()).await.unwrap();
        let ids: Vec<_> = stats.included_matches.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["early", "late"]);
    }

    #[tokio::test]
    async fn test_missing_weights_fail_loudly() {
        let client = StatsClient::new(MemoryLoader::from_records([record(
            "a",
            "2024-01-06",
            "team-1",
            "Ole",
        )]));
        let config = AggregationConfig::new("HC Nord", RatingWeights::default());
        assert!(matches!(
            client.team_stats(None, &config).await,
            Err(StatsError::MissingWeight { .. })
        ));
    }

    struct ByName;

    impl IdentityResolver for ByName {
        fn resolve(&self, player: &Player) -> PlayerKey {
            PlayerKey(player.name.to_lowercase())
        }
    }

    #[tokio::test]
    async fn test_custom_resolver() {
        let client = StatsClient::with_resolver(
            MemoryLoader::from_records([record("a", "2024-01-06", "team-1", "Ole")]),
            ByName,
        );
        let stats = client.team_stats(None, &config()).await.unwrap();
        assert!(stats.row("ole").is_some());
    }

    struct FailingLoader {
        inner: MemoryLoader,
        broken_id: &'static str,
        listing_fails: bool,
    }

    impl MatchLoader for FailingLoader {
        async fn list_match_summaries(&self, team_id: Option<&str>) -> Result<Vec<MatchSummary>> {
            if self.listing_fails {
                return Err(StatsError::loader("index unavailable"));
            }
            self.inner.list_match_summaries(team_id).await
        }

        async fn load_match(&self, id: &str) -> Result<Option<MatchRecord>> {
            if id == self.broken_id {
                return Err(StatsError::loader(format!("corrupt record {id}")));
            }
            self.inner.load_match(id).await
        }
    }

    fn failing_loader(listing_fails: bool) -> FailingLoader {
        FailingLoader {
            inner: MemoryLoader::from_records([
                record("a", "2024-01-06", "team-1", "Ole"),
                record("b", "2024-01-13", "team-1", "Ole"),
                record("c", "2024-01-20", "team-1", "Ole"),
            ]),
            broken_id: "b",
            listing_fails,
        }
    }

    #[tokio::test]
    async fn test_match_load_error_is_skipped() {
        let client = StatsClient::new(failing_loader(false));

        let stats = client.team_stats(Some("team-1"), &config()).await.unwrap();
        let ids: Vec<_> = stats.included_matches.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["a", "c"]);
        assert_eq!(stats.record.played(), 2);
        assert_eq!(stats.row("10-ole").unwrap().goals, 2);
    }

    #[tokio::test]
    async fn test_listing_error_is_returned() {
        let client = StatsClient::new(failing_loader(true));

        let err = client.team_stats(None, &config()).await.unwrap_err();
        assert!(matches!(err, StatsError::Loader(_)));
        assert_eq!(err.to_string(), "match loader failed: index unavailable");
    }
}

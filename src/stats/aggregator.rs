use std::collections::{BTreeMap, HashMap, HashSet};

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::config::{AggregationConfig, FoldOrder};
use crate::error::Result;
use crate::model::{
    Aggregation, EventKind, MatchEvent, MatchRecord, MatchSummary, Player, PlayerAggregate,
    PlayerKey, PositiveActionType, ShotOutcome, TeamRecord,
};
use crate::stats::identity::{IdentityResolver, NumberNameResolver};
use crate::stats::rating;

/// Aggregate player statistics over `summaries`, keying players with
/// [`NumberNameResolver`].
///
/// `load_match` returns `None` for a match that cannot be loaded; such
/// matches are skipped entirely.
pub fn aggregate<F>(
    summaries: &[MatchSummary],
    load_match: F,
    config: &AggregationConfig,
) -> Result<Aggregation>
where
    F: FnMut(&str) -> Option<MatchRecord>,
{
    aggregate_with(summaries, load_match, config, &NumberNameResolver)
}

/// Like [`aggregate`], with a custom identity resolver.
#[instrument(skip_all, fields(team = %config.team_name, matches = summaries.len()))]
pub fn aggregate_with<F, R>(
    summaries: &[MatchSummary],
    mut load_match: F,
    config: &AggregationConfig,
    resolver: &R,
) -> Result<Aggregation>
where
    F: FnMut(&str) -> Option<MatchRecord>,
    R: IdentityResolver + ?Sized,
{
    let loaded = fold_order(summaries, config.fold_order)
        .into_iter()
        .map(|summary| {
            let record = load_match(summary.id.as_str());
            (summary, record)
        });
    fold_loaded(loaded, config, resolver)
}

/// Arrange summaries in the order they must be folded.
pub(crate) fn fold_order(summaries: &[MatchSummary], order: FoldOrder) -> Vec<&MatchSummary> {
    match order {
        FoldOrder::LoadOrder => summaries.iter().collect(),
        FoldOrder::Chronological => summaries
            .iter()
            .sorted_by_key(|s| s.played_at())
            .collect(),
    }
}

/// Fold already loaded matches in iteration order. The weight table is
/// checked before the first item is pulled from `loaded`.
pub(crate) fn fold_loaded<'s, I, R>(
    loaded: I,
    config: &AggregationConfig,
    resolver: &R,
) -> Result<Aggregation>
where
    I: IntoIterator<Item = (&'s MatchSummary, Option<MatchRecord>)>,
    R: IdentityResolver + ?Sized,
{
    config.weights.validate()?;
    let mut aggregator = Aggregator::new(resolver, &config.team_name);
    for (summary, record) in loaded {
        match record {
            Some(record) => aggregator.fold_match(summary, &record),
            None => debug!(id = %summary.id, "match could not be loaded, skipping"),
        }
    }
    aggregator.finish(config)
}

/// Why an event did not change any counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
enum Skip {
    /// Opponent event other than a shot on our goal, or a shot on our goal
    /// not flagged as an opponent event.
    Unattributed,
    NoPlayer,
    UnknownPlayer,
    /// Required sub-type missing.
    Malformed,
    /// Sub-type or outcome that maps to no counter.
    Unrouted,
    UncountedKind,
}

/// Accumulator owned by a single aggregation pass.
struct Aggregator<'a, R: ?Sized> {
    resolver: &'a R,
    team_name: &'a str,
    rows: Vec<PlayerAggregate>,
    index: HashMap<PlayerKey, usize>,
    included: Vec<MatchSummary>,
    record: TeamRecord,
}

impl<'a, R> Aggregator<'a, R>
where
    R: IdentityResolver + ?Sized,
{
    fn new(resolver: &'a R, team_name: &'a str) -> Self {
        Self {
            resolver,
            team_name,
            rows: Vec::new(),
            index: HashMap::new(),
            included: Vec::new(),
            record: TeamRecord::default(),
        }
    }

    fn fold_match(&mut self, summary: &MatchSummary, record: &MatchRecord) {
        self.record.record(record.outcome(self.team_name));

        let mut seen = HashSet::new();
        let roster: HashMap<&str, usize> = record
            .players
            .iter()
            .map(|player| {
                let row = self.enter(player, &mut seen);
                (player.id.as_str(), row)
            })
            .collect();

        let mut skipped: BTreeMap<&'static str, u32> = BTreeMap::new();
        for event in &record.events {
            if let Err(skip) = self.apply(event, &roster) {
                *skipped.entry(skip.into()).or_default() += 1;
            }
        }

        self.included.push(summary.clone());
        debug!(
            id = %record.id,
            players = roster.len(),
            events = record.events.len(),
            ?skipped,
            "folded match"
        );
    }

    /// Resolve a roster entry to its row, creating it on first encounter.
    fn enter(&mut self, player: &Player, seen: &mut HashSet<usize>) -> usize {
        let key = self.resolver.resolve(player);
        let idx = match self.index.get(&key) {
            Some(&idx) => idx,
            None => {
                let idx = self.rows.len();
                self.rows.push(PlayerAggregate::new(
                    key.clone(),
                    player.name.clone(),
                    player.number,
                    player.position,
                ));
                self.index.insert(key, idx);
                idx
            }
        };

        let row = &mut self.rows[idx];
        // A key listed twice on one roster still played one match.
        if seen.insert(idx) {
            row.matches_played += 1;
        }
        row.playing_time += u64::from(player.playing_time);
        row.name.clone_from(&player.name);
        row.number = player.number;
        row.position = player.position;
        idx
    }

    fn apply(
        &mut self,
        event: &MatchEvent,
        roster: &HashMap<&str, usize>,
    ) -> std::result::Result<(), Skip> {
        let against_us = matches!(event.kind, EventKind::OpponentShot { .. });
        if event.is_opponent != against_us {
            return Err(Skip::Unattributed);
        }
        let player_id = event.player_id.as_deref().ok_or(Skip::NoPlayer)?;
        let &idx = roster.get(player_id).ok_or(Skip::UnknownPlayer)?;
        let row = &mut self.rows[idx];

        match event.kind {
            EventKind::Shot { outcome, zone } => {
                let goal = outcome.ok_or(Skip::Malformed)? == ShotOutcome::Goal;
                row.total_shots += 1;
                if goal {
                    row.goals += 1;
                }
                if let Some(bucket) = zone.and_then(|z| z.bucket()) {
                    row.zones.get_mut(bucket).record(goal);
                }
            }
            EventKind::OpponentShot { outcome } => match outcome.ok_or(Skip::Malformed)? {
                ShotOutcome::Save => row.saves += 1,
                ShotOutcome::Goal => row.goals_conceded += 1,
                ShotOutcome::Miss
                | ShotOutcome::Post
                | ShotOutcome::Blocked
                | ShotOutcome::Other => return Err(Skip::Unrouted),
            },
            EventKind::Turnover { turnover_type } => {
                row.turnovers.record(turnover_type.ok_or(Skip::Malformed)?);
            }
            EventKind::PositiveAction { action_type } => {
                match action_type.ok_or(Skip::Malformed)? {
                    PositiveActionType::Assist => row.assists += 1,
                    PositiveActionType::Steal => row.steals += 1,
                    PositiveActionType::Block => row.blocks += 1,
                    PositiveActionType::Earned7m => row.earned_penalties += 1,
                    PositiveActionType::GoodDefense => row.good_defense += 1,
                    PositiveActionType::Other => return Err(Skip::Unrouted),
                }
            }
            EventKind::Sanction { sanction_type } => {
                if !row.sanctions.record(sanction_type.ok_or(Skip::Malformed)?) {
                    return Err(Skip::Unrouted);
                }
            }
            EventKind::Other => return Err(Skip::UncountedKind),
        }
        Ok(())
    }

    fn finish(mut self, config: &AggregationConfig) -> Result<Aggregation> {
        for row in &mut self.rows {
            row.total_rating = rating::rate(row, &config.weights)?;
        }
        // Stable: equal numbers keep creation order.
        self.rows.sort_by_key(|r| r.number);

        debug!(
            players = self.rows.len(),
            matches = self.included.len(),
            wins = self.record.wins,
            draws = self.record.draws,
            losses = self.record.losses,
            "aggregation complete"
        );
        Ok(Aggregation {
            rows: self.rows,
            included_matches: self.included,
            record: self.record,
        })
    }
}

use std::collections::HashMap;
use std::future::Future;

use tracing::debug;

use crate::error::{Result, StatsError};
use crate::model::{MatchRecord, MatchSummary};

/// Source of recorded matches.
///
/// `load_match` returns `Ok(None)` for an unknown id. An `Err` from it is
/// treated the same way by the aggregation: the match is skipped.
pub trait MatchLoader {
    /// List match summaries, restricted to `team_id` when given.
    fn list_match_summaries(
        &self,
        team_id: Option<&str>,
    ) -> impl Future<Output = Result<Vec<MatchSummary>>> + Send;

    fn load_match(&self, id: &str) -> impl Future<Output = Result<Option<MatchRecord>>> + Send;
}

/// A [`MatchLoader`] over records held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    summaries: Vec<MatchSummary>,
    records: HashMap<String, MatchRecord>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = MatchRecord>,
    {
        let mut loader = Self::new();
        for record in records {
            loader.insert(record);
        }
        loader
    }

    /// Build a loader from a JSON array of match records.
    pub fn from_json(json: &str) -> Result<Self> {
        let records: Vec<MatchRecord> =
            serde_json::from_str(json).map_err(StatsError::InvalidRecords)?;
        debug!(count = records.len(), "parsed match records");
        Ok(Self::from_records(records))
    }

    /// Add or replace a record. Its summary is listed in insertion order.
    pub fn insert(&mut self, record: MatchRecord) {
        let summary = record.summary();
        match self.summaries.iter_mut().find(|s| s.id == summary.id) {
            Some(existing) => *existing = summary,
            None => self.summaries.push(summary),
        }
        self.records.insert(record.id.clone(), record);
    }

    /// List a summary without a backing record, as happens when a synced
    /// index points at a match that was never downloaded.
    pub fn insert_summary(&mut self, summary: MatchSummary) {
        self.summaries.push(summary);
    }

    pub fn len(&self) -> usize {
        self.summaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }
}

impl MatchLoader for MemoryLoader {
    async fn list_match_summaries(&self, team_id: Option<&str>) -> Result<Vec<MatchSummary>> {
        Ok(self
            .summaries
            .iter()
            .filter(|s| team_id.is_none() || s.owner_team_id.as_deref() == team_id)
            .cloned()
            .collect())
    }

    async fn load_match(&self, id: &str) -> Result<Option<MatchRecord>> {
        Ok(self.records.get(id).cloned())
    }
}

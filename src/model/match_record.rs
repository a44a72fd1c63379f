use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::event::{lenient_events, MatchEvent};

const MATCH_DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
const MATCH_DATE_FORMAT: &str = "%Y-%m-%d";

/// Summary information for a single recorded match, as listed by a loader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_team_id: Option<String>,
    /// ISO-8601 date or date-time.
    pub date: String,
    pub home_team: String,
    pub away_team: String,
    pub home_score: u32,
    pub away_score: u32,
}

impl MatchSummary {
    /// The parsed match date, if `date` is a recognizable ISO-8601 string.
    pub fn played_at(&self) -> Option<NaiveDateTime> {
        parse_match_date(&self.date)
    }
}

/// Full record of a completed match: metadata, roster and event log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub id: String,
    pub metadata: MatchMetadata,
    pub home_score: u32,
    pub away_score: u32,
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default, deserialize_with = "lenient_events")]
    pub events: Vec<MatchEvent>,
}

/// Header metadata for a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchMetadata {
    pub home_team: String,
    pub away_team: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Which side of the match is the recording team.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub our_side: Option<Side>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_team_id: Option<String>,
}

/// Home or away, from the recording team's point of view.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Side {
    Home,
    Away,
}

/// Result of a match from the recording team's point of view.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MatchOutcome {
    Win,
    Draw,
    Loss,
}

impl MatchRecord {
    /// Summary view of this record, as a loader would list it.
    pub fn summary(&self) -> MatchSummary {
        MatchSummary {
            id: self.id.clone(),
            owner_team_id: self.metadata.owner_team_id.clone(),
            date: self.metadata.date.clone(),
            home_team: self.metadata.home_team.clone(),
            away_team: self.metadata.away_team.clone(),
            home_score: self.home_score,
            away_score: self.away_score,
        }
    }

    /// The side played by the recording team.
    ///
    /// The explicit metadata flag wins; without it the home team name is
    /// compared (case-insensitively) against `team_name`.
    pub fn our_side(&self, team_name: &str) -> Side {
        if let Some(side) = self.metadata.our_side {
            return side;
        }
        if same_team_name(&self.metadata.home_team, team_name) {
            Side::Home
        } else {
            Side::Away
        }
    }

    /// Final scores as `(ours, theirs)`.
    pub fn scores(&self, team_name: &str) -> (u32, u32) {
        match self.our_side(team_name) {
            Side::Home => (self.home_score, self.away_score),
            Side::Away => (self.away_score, self.home_score),
        }
    }

    pub fn outcome(&self, team_name: &str) -> MatchOutcome {
        let (ours, theirs) = self.scores(team_name);
        match ours.cmp(&theirs) {
            std::cmp::Ordering::Greater => MatchOutcome::Win,
            std::cmp::Ordering::Equal => MatchOutcome::Draw,
            std::cmp::Ordering::Less => MatchOutcome::Loss,
        }
    }
}

/// A roster entry. The id is only meaningful within its own match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: String,
    pub name: String,
    pub number: u16,
    pub position: Position,
    /// Seconds on court in this match.
    #[serde(default)]
    pub playing_time: u32,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Position {
    Goalkeeper,
    LeftWing,
    LeftBack,
    CenterBack,
    RightBack,
    RightWing,
    Pivot,
    /// Coaches and officials listed on the match sheet.
    Staff,
}

impl Position {
    pub fn is_goalkeeper(self) -> bool {
        self == Position::Goalkeeper
    }

    pub fn is_staff(self) -> bool {
        self == Position::Staff
    }
}

fn same_team_name(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Parse an ISO-8601 date, date-time, or RFC 3339 timestamp.
pub(crate) fn parse_match_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .map(|d| d.naive_utc())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, MATCH_DATE_TIME_FORMAT))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, MATCH_DATE_FORMAT)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

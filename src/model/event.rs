use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

/// A single entry in a match's event log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchEvent {
    /// Set when the event was recorded for the opposing team.
    #[serde(default)]
    pub is_opponent: bool,
    /// Roster id of the player involved, scoped to the event's match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_id: Option<String>,
    /// Seconds since throw-off.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u32>,
    #[serde(flatten)]
    pub kind: EventKind,
}

/// Kind-specific payload of an event, tagged by `type`.
///
/// Sub-type fields are optional on the wire; an event missing the field its
/// kind requires is treated as malformed and dropped by the aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum EventKind {
    Shot {
        #[serde(default)]
        outcome: Option<ShotOutcome>,
        #[serde(default)]
        zone: Option<ShotZone>,
    },
    OpponentShot {
        #[serde(default)]
        outcome: Option<ShotOutcome>,
    },
    Turnover {
        #[serde(default)]
        turnover_type: Option<TurnoverType>,
    },
    PositiveAction {
        #[serde(default)]
        action_type: Option<PositiveActionType>,
    },
    Sanction {
        #[serde(default)]
        sanction_type: Option<SanctionType>,
    },
    /// Timeouts, substitutions and any kind this crate does not count.
    #[serde(other)]
    Other,
}

/// How one of our shots ended.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ShotOutcome {
    Goal,
    Save,
    Miss,
    Post,
    Blocked,
    #[serde(other)]
    Other,
}

/// Court area a shot was taken from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ShotZone {
    SixMeterLeft,
    SixMeterCenter,
    SixMeterRight,
    NineMeterLeft,
    NineMeterCenter,
    NineMeterRight,
    WingLeft,
    WingRight,
    SevenMeter,
    Fastbreak,
    #[serde(other)]
    Other,
}

/// The five groupings used for the shooting breakdown.
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
    strum_macros::EnumIter,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "snake_case")]
pub enum ZoneBucket {
    SixMeter,
    NineMeter,
    Wing,
    SevenMeter,
    Fastbreak,
}

impl ShotZone {
    pub fn bucket(self) -> Option<ZoneBucket> {
        match self {
            ShotZone::SixMeterLeft | ShotZone::SixMeterCenter | ShotZone::SixMeterRight => {
                Some(ZoneBucket::SixMeter)
            }
            ShotZone::NineMeterLeft | ShotZone::NineMeterCenter | ShotZone::NineMeterRight => {
                Some(ZoneBucket::NineMeter)
            }
            ShotZone::WingLeft | ShotZone::WingRight => Some(ZoneBucket::Wing),
            ShotZone::SevenMeter => Some(ZoneBucket::SevenMeter),
            ShotZone::Fastbreak => Some(ZoneBucket::Fastbreak),
            ShotZone::Other => None,
        }
    }
}

/// Kind of ball loss.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TurnoverType {
    Pass,
    Reception,
    Steps,
    DoubleDribble,
    LineCrossing,
    OffensiveFoul,
    #[serde(other)]
    Other,
}

/// Kind of credited positive play.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PositiveActionType {
    Assist,
    Steal,
    Block,
    #[serde(rename = "EARNED_7M")]
    #[strum(serialize = "EARNED_7M")]
    Earned7m,
    GoodDefense,
    #[serde(other)]
    Other,
}

/// Card or suspension handed out.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SanctionType {
    Yellow,
    #[serde(rename = "TWO_MIN", alias = "TWO_MINUTES")]
    #[strum(serialize = "TWO_MIN")]
    TwoMinutes,
    Red,
    Blue,
    #[serde(other)]
    Other,
}

/// Deserialize an event log, dropping entries that do not have the shape of
/// a [`MatchEvent`] instead of rejecting the whole record.
pub(crate) fn lenient_events<'de, D>(deserializer: D) -> Result<Vec<MatchEvent>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?.unwrap_or_default();
    let events = raw
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(event) => Some(event),
            Err(e) => {
                debug!(index, error = %e, "dropping malformed event");
                None
            }
        })
        .collect();
    Ok(events)
}

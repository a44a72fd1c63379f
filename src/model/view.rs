use serde::{Deserialize, Serialize};

use super::match_record::Position;

/// Columns the player table can be sorted by.
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
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SortKey {
    Number,
    MatchesPlayed,
    PlayingTime,
    Goals,
    Shots,
    ShotPercentage,
    Assists,
    Steals,
    Blocks,
    EarnedPenalties,
    GoodDefense,
    PositiveActions,
    Saves,
    GoalsConceded,
    SavePercentage,
    Turnovers,
    TurnoverPass,
    TurnoverReception,
    TurnoverSteps,
    TurnoverDoubleDribble,
    TurnoverLineCrossing,
    TurnoverOffensiveFoul,
    Yellow,
    TwoMinutes,
    Red,
    Blue,
    Sanctions,
    AverageRating,
}

#[derive(
    Default,
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
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortDirection {
    #[strum(to_string = "asc", serialize = "ascending")]
    Ascending,
    #[default]
    #[strum(to_string = "desc", serialize = "descending")]
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Current sort selection of the player table.
///
/// Starts on jersey number ascending. Selecting the active key flips the
/// direction; selecting another key switches to it, descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            key: SortKey::Number,
            direction: SortDirection::Ascending,
        }
    }
}

impl SortState {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    pub fn select(&mut self, key: SortKey) {
        if self.key == key {
            self.direction = self.direction.toggled();
        } else {
            self.key = key;
            self.direction = SortDirection::Descending;
        }
    }
}

/// Role-scoped tabs of the statistics screen.
#[derive(
    Default,
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
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StatsView {
    #[default]
    General,
    Shooting,
    Goalkeeping,
    PositiveActions,
    Turnovers,
}

impl StatsView {
    /// Whether a player with `position` is listed in this view.
    pub fn includes(self, position: Position) -> bool {
        match self {
            StatsView::Goalkeeping => position.is_goalkeeper(),
            StatsView::General
            | StatsView::Shooting
            | StatsView::PositiveActions
            | StatsView::Turnovers => !position.is_staff(),
        }
    }

    /// Columns shown in this view, in display order.
    pub fn columns(self) -> &'static [SortKey] {
        match self {
            StatsView::General => &[
                SortKey::Number,
                SortKey::MatchesPlayed,
                SortKey::PlayingTime,
                SortKey::Goals,
                SortKey::ShotPercentage,
                SortKey::PositiveActions,
                SortKey::Turnovers,
                SortKey::Sanctions,
                SortKey::AverageRating,
            ],
            StatsView::Shooting => &[
                SortKey::Number,
                SortKey::Goals,
                SortKey::Shots,
                SortKey::ShotPercentage,
            ],
            StatsView::Goalkeeping => &[
                SortKey::Number,
                SortKey::MatchesPlayed,
                SortKey::Saves,
                SortKey::GoalsConceded,
                SortKey::SavePercentage,
            ],
            StatsView::PositiveActions => &[
                SortKey::Number,
                SortKey::Assists,
                SortKey::Steals,
                SortKey::Blocks,
                SortKey::EarnedPenalties,
                SortKey::GoodDefense,
                SortKey::PositiveActions,
            ],
            StatsView::Turnovers => &[
                SortKey::Number,
                SortKey::Turnovers,
                SortKey::TurnoverPass,
                SortKey::TurnoverReception,
                SortKey::TurnoverSteps,
                SortKey::TurnoverDoubleDribble,
                SortKey::TurnoverLineCrossing,
                SortKey::TurnoverOffensiveFoul,
            ],
        }
    }
}

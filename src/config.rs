use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::error::{Result, StatsError};

/// Counted categories that contribute to a player's rating.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RatingCategory {
    Goal,
    /// Shots minus goals.
    Miss,
    Assist,
    Steal,
    Block,
    #[serde(rename = "EARNED_7M")]
    #[strum(serialize = "EARNED_7M")]
    Earned7m,
    /// Good defensive action.
    #[serde(rename = "GOOD_ID")]
    #[strum(serialize = "GOOD_ID")]
    GoodDefense,
    Turnover,
    Yellow,
    TwoMin,
    Red,
    Blue,
    Save,
    GoalConceded,
}

impl RatingCategory {
    /// Goalkeeping categories only count towards goalkeepers' ratings.
    pub fn is_goalkeeping(self) -> bool {
        matches!(self, RatingCategory::Save | RatingCategory::GoalConceded)
    }
}

/// Signed weight per rating category.
///
/// A table is only usable once every category has a weight; see
/// [`RatingWeights::validate`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RatingWeights {
    weights: BTreeMap<RatingCategory, f64>,
}

impl RatingWeights {
    pub fn new<I>(weights: I) -> Self
    where
        I: IntoIterator<Item = (RatingCategory, f64)>,
    {
        Self {
            weights: weights.into_iter().collect(),
        }
    }

    /// The weight table used by the statistics screen.
    pub fn standard() -> Self {
        Self::new([
            (RatingCategory::Goal, 1.0),
            (RatingCategory::Miss, -0.5),
            (RatingCategory::Assist, 0.75),
            (RatingCategory::Steal, 0.75),
            (RatingCategory::Block, 0.5),
            (RatingCategory::Earned7m, 0.5),
            (RatingCategory::GoodDefense, 0.5),
            (RatingCategory::Turnover, -0.75),
            (RatingCategory::Yellow, -0.25),
            (RatingCategory::TwoMin, -0.5),
            (RatingCategory::Red, -1.5),
            (RatingCategory::Blue, -2.0),
            (RatingCategory::Save, 0.75),
            (RatingCategory::GoalConceded, -0.25),
        ])
    }

    /// Parse a flat JSON object such as `{"GOAL": 1.0, "MISS": -0.5, ...}`.
    ///
    /// Unknown category names are rejected. Completeness is checked by
    /// [`RatingWeights::validate`], not here.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, f64> =
            serde_json::from_str(json).map_err(StatsError::InvalidWeights)?;
        raw.into_iter()
            .map(|(name, weight)| {
                RatingCategory::from_str(&name)
                    .map(|category| (category, weight))
                    .map_err(|_| StatsError::UnknownCategory(name))
            })
            .collect::<Result<BTreeMap<_, _>>>()
            .map(|weights| Self { weights })
    }

    pub fn with(mut self, category: RatingCategory, weight: f64) -> Self {
        self.weights.insert(category, weight);
        self
    }

    pub fn get(&self, category: RatingCategory) -> Option<f64> {
        self.weights.get(&category).copied()
    }

    pub fn weight(&self, category: RatingCategory) -> Result<f64> {
        self.get(category)
            .ok_or(StatsError::MissingWeight { category })
    }

    /// Fails with the first category, in catalog order, that has no weight.
    pub fn validate(&self) -> Result<()> {
        match RatingCategory::iter().find(|c| !self.weights.contains_key(c)) {
            Some(category) => Err(StatsError::MissingWeight { category }),
            None => Ok(()),
        }
    }
}

/// Order in which matches are folded. Later matches overwrite a player's
/// name, number and position.
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
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FoldOrder {
    /// The order the loader listed the summaries in.
    LoadOrder,
    /// Oldest match first; summaries with unparseable dates come first,
    /// ties keep load order.
    #[default]
    Chronological,
}

/// Everything an aggregation run needs besides the matches themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationConfig {
    /// Our team's name, used when a match does not say which side we played.
    pub team_name: String,
    pub weights: RatingWeights,
    #[serde(default)]
    pub fold_order: FoldOrder,
}

impl AggregationConfig {
    pub fn new(team_name: impl Into<String>, weights: RatingWeights) -> Self {
        Self {
            team_name: team_name.into(),
            weights,
            fold_order: FoldOrder::default(),
        }
    }

    pub fn with_fold_order(mut self, fold_order: FoldOrder) -> Self {
        self.fold_order = fold_order;
        self
    }
}

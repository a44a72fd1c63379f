use strum::IntoEnumIterator;

use crate::config::{RatingCategory, RatingWeights};
use crate::error::Result;
use crate::model::PlayerAggregate;

/// How often `row` was credited with `category`.
pub(crate) fn category_count(row: &PlayerAggregate, category: RatingCategory) -> u32 {
    match category {
        RatingCategory::Goal => row.goals,
        RatingCategory::Miss => row.misses(),
        RatingCategory::Assist => row.assists,
        RatingCategory::Steal => row.steals,
        RatingCategory::Block => row.blocks,
        RatingCategory::Earned7m => row.earned_penalties,
        RatingCategory::GoodDefense => row.good_defense,
        RatingCategory::Turnover => row.turnovers.total,
        RatingCategory::Yellow => row.sanctions.yellow,
        RatingCategory::TwoMin => row.sanctions.two_minutes,
        RatingCategory::Red => row.sanctions.red,
        RatingCategory::Blue => row.sanctions.blue,
        RatingCategory::Save => row.saves,
        RatingCategory::GoalConceded => row.goals_conceded,
    }
}

/// Weighted sum of all counted categories. Goalkeeping categories only
/// apply when the row's position is goalkeeper.
pub(crate) fn rate(row: &PlayerAggregate, weights: &RatingWeights) -> Result<f64> {
    RatingCategory::iter()
        .filter(|c| !c.is_goalkeeping() || row.position.is_goalkeeper())
        .map(|c| Ok(f64::from(category_count(row, c)) * weights.weight(c)?))
        .sum()
}

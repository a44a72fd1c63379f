use tracing::debug;

use crate::model::{PlayerAggregate, SortDirection, SortKey, SortState, StatsView};

impl SortKey {
    /// The scalar this key sorts `row` by.
    pub fn value(self, row: &PlayerAggregate) -> f64 {
        let count = match self {
            SortKey::Number => u32::from(row.number),
            SortKey::MatchesPlayed => row.matches_played,
            SortKey::PlayingTime => return row.playing_time as f64,
            SortKey::Goals => row.goals,
            SortKey::Shots => row.total_shots,
            SortKey::ShotPercentage => return row.shot_percentage(),
            SortKey::Assists => row.assists,
            SortKey::Steals => row.steals,
            SortKey::Blocks => row.blocks,
            SortKey::EarnedPenalties => row.earned_penalties,
            SortKey::GoodDefense => row.good_defense,
            SortKey::PositiveActions => row.positive_actions(),
            SortKey::Saves => row.saves,
            SortKey::GoalsConceded => row.goals_conceded,
            SortKey::SavePercentage => return row.save_percentage(),
            SortKey::Turnovers => row.turnovers.total,
            SortKey::TurnoverPass => row.turnovers.pass,
            SortKey::TurnoverReception => row.turnovers.reception,
            SortKey::TurnoverSteps => row.turnovers.steps,
            SortKey::TurnoverDoubleDribble => row.turnovers.double_dribble,
            SortKey::TurnoverLineCrossing => row.turnovers.line_crossing,
            SortKey::TurnoverOffensiveFoul => row.turnovers.offensive_foul,
            SortKey::Yellow => row.sanctions.yellow,
            SortKey::TwoMinutes => row.sanctions.two_minutes,
            SortKey::Red => row.sanctions.red,
            SortKey::Blue => row.sanctions.blue,
            SortKey::Sanctions => row.sanctions.total(),
            SortKey::AverageRating => return row.average_rating(),
        };
        f64::from(count)
    }
}

/// Filter `rows` to the players listed in `view` and order them by `key`.
///
/// Rows with equal values have no defined relative order.
pub fn project(
    rows: &[PlayerAggregate],
    key: SortKey,
    direction: SortDirection,
    view: StatsView,
) -> Vec<&PlayerAggregate> {
    let mut projected: Vec<_> = rows.iter().filter(|r| view.includes(r.position)).collect();
    projected.sort_by(|a, b| {
        let ord = key.value(a).total_cmp(&key.value(b));
        match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
    debug!(%key, %direction, %view, rows = projected.len(), "projected player table");
    projected
}

/// [`project`] with the key and direction of a [`SortState`].
pub fn project_state(
    rows: &[PlayerAggregate],
    state: SortState,
    view: StatsView,
) -> Vec<&PlayerAggregate> {
    project(rows, state.key, state.direction, view)
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;
    use crate::model::{PlayerKey, Position};

    fn row(number: u16, name: &str, position: Position) -> PlayerAggregate {
        PlayerAggregate::new(
            PlayerKey(format!("{number}-{}", name.to_lowercase())),
            name.to_string(),
            number,
            position,
        )
    }

    fn table() -> Vec<PlayerAggregate> {
        let mut ana = row(7, "Ana", Position::LeftWing);
        ana.goals = 5;
        ana.total_shots = 10;
        ana.matches_played = 2;
        ana.total_rating = 3.0;

        let mut bea = row(4, "Bea", Position::RightBack);
        bea.goals = 3;
        bea.total_shots = 4;
        bea.matches_played = 1;
        bea.total_rating = 2.5;

        let mut jonas = row(1, "Jonas", Position::Goalkeeper);
        jonas.saves = 9;
        jonas.goals_conceded = 3;
        jonas.matches_played = 2;
        jonas.total_rating = 4.0;

        let mut lena = row(16, "Lena", Position::Goalkeeper);
        lena.saves = 2;
        lena.goals_conceded = 8;
        lena.matches_played = 1;
        lena.total_rating = -0.5;

        let coach = row(99, "Coach", Position::Staff);
        vec![jonas, bea, ana, lena, coach]
    }

    fn numbers(rows: &[&PlayerAggregate]) -> Vec<u16> {
        rows.iter().map(|r| r.number).collect()
    }

    #[test]
    fn test_general_view_excludes_staff() {
        let rows = table();
        let projected = project(
            &rows,
            SortKey::Number,
            SortDirection::Ascending,
            StatsView::General,
        );
        assert_eq!(numbers(&projected), [1, 4, 7, 16]);
    }

    #[test]
    fn test_goalkeeping_view_only_goalkeepers() {
        let rows = table();
        let projected = project(
            &rows,
            SortKey::SavePercentage,
            SortDirection::Descending,
            StatsView::Goalkeeping,
        );
        assert_eq!(numbers(&projected), [1, 16]);
    }

    #[test]
    fn test_ratio_and_average_keys() {
        let rows = table();
        let by_pct = project(
            &rows,
            SortKey::ShotPercentage,
            SortDirection::Descending,
            StatsView::Shooting,
        );
        assert_eq!(by_pct[0].number, 4);
        assert_eq!(by_pct[1].number, 7);

        let by_rating = project(
            &rows,
            SortKey::AverageRating,
            SortDirection::Descending,
            StatsView::General,
        );
        // 2.5, 2.0, 1.5, -0.5
        assert_eq!(numbers(&by_rating), [4, 1, 7, 16]);
    }

    #[test]
    fn test_ascending_is_reverse_of_descending_without_ties() {
        let rows = table();
        let key = SortKey::AverageRating;
        let asc = project(&rows, key, SortDirection::Ascending, StatsView::General);
        let desc = project(&rows, key, SortDirection::Descending, StatsView::General);
        assert_eq!(numbers(&asc.into_iter().rev().collect_vec()), numbers(&desc));
    }

    #[test]
    fn test_projection_follows_sort_state() {
        let rows = table();
        let mut state = SortState::default();
        state.select(SortKey::Goals);
        let projected = project_state(&rows, state, StatsView::General);
        assert_eq!(projected[0].number, 7);

        state.select(SortKey::Goals);
        let projected = project_state(&rows, state, StatsView::General);
        assert_eq!(projected.last().map(|r| r.number), Some(7));
    }

    #[test]
    fn test_composite_keys() {
        let mut row = row(5, "Mia", Position::CenterBack);
        row.steals = 1;
        row.assists = 2;
        row.blocks = 3;
        row.earned_penalties = 4;
        row.good_defense = 5;
        row.sanctions.yellow = 1;
        row.sanctions.two_minutes = 2;
        row.sanctions.red = 1;
        row.sanctions.blue = 1;
        assert_eq!(SortKey::PositiveActions.value(&row), 15.0);
        assert_eq!(SortKey::Sanctions.value(&row), 4.0);
        assert_eq!(SortKey::Blue.value(&row), 1.0);
    }
}

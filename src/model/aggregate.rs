use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use super::event::{SanctionType, TurnoverType, ZoneBucket};
use super::match_record::{MatchOutcome, MatchSummary, Position};

/// Cross-match identity of a player, as produced by an identity resolver.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerKey(pub String);

impl PlayerKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PlayerKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Goals and attempts from one zone bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneStats {
    pub goals: u32,
    pub total: u32,
}

impl ZoneStats {
    pub(crate) fn record(&mut self, goal: bool) {
        self.total += 1;
        if goal {
            self.goals += 1;
        }
    }

    pub fn misses(&self) -> u32 {
        self.total.saturating_sub(self.goals)
    }

    /// Goals per attempt, `0.0` without attempts.
    pub fn percentage(&self) -> f64 {
        ratio(self.goals, self.total)
    }
}

/// Per-zone shooting breakdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShootingZones {
    pub six_meter: ZoneStats,
    pub nine_meter: ZoneStats,
    pub wing: ZoneStats,
    pub seven_meter: ZoneStats,
    pub fastbreak: ZoneStats,
}

impl ShootingZones {
    pub fn get(&self, bucket: ZoneBucket) -> &ZoneStats {
        match bucket {
            ZoneBucket::SixMeter => &self.six_meter,
            ZoneBucket::NineMeter => &self.nine_meter,
            ZoneBucket::Wing => &self.wing,
            ZoneBucket::SevenMeter => &self.seven_meter,
            ZoneBucket::Fastbreak => &self.fastbreak,
        }
    }

    pub(crate) fn get_mut(&mut self, bucket: ZoneBucket) -> &mut ZoneStats {
        match bucket {
            ZoneBucket::SixMeter => &mut self.six_meter,
            ZoneBucket::NineMeter => &mut self.nine_meter,
            ZoneBucket::Wing => &mut self.wing,
            ZoneBucket::SevenMeter => &mut self.seven_meter,
            ZoneBucket::Fastbreak => &mut self.fastbreak,
        }
    }

    /// Attempts that landed in any bucket.
    pub fn total_attempts(&self) -> u32 {
        self.six_meter.total
            + self.nine_meter.total
            + self.wing.total
            + self.seven_meter.total
            + self.fastbreak.total
    }
}

/// Turnover counters with sub-type breakdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnoverStats {
    pub total: u32,
    pub pass: u32,
    pub reception: u32,
    pub steps: u32,
    pub double_dribble: u32,
    pub line_crossing: u32,
    pub offensive_foul: u32,
}

impl TurnoverStats {
    /// Count one turnover; unrecognized sub-types only raise the total.
    pub(crate) fn record(&mut self, kind: TurnoverType) {
        self.total += 1;
        match kind {
            TurnoverType::Pass => self.pass += 1,
            TurnoverType::Reception => self.reception += 1,
            TurnoverType::Steps => self.steps += 1,
            TurnoverType::DoubleDribble => self.double_dribble += 1,
            TurnoverType::LineCrossing => self.line_crossing += 1,
            TurnoverType::OffensiveFoul => self.offensive_foul += 1,
            TurnoverType::Other => {}
        }
    }
}

/// Sanctions received, by card or suspension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SanctionStats {
    pub yellow: u32,
    pub two_minutes: u32,
    pub red: u32,
    pub blue: u32,
}

impl SanctionStats {
    /// Returns `false` when the sanction type is not one that is counted.
    pub(crate) fn record(&mut self, kind: SanctionType) -> bool {
        match kind {
            SanctionType::Yellow => self.yellow += 1,
            SanctionType::TwoMinutes => self.two_minutes += 1,
            SanctionType::Red => self.red += 1,
            SanctionType::Blue => self.blue += 1,
            SanctionType::Other => return false,
        }
        true
    }

    /// Yellow, two-minute and red sanctions. Blue cards are reported separately.
    pub fn total(&self) -> u32 {
        self.yellow + self.two_minutes + self.red
    }
}

/// Accumulated statistics for one resolved player across a set of matches.
///
/// Name, number and position reflect the last folded match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerAggregate {
    pub key: PlayerKey,
    pub name: String,
    pub number: u16,
    pub position: Position,
    pub matches_played: u32,
    /// Seconds on court over all matches.
    pub playing_time: u64,
    pub total_shots: u32,
    pub goals: u32,
    pub zones: ShootingZones,
    pub assists: u32,
    pub steals: u32,
    pub blocks: u32,
    pub earned_penalties: u32,
    pub good_defense: u32,
    pub turnovers: TurnoverStats,
    pub sanctions: SanctionStats,
    pub saves: u32,
    pub goals_conceded: u32,
    pub total_rating: f64,
}

impl PlayerAggregate {
    pub(crate) fn new(key: PlayerKey, name: String, number: u16, position: Position) -> Self {
        Self {
            key,
            name,
            number,
            position,
            matches_played: 0,
            playing_time: 0,
            total_shots: 0,
            goals: 0,
            zones: ShootingZones::default(),
            assists: 0,
            steals: 0,
            blocks: 0,
            earned_penalties: 0,
            good_defense: 0,
            turnovers: TurnoverStats::default(),
            sanctions: SanctionStats::default(),
            saves: 0,
            goals_conceded: 0,
            total_rating: 0.0,
        }
    }

    /// Shots that did not end in a goal.
    pub fn misses(&self) -> u32 {
        self.total_shots.saturating_sub(self.goals)
    }

    pub fn shot_percentage(&self) -> f64 {
        ratio(self.goals, self.total_shots)
    }

    pub fn save_percentage(&self) -> f64 {
        ratio(self.saves, self.saves + self.goals_conceded)
    }

    pub fn positive_actions(&self) -> u32 {
        self.steals + self.assists + self.blocks + self.earned_penalties + self.good_defense
    }

    pub fn average_rating(&self) -> f64 {
        if self.matches_played == 0 {
            0.0
        } else {
            self.total_rating / f64::from(self.matches_played)
        }
    }
}

/// Win/draw/loss tally of the matches included in an aggregation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
}

impl TeamRecord {
    pub(crate) fn record(&mut self, outcome: MatchOutcome) {
        match outcome {
            MatchOutcome::Win => self.wins += 1,
            MatchOutcome::Draw => self.draws += 1,
            MatchOutcome::Loss => self.losses += 1,
        }
    }

    pub fn played(&self) -> u32 {
        self.wins + self.draws + self.losses
    }
}

/// Result of one aggregation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregation {
    /// Player rows ordered by jersey number.
    pub rows: Vec<PlayerAggregate>,
    /// Matches that were loaded and folded, in fold order.
    pub included_matches: Vec<MatchSummary>,
    pub record: TeamRecord,
}

impl Aggregation {
    pub fn row(&self, key: &str) -> Option<&PlayerAggregate> {
        self.rows.iter().find(|r| r.key.as_str() == key)
    }
}

fn ratio(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        0.0
    } else {
        f64::from(part) / f64::from(whole)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keeper() -> PlayerAggregate {
        PlayerAggregate::new(
            PlayerKey("1-jonas".to_string()),
            "Jonas".to_string(),
            1,
            Position::Goalkeeper,
        )
    }

    #[test]
    fn test_save_percentage_without_shots_is_zero() {
        let row = keeper();
        assert_eq!(row.save_percentage(), 0.0);
        assert_eq!(row.shot_percentage(), 0.0);
        assert_eq!(row.average_rating(), 0.0);
    }

    #[test]
    fn test_derived_ratios() {
        let mut row = keeper();
        row.saves = 3;
        row.goals_conceded = 1;
        row.total_shots = 4;
        row.goals = 1;
        row.matches_played = 2;
        row.total_rating = 5.0;
        assert_eq!(row.save_percentage(), 0.75);
        assert_eq!(row.shot_percentage(), 0.25);
        assert_eq!(row.misses(), 3);
        assert_eq!(row.average_rating(), 2.5);
    }

    #[test]
    fn test_turnover_breakdown() {
        let mut turnovers = TurnoverStats::default();
        turnovers.record(TurnoverType::Pass);
        turnovers.record(TurnoverType::Steps);
        turnovers.record(TurnoverType::Other);
        assert_eq!(turnovers.total, 3);
        assert_eq!(turnovers.pass, 1);
        assert_eq!(turnovers.steps, 1);
    }

    #[test]
    fn test_sanction_total_excludes_blue() {
        let mut sanctions = SanctionStats::default();
        assert!(sanctions.record(SanctionType::Yellow));
        assert!(sanctions.record(SanctionType::TwoMinutes));
        assert!(sanctions.record(SanctionType::Blue));
        assert!(!sanctions.record(SanctionType::Other));
        assert_eq!(sanctions.total(), 2);
        assert_eq!(sanctions.blue, 1);
    }

    #[test]
    fn test_zone_stats() {
        let mut zones = ShootingZones::default();
        zones.get_mut(ZoneBucket::Wing).record(true);
        zones.get_mut(ZoneBucket::Wing).record(false);
        assert_eq!(zones.get(ZoneBucket::Wing).percentage(), 0.5);
        assert_eq!(zones.get(ZoneBucket::Wing).misses(), 1);
        assert_eq!(zones.total_attempts(), 2);
    }

    #[test]
    fn test_misses_never_underflow() {
        let mut row = keeper();
        row.goals = 3;
        row.total_shots = 1;
        assert_eq!(row.misses(), 0);

        let zone = ZoneStats { goals: 2, total: 1 };
        assert_eq!(zone.misses(), 0);
    }
}

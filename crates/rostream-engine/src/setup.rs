//! One-time roster preparation for a streaming search.
//!
//! [`RosterSetup`] splits a roster into *core* players, who are kept and slotted
//! optimally every day, and *streamers*, whose roster spots the search may give to
//! free agents. It runs the slot solver once per day for the core players and
//! records which starting slots they leave unused.

use crate::{
    Lineup, Player, ScheduleError, ScheduleIndex, SlotSet, WeekWindow, by_points,
    slotting::{self, MAX_SLOTTING_PLAYERS},
};

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SetupError {
    #[display("schedule lookup failed")]
    Schedule(ScheduleError),
    #[display("{count} core players play on day {day} (limit {MAX_SLOTTING_PLAYERS})")]
    TooManyCorePlayers { day: usize, count: usize },
}

impl From<ScheduleError> for SetupError {
    fn from(err: ScheduleError) -> Self {
        Self::Schedule(err)
    }
}

/// Everything the streaming search needs to know about a team for one week.
#[derive(Debug, Clone)]
pub struct RosterSetup {
    week_id: String,
    game_span: usize,
    core: Vec<Player>,
    streamers: Vec<Player>,
    free_agents: Vec<Player>,
    lineups: Vec<Lineup>,
    unused_slots: Vec<SlotSet>,
}

impl RosterSetup {
    /// Prepares `roster` for streaming during `week`.
    ///
    /// Injured roster players are left out. Players projected above `threshold` are
    /// core; the rest form the streaming pool, best first.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::TooManyCorePlayers`] if more core players play on one
    /// day than the slot solver accepts.
    pub fn new(
        week_id: impl Into<String>,
        week: &WeekWindow,
        roster: Vec<Player>,
        free_agents: Vec<Player>,
        threshold: f64,
    ) -> Result<Self, SetupError> {
        let (mut core, mut streamers): (Vec<_>, Vec<_>) = roster
            .into_iter()
            .filter(|p| !p.injured)
            .partition(|p| p.avg_points > threshold);
        core.sort_by(|a, b| by_points(b, a));
        streamers.sort_by(|a, b| by_points(b, a));

        let lineups = week
            .days()
            .map(|day| {
                let count = core
                    .iter()
                    .filter(|p| week.is_playing(day, &p.team))
                    .count();
                if count > MAX_SLOTTING_PLAYERS {
                    return Err(SetupError::TooManyCorePlayers { day, count });
                }
                Ok(slotting::optimal_lineup_for_day(&core, week, day))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let setup = Self::from_parts(week_id, week, core, streamers, free_agents, lineups);
        log::debug!(
            "week {}: {} core players, {} streamers, {} free agents, {} unused slot-days",
            setup.week_id,
            setup.core.len(),
            setup.streamers.len(),
            setup.free_agents.len(),
            setup.unused_slots.iter().map(|s| s.len()).sum::<usize>(),
        );
        Ok(setup)
    }

    /// Looks up week `week_id` in `schedule` and prepares `roster` for it.
    ///
    /// # Errors
    ///
    /// Fails if the week is not in `schedule`, or as [`Self::new`] does.
    pub fn from_schedule(
        schedule: &ScheduleIndex,
        week_id: &str,
        roster: Vec<Player>,
        free_agents: Vec<Player>,
        threshold: f64,
    ) -> Result<Self, SetupError> {
        let week = schedule.week(week_id)?;
        Self::new(week_id, week, roster, free_agents, threshold)
    }

    /// Builds a setup from lineups computed elsewhere.
    ///
    /// `streamers` keeps the given order.
    ///
    /// # Panics
    ///
    /// Panics if there is not exactly one lineup per day of `week`.
    #[must_use]
    pub fn from_parts(
        week_id: impl Into<String>,
        week: &WeekWindow,
        core: Vec<Player>,
        streamers: Vec<Player>,
        free_agents: Vec<Player>,
        lineups: Vec<Lineup>,
    ) -> Self {
        assert_eq!(
            lineups.len(),
            week.day_count(),
            "expected one lineup per day of the week"
        );
        let unused_slots = lineups.iter().map(Lineup::unused_slots).collect();
        Self {
            week_id: week_id.into(),
            game_span: week.game_span(),
            core,
            streamers,
            free_agents,
            lineups,
            unused_slots,
        }
    }

    #[must_use]
    pub fn week_id(&self) -> &str {
        &self.week_id
    }

    #[must_use]
    pub fn game_span(&self) -> usize {
        self.game_span
    }

    #[must_use]
    pub fn day_count(&self) -> usize {
        self.game_span + 1
    }

    #[must_use]
    pub fn core_players(&self) -> &[Player] {
        &self.core
    }

    /// Streaming pool in its initial order.
    #[must_use]
    pub fn streamers(&self) -> &[Player] {
        &self.streamers
    }

    #[must_use]
    pub fn free_agents(&self) -> &[Player] {
        &self.free_agents
    }

    /// Optimal core lineup per day.
    #[must_use]
    pub fn lineups(&self) -> &[Lineup] {
        &self.lineups
    }

    /// # Panics
    ///
    /// Panics if `day` lies outside the week.
    #[must_use]
    pub fn lineup(&self, day: usize) -> &Lineup {
        &self.lineups[day]
    }

    /// Starting slots the core lineup leaves empty on `day`.
    ///
    /// # Panics
    ///
    /// Panics if `day` lies outside the week.
    #[must_use]
    pub fn unused_slots(&self, day: usize) -> SlotSet {
        self.unused_slots[day]
    }

    /// Points scored by core players in starting slots over the whole week.
    #[must_use]
    pub fn core_points(&self) -> f64 {
        self.lineups.iter().map(Lineup::points).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Slot;

    fn week() -> WeekWindow {
        WeekWindow::new(2)
            .with_games("BOS", [0, 1, 2])
            .with_games("NYK", [1])
    }

    #[test]
    fn test_threshold_splits_core_and_streamers() {
        let roster = vec![
            Player::new("Star", 50.0, "BOS", &[Slot::PointGuard, Slot::Guard]),
            Player::new("Bench Guy", 12.0, "NYK", &[Slot::Center]),
            Player::new("Hurt Star", 55.0, "BOS", &[Slot::Center]).injured(),
            Player::new("Role", 20.0, "BOS", &[Slot::Forward]),
        ];
        let setup = RosterSetup::new("1", &week(), roster, vec![], 30.0).unwrap();

        let core = setup.core_players().iter().map(Player::id).collect::<Vec<_>>();
        assert_eq!(core, ["Star"]);
        let streamers = setup.streamers().iter().map(Player::id).collect::<Vec<_>>();
        assert_eq!(streamers, ["Role", "Bench Guy"]);
    }

    #[test]
    fn test_unused_slots_follow_core_lineups() {
        let roster = vec![
            Player::new("Star", 50.0, "BOS", &[Slot::PointGuard, Slot::Guard]),
            Player::new("Knick", 40.0, "NYK", &[Slot::Center]),
        ];
        let setup = RosterSetup::new("1", &week(), roster, vec![], 30.0).unwrap();

        assert_eq!(setup.day_count(), 3);
        assert!(!setup.unused_slots(0).contains(Slot::PointGuard));
        assert!(setup.unused_slots(0).contains(Slot::Center));
        assert!(!setup.unused_slots(1).contains(Slot::Center));
        assert_eq!(setup.unused_slots(1).len(), Slot::STARTING_LEN - 2);
        assert!((setup.core_points() - (50.0 * 3.0 + 40.0)).abs() < 1e-9);
    }

    #[test]
    fn test_from_schedule_rejects_unknown_week() {
        let schedule = ScheduleIndex::new().with_week("1", week());
        assert!(RosterSetup::from_schedule(&schedule, "1", vec![], vec![], 30.0).is_ok());

        let err = RosterSetup::from_schedule(&schedule, "9", vec![], vec![], 30.0).unwrap_err();
        assert_eq!(
            err,
            SetupError::Schedule(ScheduleError::UnknownWeek {
                week: "9".to_owned()
            })
        );
    }

    #[test]
    fn test_too_many_core_players_is_an_error() {
        let crowded = (0..=MAX_SLOTTING_PLAYERS)
            .map(|i| Player::new(format!("Star {i}"), 40.0, "NYK", &[Slot::Center]))
            .collect::<Vec<_>>();
        let err = RosterSetup::new("1", &week(), crowded.clone(), vec![], 30.0).unwrap_err();
        assert_eq!(
            err,
            SetupError::TooManyCorePlayers {
                day: 1,
                count: MAX_SLOTTING_PLAYERS + 1
            }
        );

        // the same players are fine as streamers
        let setup = RosterSetup::new("1", &week(), crowded, vec![], 50.0).unwrap();
        assert!(setup.core_players().is_empty());
        assert_eq!(setup.streamers().len(), MAX_SLOTTING_PLAYERS + 1);
    }

    #[test]
    #[should_panic(expected = "one lineup per day")]
    fn test_from_parts_requires_lineup_per_day() {
        let _ = RosterSetup::from_parts("1", &week(), vec![], vec![], vec![], vec![]);
    }
}

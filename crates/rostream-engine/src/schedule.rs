//! Season game calendar.
//!
//! A [`ScheduleIndex`] maps week identifiers to [`WeekWindow`]s. Each window knows
//! its span (days `0..=game_span`) and which teams play on which day. The index is
//! a plain value: callers build or deserialize it once and pass it to whatever
//! needs to ask "does team T play on day D".
//!
//! The serialized form matches the season schedule file:
//!
//! ```json
//! { "schedule": { "1": { "gameSpan": 6, "games": { "BOS": { "0": true, "2": true } } } } }
//! ```

use std::{
    collections::{BTreeMap, HashMap},
    ops::RangeInclusive,
};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ScheduleError {
    #[display("week {week:?} is not in the schedule")]
    UnknownWeek { week: String },
}

/// One scheduling week: days `0..=game_span` and the teams playing each day.
///
/// # Example
///
/// ```
/// use rostream_engine::WeekWindow;
///
/// let week = WeekWindow::new(5).with_games("BOS", [0, 2, 4]);
/// assert_eq!(week.day_count(), 6);
/// assert!(week.is_playing(2, "BOS"));
/// assert!(!week.is_playing(3, "BOS"));
/// assert!(!week.is_playing(0, "LAL"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekWindow {
    #[serde(rename = "startDate", default, skip_serializing_if = "Option::is_none")]
    start_date: Option<String>,
    #[serde(rename = "endDate", default, skip_serializing_if = "Option::is_none")]
    end_date: Option<String>,
    #[serde(rename = "gameSpan")]
    game_span: usize,
    #[serde(default)]
    games: HashMap<String, BTreeMap<usize, bool>>,
}

impl WeekWindow {
    /// Creates a week spanning days `0..=game_span` with no games.
    #[must_use]
    pub fn new(game_span: usize) -> Self {
        Self {
            game_span,
            ..Self::default()
        }
    }

    /// Marks `team` as playing on each of `days`.
    ///
    /// # Panics
    ///
    /// Panics if any day lies outside the week.
    #[must_use]
    pub fn with_games<I>(mut self, team: &str, days: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let games = self.games.entry(team.to_owned()).or_default();
        for day in days {
            assert!(
                day <= self.game_span,
                "day {day} is outside week span 0..={}",
                self.game_span
            );
            games.insert(day, true);
        }
        self
    }

    #[must_use]
    pub fn game_span(&self) -> usize {
        self.game_span
    }

    /// Number of days in the week (`game_span + 1`).
    #[must_use]
    pub fn day_count(&self) -> usize {
        self.game_span + 1
    }

    #[must_use]
    pub fn days(&self) -> RangeInclusive<usize> {
        0..=self.game_span
    }

    #[must_use]
    pub fn start_date(&self) -> Option<&str> {
        self.start_date.as_deref()
    }

    #[must_use]
    pub fn end_date(&self) -> Option<&str> {
        self.end_date.as_deref()
    }

    /// Returns `true` if `team` has a game on `day`.
    ///
    /// # Panics
    ///
    /// Panics if `day` lies outside the week.
    #[must_use]
    pub fn is_playing(&self, day: usize, team: &str) -> bool {
        assert!(
            day <= self.game_span,
            "day {day} is outside week span 0..={}",
            self.game_span
        );
        self.games
            .get(team)
            .and_then(|games| games.get(&day))
            .copied()
            .unwrap_or(false)
    }

    /// Number of games `team` plays this week.
    #[must_use]
    pub fn game_count(&self, team: &str) -> usize {
        self.games
            .get(team)
            .map_or(0, |games| games.values().filter(|playing| **playing).count())
    }
}

/// Week-by-week game calendar for a season.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleIndex {
    #[serde(rename = "schedule")]
    weeks: HashMap<String, WeekWindow>,
}

impl ScheduleIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_week(mut self, id: impl Into<String>, week: WeekWindow) -> Self {
        self.weeks.insert(id.into(), week);
        self
    }

    pub fn week(&self, id: &str) -> Result<&WeekWindow, ScheduleError> {
        self.weeks.get(id).ok_or_else(|| ScheduleError::UnknownWeek {
            week: id.to_owned(),
        })
    }

    /// Day count of week `id`.
    pub fn day_count(&self, id: &str) -> Result<usize, ScheduleError> {
        self.week(id).map(WeekWindow::day_count)
    }

    /// Returns `true` if `team` plays on `day` of week `id`.
    ///
    /// # Panics
    ///
    /// Panics if `day` lies outside the week.
    pub fn is_playing(&self, id: &str, day: usize, team: &str) -> Result<bool, ScheduleError> {
        self.week(id).map(|week| week.is_playing(day, team))
    }

    pub fn week_ids(&self) -> impl Iterator<Item = &str> {
        self.weeks.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_schedule_file_format() {
        let json = r#"{
            "schedule": {
                "3": {
                    "startDate": "11/4/2024",
                    "endDate": "11/10/2024",
                    "gameSpan": 6,
                    "games": { "BOS": { "0": true, "3": true }, "NYK": { "1": true } }
                }
            }
        }"#;
        let schedule: ScheduleIndex = serde_json::from_str(json).unwrap();

        assert_eq!(schedule.day_count("3"), Ok(7));
        assert_eq!(schedule.is_playing("3", 3, "BOS"), Ok(true));
        assert_eq!(schedule.is_playing("3", 1, "BOS"), Ok(false));
        assert_eq!(schedule.is_playing("3", 1, "NYK"), Ok(true));

        let week = schedule.week("3").unwrap();
        assert_eq!(week.start_date(), Some("11/4/2024"));
        assert_eq!(week.game_count("BOS"), 2);
    }

    #[test]
    fn test_unknown_week_is_an_error() {
        let schedule = ScheduleIndex::new().with_week("1", WeekWindow::new(6));
        let err = schedule.week("2").unwrap_err();
        assert_eq!(
            err,
            ScheduleError::UnknownWeek {
                week: "2".to_owned()
            }
        );
        assert_eq!(err.to_string(), r#"week "2" is not in the schedule"#);
    }

    #[test]
    #[should_panic(expected = "outside week span")]
    fn test_day_out_of_range_panics() {
        let week = WeekWindow::new(3);
        let _ = week.is_playing(4, "BOS");
    }
}

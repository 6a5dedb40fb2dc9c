use rostream_engine::{Player, RosterSetup, WeekWindow};

/// Read-only inputs shared by every search operation.
///
/// Cheap to copy; worker threads each take their own copy.
#[derive(Debug, Clone, Copy)]
pub struct SearchContext<'a> {
    setup: &'a RosterSetup,
    week: &'a WeekWindow,
}

impl<'a> SearchContext<'a> {
    /// # Panics
    ///
    /// Panics if `setup` was prepared for a week of a different length.
    #[must_use]
    pub fn new(setup: &'a RosterSetup, week: &'a WeekWindow) -> Self {
        assert_eq!(
            setup.day_count(),
            week.day_count(),
            "roster setup and week window disagree on the number of days"
        );
        Self { setup, week }
    }

    #[must_use]
    pub fn setup(&self) -> &'a RosterSetup {
        self.setup
    }

    #[must_use]
    pub fn week(&self) -> &'a WeekWindow {
        self.week
    }

    #[must_use]
    pub fn day_count(&self) -> usize {
        self.week.day_count()
    }

    #[must_use]
    pub fn is_playing(&self, day: usize, player: &Player) -> bool {
        self.week.is_playing(day, &player.team)
    }
}

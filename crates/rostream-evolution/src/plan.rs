use std::collections::BTreeMap;

use rostream_engine::{Lineup, Player, Slot};
use serde::Serialize;

use crate::Gene;

/// A player as shown in a finished plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedPlayer {
    pub name: String,
    pub avg_points: f64,
    pub team: String,
}

impl From<&Player> for PlannedPlayer {
    fn from(player: &Player) -> Self {
        Self {
            name: player.name.clone(),
            avg_points: player.avg_points,
            team: player.team.clone(),
        }
    }
}

/// One day of a finished plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayPlan {
    pub day: usize,
    /// Every starting slot; `None` when nobody fills it.
    pub roster: BTreeMap<Slot, Option<PlannedPlayer>>,
    pub additions: Vec<PlannedPlayer>,
    pub removals: Vec<PlannedPlayer>,
}

impl DayPlan {
    /// Merges the core `lineup` with the streamers slotted in `gene`.
    #[must_use]
    pub fn new(lineup: &Lineup, gene: &Gene) -> Self {
        let mut roster = lineup
            .iter()
            .map(|(slot, p)| (slot, p.map(PlannedPlayer::from)))
            .collect::<BTreeMap<_, _>>();
        for (slot, p) in gene.occupied() {
            roster.insert(slot, Some(p.into()));
        }
        Self {
            day: gene.day(),
            roster,
            additions: gene.added().iter().map(PlannedPlayer::from).collect(),
            removals: gene.removed().iter().map(PlannedPlayer::from).collect(),
        }
    }

    /// Points scored by the players in starting slots.
    #[must_use]
    pub fn points(&self) -> f64 {
        self.roster.values().flatten().map(|p| p.avg_points).sum()
    }
}

/// The recommended streaming moves for one week.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreamingPlan {
    pub week: String,
    pub fitness: f64,
    /// Fitness gained over keeping the initial streamers all week.
    pub improvement: f64,
    pub total_acquisitions: usize,
    pub days: Vec<DayPlan>,
}

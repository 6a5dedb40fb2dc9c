use serde::{Deserialize, Serialize};

use super::slot::{Slot, SlotSet};

/// A rosterable player.
///
/// Players are plain values: every day of a plan holds its own copy, and the
/// player's `name` is the identity used for every membership test.
///
/// `positions` lists the starting slots the player may fill. Bench slots are
/// open to everyone and are never listed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub avg_points: f64,
    pub team: String,
    pub positions: SlotSet,
    #[serde(default)]
    pub injured: bool,
}

impl Player {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        avg_points: f64,
        team: impl Into<String>,
        positions: &[Slot],
    ) -> Self {
        Self {
            name: name.into(),
            avg_points,
            team: team.into(),
            positions: SlotSet::from_slots(positions).intersection(SlotSet::STARTING),
            injured: false,
        }
    }

    #[must_use]
    pub fn injured(mut self) -> Self {
        self.injured = true;
        self
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.name
    }

    /// Returns `true` if the player may occupy `slot`.
    #[must_use]
    pub fn plays(&self, slot: Slot) -> bool {
        slot.is_bench() || self.positions.contains(slot)
    }

    /// Slots this player may occupy, bench included.
    #[must_use]
    pub fn eligible_slots(&self) -> SlotSet {
        self.positions.union(SlotSet::BENCH)
    }
}

/// Orders players by projected points, lowest first.
#[must_use]
pub fn by_points(a: &Player, b: &Player) -> std::cmp::Ordering {
    a.avg_points.total_cmp(&b.avg_points)
}

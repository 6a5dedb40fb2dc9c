use std::collections::BTreeMap;

use serde::Serialize;

use super::{
    player::Player,
    slot::{Slot, SlotSet},
};

/// A single day's assignment of players to starting slots.
///
/// Every starting slot has an entry; empty slots are explicit `None`s.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(into = "BTreeMap<Slot, Option<Player>>")]
pub struct Lineup {
    slots: [Option<Player>; Slot::STARTING_LEN],
}

impl From<Lineup> for BTreeMap<Slot, Option<Player>> {
    fn from(lineup: Lineup) -> Self {
        Slot::STARTING.into_iter().zip(lineup.slots).collect()
    }
}

impl Lineup {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Panics
    ///
    /// Panics if `slot` is a bench slot.
    #[must_use]
    pub fn get(&self, slot: Slot) -> Option<&Player> {
        assert!(!slot.is_bench(), "bench slot {slot} has no lineup entry");
        self.slots[slot.index()].as_ref()
    }

    /// # Panics
    ///
    /// Panics if `slot` is a bench slot.
    pub fn set(&mut self, slot: Slot, player: Option<Player>) {
        assert!(!slot.is_bench(), "bench slot {slot} has no lineup entry");
        self.slots[slot.index()] = player;
    }

    /// Iterates over every starting slot with its occupant.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, Option<&Player>)> {
        Slot::STARTING
            .into_iter()
            .zip(self.slots.iter().map(Option::as_ref))
    }

    /// Iterates over occupied slots only.
    pub fn occupied(&self) -> impl Iterator<Item = (Slot, &Player)> {
        self.iter().filter_map(|(slot, p)| p.map(|p| (slot, p)))
    }

    /// Starting slots with nobody in them.
    #[must_use]
    pub fn unused_slots(&self) -> SlotSet {
        self.iter()
            .filter_map(|(slot, p)| p.is_none().then_some(slot))
            .collect()
    }

    #[must_use]
    pub fn points(&self) -> f64 {
        self.occupied().map(|(_, p)| p.avg_points).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unused_slots_tracks_assignments() {
        let mut lineup = Lineup::new();
        assert_eq!(lineup.unused_slots(), SlotSet::STARTING);

        lineup.set(
            Slot::Center,
            Some(Player::new("Big", 40.0, "DEN", &[Slot::Center])),
        );
        assert!(!lineup.unused_slots().contains(Slot::Center));
        assert_eq!(lineup.unused_slots().len(), Slot::STARTING_LEN - 1);
        assert!((lineup.points() - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_serializes_every_starting_slot() {
        let lineup = Lineup::new();
        let json = serde_json::to_value(&lineup).unwrap();
        let map = json.as_object().unwrap();
        assert_eq!(map.len(), Slot::STARTING_LEN);
        assert!(map["UT3"].is_null());
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};

/// A named roster position.
///
/// Variants are declared in descending restrictiveness order: the four rigid
/// positions first, then the guard/forward flex slots, center, the three utility
/// slots and finally the bench. Every ordered walk over slots in this crate follows
/// this declaration order.
///
/// # Example
///
/// ```
/// use rostream_engine::Slot;
///
/// assert!(Slot::PointGuard.weight() > Slot::Guard.weight());
/// assert!(Slot::Bench3.is_bench());
/// assert_eq!(Slot::Utility2.to_string(), "UT2");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Slot {
    #[serde(rename = "PG")]
    PointGuard = 0,
    #[serde(rename = "SG")]
    ShootingGuard = 1,
    #[serde(rename = "SF")]
    SmallForward = 2,
    #[serde(rename = "PF")]
    PowerForward = 3,
    #[serde(rename = "G")]
    Guard = 4,
    #[serde(rename = "F")]
    Forward = 5,
    #[serde(rename = "C")]
    Center = 6,
    #[serde(rename = "UT1")]
    Utility1 = 7,
    #[serde(rename = "UT2")]
    Utility2 = 8,
    #[serde(rename = "UT3")]
    Utility3 = 9,
    #[serde(rename = "BE1")]
    Bench1 = 10,
    #[serde(rename = "BE2")]
    Bench2 = 11,
    #[serde(rename = "BE3")]
    Bench3 = 12,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Slot {
    /// Number of slots in the catalog.
    pub const LEN: usize = 13;

    /// Number of starting (non-bench) slots.
    pub const STARTING_LEN: usize = 10;

    /// Every slot, most restrictive first.
    pub const ALL: [Self; Self::LEN] = [
        Self::PointGuard,
        Self::ShootingGuard,
        Self::SmallForward,
        Self::PowerForward,
        Self::Guard,
        Self::Forward,
        Self::Center,
        Self::Utility1,
        Self::Utility2,
        Self::Utility3,
        Self::Bench1,
        Self::Bench2,
        Self::Bench3,
    ];

    /// Starting slots, most restrictive first.
    pub const STARTING: [Self; Self::STARTING_LEN] = [
        Self::PointGuard,
        Self::ShootingGuard,
        Self::SmallForward,
        Self::PowerForward,
        Self::Guard,
        Self::Forward,
        Self::Center,
        Self::Utility1,
        Self::Utility2,
        Self::Utility3,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Restrictiveness weight used when scoring a lineup.
    ///
    /// Rigid positions weigh 5, guard/forward flex 4, center 3, utility 2, bench 1.
    #[must_use]
    pub const fn weight(self) -> u32 {
        match self {
            Self::PointGuard | Self::ShootingGuard | Self::SmallForward | Self::PowerForward => 5,
            Self::Guard | Self::Forward => 4,
            Self::Center => 3,
            Self::Utility1 | Self::Utility2 | Self::Utility3 => 2,
            Self::Bench1 | Self::Bench2 | Self::Bench3 => 1,
        }
    }

    #[must_use]
    pub const fn is_bench(self) -> bool {
        matches!(self, Self::Bench1 | Self::Bench2 | Self::Bench3)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PointGuard => "PG",
            Self::ShootingGuard => "SG",
            Self::SmallForward => "SF",
            Self::PowerForward => "PF",
            Self::Guard => "G",
            Self::Forward => "F",
            Self::Center => "C",
            Self::Utility1 => "UT1",
            Self::Utility2 => "UT2",
            Self::Utility3 => "UT3",
            Self::Bench1 => "BE1",
            Self::Bench2 => "BE2",
            Self::Bench3 => "BE3",
        }
    }

    const fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

const STARTING_MASK: u16 = (1 << Slot::STARTING_LEN) - 1;
const ALL_MASK: u16 = (1 << Slot::LEN) - 1;

/// Set of slots stored as a 16-bit mask.
///
/// Bit `n` corresponds to the slot whose discriminant is `n`, so iteration yields
/// slots most restrictive first. Used both for a player's eligibility and for the
/// free slots of a day's roster.
///
/// # Example
///
/// ```
/// use rostream_engine::{Slot, SlotSet};
///
/// let mut free = SlotSet::from_slots(&[Slot::Utility1, Slot::Guard]);
/// assert_eq!(free.iter().collect::<Vec<_>>(), [Slot::Guard, Slot::Utility1]);
///
/// free.remove(Slot::Guard);
/// assert_eq!(free.len(), 1);
/// ```
#[derive(Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Slot>", into = "Vec<Slot>")]
pub struct SlotSet {
    bits: u16,
}

impl fmt::Debug for SlotSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl SlotSet {
    pub const EMPTY: Self = Self { bits: 0 };
    pub const STARTING: Self = Self {
        bits: STARTING_MASK,
    };
    pub const BENCH: Self = Self {
        bits: ALL_MASK & !STARTING_MASK,
    };

    #[must_use]
    pub const fn from_slots(slots: &[Slot]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < slots.len() {
            bits |= slots[i].bit();
            i += 1;
        }
        Self { bits }
    }

    #[inline]
    #[must_use]
    pub const fn contains(self, slot: Slot) -> bool {
        (self.bits & slot.bit()) != 0
    }

    /// Adds a slot, returning `true` if it was not already present.
    #[inline]
    pub fn insert(&mut self, slot: Slot) -> bool {
        let added = !self.contains(slot);
        self.bits |= slot.bit();
        added
    }

    /// Removes a slot, returning `true` if it was present.
    #[inline]
    pub fn remove(&mut self, slot: Slot) -> bool {
        let removed = self.contains(slot);
        self.bits &= !slot.bit();
        removed
    }

    #[inline]
    #[must_use]
    pub const fn len(self) -> usize {
        self.bits.count_ones() as usize
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    #[inline]
    #[must_use]
    pub const fn intersection(self, other: Self) -> Self {
        Self {
            bits: self.bits & other.bits,
        }
    }

    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    #[inline]
    #[must_use]
    pub const fn difference(self, other: Self) -> Self {
        Self {
            bits: self.bits & !other.bits,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_disjoint(self, other: Self) -> bool {
        (self.bits & other.bits) == 0
    }

    /// Returns the most restrictive slot in the set.
    #[must_use]
    pub fn first(self) -> Option<Slot> {
        self.iter().next()
    }

    /// Iterates over the slots in the set, most restrictive first.
    pub fn iter(self) -> impl Iterator<Item = Slot> {
        Slot::ALL.into_iter().filter(move |slot| self.contains(*slot))
    }
}

impl FromIterator<Slot> for SlotSet {
    fn from_iter<T: IntoIterator<Item = Slot>>(iter: T) -> Self {
        let mut set = Self::EMPTY;
        for slot in iter {
            set.insert(slot);
        }
        set
    }
}

impl From<Vec<Slot>> for SlotSet {
    fn from(slots: Vec<Slot>) -> Self {
        slots.into_iter().collect()
    }
}

impl From<SlotSet> for Vec<Slot> {
    fn from(set: SlotSet) -> Self {
        set.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_ordered_by_restrictiveness() {
        assert!(Slot::ALL.windows(2).all(|w| w[0].weight() >= w[1].weight()));
        assert_eq!(Slot::ALL[..Slot::STARTING_LEN], Slot::STARTING);
        assert!(Slot::STARTING.iter().all(|slot| !slot.is_bench()));
    }

    #[test]
    fn test_slot_set_iterates_most_restrictive_first() {
        let set = SlotSet::from_slots(&[Slot::Utility3, Slot::Center, Slot::PointGuard]);
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            [Slot::PointGuard, Slot::Center, Slot::Utility3]
        );
        assert_eq!(set.first(), Some(Slot::PointGuard));
    }

    #[test]
    fn test_slot_set_insert_remove() {
        let mut set = SlotSet::EMPTY;
        assert!(set.insert(Slot::Guard));
        assert!(!set.insert(Slot::Guard));
        assert_eq!(set.len(), 1);
        assert!(set.remove(Slot::Guard));
        assert!(!set.remove(Slot::Guard));
        assert!(set.is_empty());
    }

    #[test]
    fn test_starting_and_bench_partition_catalog() {
        assert_eq!(SlotSet::STARTING.len(), Slot::STARTING_LEN);
        assert_eq!(SlotSet::BENCH.len(), Slot::LEN - Slot::STARTING_LEN);
        assert!(SlotSet::STARTING.is_disjoint(SlotSet::BENCH));
        assert!(SlotSet::BENCH.iter().all(Slot::is_bench));
    }

    #[test]
    fn test_slot_set_serializes_as_names() {
        let set = SlotSet::from_slots(&[Slot::Forward, Slot::Utility1]);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["F","UT1"]"#);
        let back: SlotSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }
}

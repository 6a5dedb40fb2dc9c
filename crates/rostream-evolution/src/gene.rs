//! One day of a streaming plan.
//!
//! A [`Gene`] holds only the streaming side of a day's roster: core players are fixed
//! by [`RosterSetup`](rostream_engine::RosterSetup) and never appear here. The
//! starting slots a gene may hand out are the ones the core lineup left unused that
//! day; streamers who cannot get one sit on the [`Bench`].

use rand::{Rng, seq::IndexedRandom};
use rostream_engine::{Player, Slot, SlotSet};

use crate::{Bench, Cooldowns, SearchContext};

/// Random draws allowed when looking for an eligible free agent.
pub const FREE_AGENT_TRIES: usize = 25;

#[derive(Debug, Clone, PartialEq)]
pub struct Gene {
    day: usize,
    roster: [Option<Player>; Slot::STARTING_LEN],
    free: SlotSet,
    bench: Bench,
    added: Vec<Player>,
    removed: Vec<Player>,
}

impl Gene {
    /// Creates an empty gene for `day` with no free slots.
    #[must_use]
    pub fn new(day: usize) -> Self {
        Self {
            day,
            roster: Default::default(),
            free: SlotSet::EMPTY,
            bench: Bench::new(),
            added: vec![],
            removed: vec![],
        }
    }

    /// Opens the slots the core lineup leaves unused and slots the initial
    /// streaming pool, in pool order.
    pub fn insert_streamers(&mut self, ctx: SearchContext<'_>) {
        self.free = ctx
            .setup()
            .unused_slots(self.day)
            .difference(self.occupied_slots());
        for streamer in ctx.setup().streamers() {
            self.slot(ctx, streamer.clone());
        }
    }

    /// Places `player` in the most restrictive free slot the player is eligible for.
    ///
    /// Players who do not play today, or fit no free slot, go to the bench.
    /// Returns the slot taken, `None` when benched.
    pub fn slot(&mut self, ctx: SearchContext<'_>, player: Player) -> Option<Slot> {
        let slot = ctx
            .is_playing(self.day, &player)
            .then(|| player.positions.intersection(self.free).first())
            .flatten();
        match slot {
            Some(slot) => {
                self.free.remove(slot);
                self.roster[slot.index()] = Some(player);
            }
            None => self.bench.insert(player),
        }
        slot
    }

    /// Takes `id` off the bench or out of the occupied slot, freeing the slot.
    ///
    /// Returns `false` if the player is not in this gene.
    pub fn remove(&mut self, id: &str) -> bool {
        if self.bench.remove(id).is_some() {
            return true;
        }
        match self.slot_of(id) {
            Some(slot) => {
                self.roster[slot.index()] = None;
                self.free.insert(slot);
                true
            }
            None => false,
        }
    }

    /// Removes and returns the lowest-scoring bench player.
    pub fn drop_worst_bench(&mut self) -> Option<Player> {
        self.bench.pop_worst()
    }

    /// Draws random free agents until one can join today's roster.
    ///
    /// A candidate is rejected when idle today, injured, listed in `rostered`, cooling
    /// down or already in this gene. A candidate is accepted when one of the listed
    /// positions is free, counting the slot `replacing` would give up.
    /// Returns `None` after [`FREE_AGENT_TRIES`] rejected draws.
    pub fn find_free_agent<R>(
        &self,
        ctx: SearchContext<'_>,
        rostered: &[Player],
        cooldowns: &Cooldowns,
        rng: &mut R,
        replacing: Option<&Player>,
    ) -> Option<Player>
    where
        R: Rng + ?Sized,
    {
        let pool = ctx.setup().free_agents();
        let mut open = self.free;
        if let Some(slot) = replacing.and_then(|p| self.slot_of(p.id())) {
            open.insert(slot);
        }

        for _ in 0..FREE_AGENT_TRIES {
            let candidate = pool.choose(rng)?;
            if candidate.injured || !ctx.is_playing(self.day, candidate) {
                continue;
            }
            let id = candidate.id();
            if rostered.iter().any(|p| p.id() == id)
                || cooldowns.is_cooling(id)
                || replacing.is_some_and(|p| p.id() == id)
                || self.contains(id)
            {
                continue;
            }
            if !candidate.positions.is_disjoint(open) {
                return Some(candidate.clone());
            }
        }
        log::trace!("day {}: no eligible free agent found", self.day);
        None
    }

    #[must_use]
    pub fn day(&self) -> usize {
        self.day
    }

    /// Starting slot occupied by `id`, if any.
    #[must_use]
    pub fn slot_of(&self, id: &str) -> Option<Slot> {
        self.occupied()
            .find_map(|(slot, p)| (p.id() == id).then_some(slot))
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.bench.contains(id) || self.slot_of(id).is_some()
    }

    #[must_use]
    pub fn get(&self, slot: Slot) -> Option<&Player> {
        self.roster.get(slot.index()).and_then(Option::as_ref)
    }

    /// Slotted streamers, most restrictive slot first.
    pub fn occupied(&self) -> impl Iterator<Item = (Slot, &Player)> {
        Slot::STARTING
            .into_iter()
            .zip(&self.roster)
            .filter_map(|(slot, p)| p.as_ref().map(|p| (slot, p)))
    }

    /// Every player in this gene, slotted first, then the bench.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.occupied().map(|(_, p)| p).chain(self.bench.iter())
    }

    #[must_use]
    pub fn free(&self) -> SlotSet {
        self.free
    }

    #[must_use]
    pub fn bench(&self) -> &Bench {
        &self.bench
    }

    #[must_use]
    pub fn added(&self) -> &[Player] {
        &self.added
    }

    #[must_use]
    pub fn removed(&self) -> &[Player] {
        &self.removed
    }

    #[must_use]
    pub fn acquisitions(&self) -> usize {
        self.added.len()
    }

    /// Points scored today by slotted streamers.
    #[must_use]
    pub fn points(&self) -> f64 {
        self.occupied().map(|(_, p)| p.avg_points).sum()
    }

    fn occupied_slots(&self) -> SlotSet {
        self.occupied().map(|(slot, _)| slot).collect()
    }

    pub(crate) fn record_addition(&mut self, player: Player) {
        self.added.push(player);
    }

    pub(crate) fn record_removal(&mut self, player: Player) {
        self.removed.push(player);
    }

    /// Rewrites the addition of `old` to `new`. Returns `false` if `old` was not added today.
    pub(crate) fn replace_addition(&mut self, old: &str, new: Player) -> bool {
        replace_by_id(&mut self.added, old, new)
    }

    /// Rewrites the removal of `old` to `new`. Returns `false` if `old` was not removed today.
    pub(crate) fn replace_removal(&mut self, old: &str, new: Player) -> bool {
        replace_by_id(&mut self.removed, old, new)
    }
}

fn replace_by_id(players: &mut [Player], old: &str, new: Player) -> bool {
    match players.iter_mut().find(|p| p.id() == old) {
        Some(entry) => {
            *entry = new;
            true
        }
        None => false,
    }
}

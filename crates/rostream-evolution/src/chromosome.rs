//! A candidate streaming plan for a whole week.
//!
//! A [`Chromosome`] is one [`Gene`] per day plus the state that threads the days
//! together:
//!
//! - `streamers`: the active streaming pool. Its length never changes; index `i`
//!   always names whoever currently holds streaming spot `i`.
//! - `cooldowns`: players dropped recently, who may not be re-added yet.
//! - `total_acquisitions`: the number of adds over the week.
//!
//! Swapping a streamer for a free agent on day `d` rewrites every gene from `d` to
//! the end of the week, so for any day not yet processed the genes hold exactly the
//! active streamers.

use std::collections::HashSet;

use rand::{Rng, seq::IndexedRandom};
use rostream_engine::{Player, by_points};

use crate::{COOLDOWN_DAYS, Cooldowns, Gene, SearchContext, plan::DayPlan};

/// Base of the exponential penalty applied to acquisitions over the weekly allowance.
pub const ACQUISITION_PENALTY_BASE: f64 = 1.3;

/// Result of a successful [`Chromosome::mutate`].
#[derive(Debug, Clone, PartialEq)]
pub struct MutationRecord {
    /// First day of the rewritten interval (the day `dropped` was added).
    pub start: usize,
    /// First day after the interval.
    pub end: usize,
    pub dropped: Player,
    pub added: Player,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chromosome {
    genes: Vec<Gene>,
    streamers: Vec<Player>,
    cooldowns: Cooldowns,
    total_acquisitions: usize,
    fitness: f64,
    cumulative_weight: f64,
}

impl Chromosome {
    /// Creates a plan with no acquisitions: every day holds the initial streaming
    /// pool, slotted greedily.
    #[must_use]
    pub fn new(ctx: SearchContext<'_>) -> Self {
        let genes = (0..ctx.day_count())
            .map(|day| {
                let mut gene = Gene::new(day);
                gene.insert_streamers(ctx);
                gene
            })
            .collect();
        Self {
            genes,
            streamers: ctx.setup().streamers().to_vec(),
            cooldowns: Cooldowns::new(),
            total_acquisitions: 0,
            fitness: 0.0,
            cumulative_weight: 0.0,
        }
    }

    /// Creates the zero-acquisition plan, scored.
    #[must_use]
    pub fn baseline(ctx: SearchContext<'_>) -> Self {
        let mut chromosome = Self::new(ctx);
        chromosome.score_fitness(ctx);
        chromosome
    }

    /// Fills the week with random acquisitions.
    ///
    /// Every day draws a target of 0 to 3 adds, biased toward 1, and clips it to
    /// what the day allows. A day stops adding at the first failed free-agent draw.
    pub fn populate<R>(&mut self, ctx: SearchContext<'_>, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        for day in 0..self.genes.len() {
            let mut target = rng.random_range(0..5) / 2 + rng.random_range(0..2);
            target = target.min(ctx.setup().unused_slots(day).len());
            if day == 0 {
                // a streamer who plays on the first day cannot be dropped that day
                target = target.min(self.genes[0].bench().len());
            }
            if self.genes[day].free().is_empty() {
                target = 0;
            }
            target = target.min(self.streamers.len());

            let before = self.streamers.clone();
            for _ in 0..target {
                let Some(agent) = self.genes[day].find_free_agent(
                    ctx,
                    &self.streamers,
                    &self.cooldowns,
                    rng,
                    None,
                ) else {
                    break;
                };
                self.insert_free_agent(ctx, day, agent);
            }
            self.record_transactions(day, &before);
            self.cooldowns.tick();
        }
    }

    /// Adds `agent` on `day` in place of one of the active streamers.
    ///
    /// On the first day, or whenever somebody sits on the bench, the worst bench
    /// player is dropped. Otherwise the roster is full and the weakest streamer the
    /// agent can stand in for is dropped (see [`Self::find_streamer_to_drop`]).
    /// The agent is then slotted into every day from `day` on.
    ///
    /// Returns `false`, leaving the chromosome untouched, if nobody can be dropped.
    pub fn insert_free_agent(
        &mut self,
        ctx: SearchContext<'_>,
        day: usize,
        agent: Player,
    ) -> bool {
        let dropped = if day == 0 || !self.genes[day].bench().is_empty() {
            self.genes[day].drop_worst_bench()
        } else {
            self.find_streamer_to_drop(day, &agent)
                .map(|i| self.streamers[i].clone())
        };
        let Some(dropped) = dropped else {
            log::trace!("day {day}: no streamer to drop for {}", agent.name);
            return false;
        };

        self.remove_streamer(day, agent.clone(), &dropped);
        self.slot_forward(ctx, day, &agent);
        true
    }

    /// Index of the streamer `agent` should replace on `day`.
    ///
    /// If one of the agent's positions is free that day, the weakest active streamer
    /// goes. Otherwise it is the weakest streamer slotted that day in a position the
    /// agent can fill. Ties go to the lower index.
    #[must_use]
    pub fn find_streamer_to_drop(&self, day: usize, agent: &Player) -> Option<usize> {
        let gene = &self.genes[day];
        if !agent.positions.is_disjoint(gene.free()) {
            return self
                .streamers
                .iter()
                .enumerate()
                .min_by(|(_, a), (_, b)| by_points(a, b))
                .map(|(i, _)| i);
        }

        let mut by_weakest = (0..self.streamers.len()).collect::<Vec<_>>();
        by_weakest.sort_by(|&a, &b| by_points(&self.streamers[a], &self.streamers[b]));
        by_weakest.into_iter().find(|&i| {
            gene.slot_of(self.streamers[i].id())
                .is_some_and(|slot| agent.plays(slot))
        })
    }

    /// Takes `old` out of every gene from `day` on and gives the streaming spot to `new`.
    pub fn remove_streamer(&mut self, day: usize, new: Player, old: &Player) {
        for gene in &mut self.genes[day..] {
            gene.remove(old.id());
        }
        if let Some(entry) = self.streamers.iter_mut().find(|p| p.id() == old.id()) {
            *entry = new;
        }
    }

    /// Slots `player` into every gene from `start` to the end of the week.
    pub fn slot_forward(&mut self, ctx: SearchContext<'_>, start: usize, player: &Player) {
        for gene in &mut self.genes[start..] {
            gene.slot(ctx, player.clone());
        }
    }

    /// With probability `probability`, swaps one acquisition for another free agent.
    ///
    /// A random day with at least one add is picked, then a random player added that
    /// day. For the days that player stays rostered a replacement free agent takes the
    /// spot. The replacement may not be an active streamer, anyone on the roster from
    /// the first day of the interval until a cooldown after it ends, nor anyone still
    /// cooling down on the first day.
    ///
    /// The replaced player is not put on cooldown.
    ///
    /// # Panics
    ///
    /// Panics if `probability` is outside `0.0..=1.0`.
    pub fn mutate<R>(
        &mut self,
        ctx: SearchContext<'_>,
        probability: f64,
        rng: &mut R,
    ) -> Option<MutationRecord>
    where
        R: Rng + ?Sized,
    {
        if !rng.random_bool(probability) {
            return None;
        }

        let days = self
            .genes
            .iter()
            .filter(|gene| gene.acquisitions() > 0)
            .map(Gene::day)
            .collect::<Vec<_>>();
        let start = *days.choose(rng)?;
        let dropped = self.genes[start].added().choose(rng)?.clone();
        let len = self.genes.len();
        let end = (start..len)
            .find(|&day| !self.genes[day].contains(dropped.id()))
            .unwrap_or(len);
        if end == start {
            return None;
        }

        // the replacement is dropped on `end`, so it must stay away for a cooldown
        let horizon = len.min(end + usize::from(COOLDOWN_DAYS));
        let mut rostered = self.streamers.clone();
        for gene in &self.genes[start..horizon] {
            rostered.extend(gene.players().cloned());
        }
        let added = self.genes[start].find_free_agent(
            ctx,
            &rostered,
            &self.cooldowns_on(start),
            rng,
            Some(&dropped),
        )?;

        for gene in &mut self.genes[start..end] {
            gene.remove(dropped.id());
            gene.slot(ctx, added.clone());
        }
        self.genes[start].replace_addition(dropped.id(), added.clone());
        if end < len {
            self.genes[end].replace_removal(dropped.id(), added.clone());
        } else if let Some(entry) = self.streamers.iter_mut().find(|p| p.id() == dropped.id()) {
            *entry = added.clone();
        }

        log::trace!(
            "mutated days {start}..{end}: {} -> {}",
            dropped.name,
            added.name
        );
        Some(MutationRecord {
            start,
            end,
            dropped,
            added,
        })
    }

    /// Scores slotted streamer points over the week, penalized for churn.
    ///
    /// Up to `game_span + 1` acquisitions are free; every one beyond divides the
    /// score by [`ACQUISITION_PENALTY_BASE`].
    pub fn score_fitness(&mut self, ctx: SearchContext<'_>) -> f64 {
        let points = self.genes.iter().map(Gene::points).sum::<f64>();
        let allowance = ctx.setup().game_span() + 1;
        let excess = self.total_acquisitions.saturating_sub(allowance);
        let excess = i32::try_from(excess).unwrap_or(i32::MAX);
        self.fitness = points / ACQUISITION_PENALTY_BASE.powi(excess);
        self.fitness
    }

    /// Reconstitutes each day's full roster: core lineup plus slotted streamers.
    #[must_use]
    pub fn project(&self, ctx: SearchContext<'_>) -> Vec<DayPlan> {
        self.genes
            .iter()
            .map(|gene| DayPlan::new(ctx.setup().lineup(gene.day()), gene))
            .collect()
    }

    /// Diffs the active streamers against `before`: departures are put on cooldown
    /// and recorded as removals on `day`, arrivals as additions.
    pub(crate) fn record_transactions(&mut self, day: usize, before: &[Player]) {
        let now = self.streamers.iter().map(Player::id).collect::<HashSet<_>>();
        let then = before.iter().map(Player::id).collect::<HashSet<_>>();

        for old in before.iter().filter(|p| !now.contains(p.id())) {
            self.cooldowns.start(old.id());
            self.genes[day].record_removal(old.clone());
        }
        for new in self.streamers.iter().filter(|p| !then.contains(p.id())) {
            self.genes[day].record_addition(new.clone());
            self.total_acquisitions += 1;
        }
    }

    /// Cooldowns in force while `day` is planned, counting that day's own drops.
    fn cooldowns_on(&self, day: usize) -> Cooldowns {
        let first = (day + 1).saturating_sub(usize::from(COOLDOWN_DAYS));
        let mut cooldowns = Cooldowns::new();
        for gene in &self.genes[first..=day] {
            for player in gene.removed() {
                cooldowns.start(player.id());
            }
        }
        cooldowns
    }

    pub(crate) fn tick_cooldowns(&mut self) {
        self.cooldowns.tick();
    }

    pub(crate) fn set_cumulative_weight(&mut self, weight: f64) {
        self.cumulative_weight = weight;
    }

    #[cfg(test)]
    pub(crate) fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }

    #[must_use]
    pub fn genes(&self) -> &[Gene] {
        &self.genes
    }

    #[must_use]
    pub fn streamers(&self) -> &[Player] {
        &self.streamers
    }

    #[must_use]
    pub fn is_active(&self, id: &str) -> bool {
        self.streamers.iter().any(|p| p.id() == id)
    }

    #[must_use]
    pub fn cooldowns(&self) -> &Cooldowns {
        &self.cooldowns
    }

    #[must_use]
    pub fn total_acquisitions(&self) -> usize {
        self.total_acquisitions
    }

    /// Fitness as of the last [`Self::score_fitness`].
    #[must_use]
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    #[must_use]
    pub fn cumulative_weight(&self) -> f64 {
        self.cumulative_weight
    }
}

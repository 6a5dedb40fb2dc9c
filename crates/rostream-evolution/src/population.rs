//! Generational evolution of streaming plans.
//!
//! # Generation
//!
//! [`EvolutionManager::evolve`] replaces a population in one step:
//!
//! 1. **Rank** - sort ascending by fitness; rank `i` of `N` gets the marginal weight
//!    `(i / N)^1.5 + 0.02`, accumulated into each chromosome's cumulative weight
//! 2. **Elitism** - the fittest chromosome moves on unchanged
//! 3. **Selection** - the first parent is drawn by roulette wheel over the cumulative
//!    weights; the second holds a fixed low rank (`tournament_rank`) in a small random
//!    tournament, picked among several such tournaments
//! 4. **Crossover** - the child takes, day by day, a random share of the best
//!    additions either parent made that day
//! 5. **Mutation** - the child swaps one of its acquisitions with probability
//!    `mutation_probability`, then is scored
//!
//! Taking a low tournament rank instead of the winner keeps the small populations
//! used here from collapsing onto one plan.
//!
//! # Parallelization
//!
//! [`EvolutionManager::init_population`] builds every chromosome on its own scoped
//! thread with its own RNG seeded from the caller's. Generations themselves run on
//! the calling thread.

use std::thread;

use rand::{Rng, SeedableRng, seq::IndexedRandom};
use rand_pcg::Pcg32;
use rostream_engine::by_points;

use crate::{Chromosome, Gene, SearchContext};

/// A set of chromosomes evolved together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Population {
    individuals: Vec<Chromosome>,
}

/// Fitness spread of a population.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitnessSummary {
    pub min: f64,
    pub mean: f64,
    pub max: f64,
}

impl Population {
    #[must_use]
    pub fn new(individuals: Vec<Chromosome>) -> Self {
        Self { individuals }
    }

    /// Concatenates several populations into one, in order.
    #[must_use]
    pub fn merge<I>(populations: I) -> Self
    where
        I: IntoIterator<Item = Population>,
    {
        let individuals = populations
            .into_iter()
            .flat_map(|p| p.individuals)
            .collect();
        Self { individuals }
    }

    #[must_use]
    pub fn individuals(&self) -> &[Chromosome] {
        &self.individuals
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Sorts ascending by fitness (fittest last).
    pub fn sort_by_fitness(&mut self) {
        self.individuals
            .sort_by(|a, b| a.fitness().total_cmp(&b.fitness()));
    }

    /// Fittest chromosome; the last one wins ties.
    #[must_use]
    pub fn best(&self) -> Option<&Chromosome> {
        self.individuals
            .iter()
            .max_by(|a, b| a.fitness().total_cmp(&b.fitness()))
    }

    /// Fittest chromosome making at most `max_acquisitions` adds.
    #[must_use]
    pub fn best_within(&self, max_acquisitions: usize) -> Option<&Chromosome> {
        self.individuals
            .iter()
            .filter(|c| c.total_acquisitions() <= max_acquisitions)
            .max_by(|a, b| a.fitness().total_cmp(&b.fitness()))
    }

    #[must_use]
    pub fn fitness_summary(&self) -> Option<FitnessSummary> {
        if self.individuals.is_empty() {
            return None;
        }
        let fitness = self.individuals.iter().map(Chromosome::fitness);
        let min = fitness.clone().fold(f64::INFINITY, f64::min);
        let max = fitness.clone().fold(f64::NEG_INFINITY, f64::max);
        #[expect(clippy::cast_precision_loss)]
        let mean = fitness.sum::<f64>() / self.individuals.len() as f64;
        Some(FitnessSummary { min, mean, max })
    }

    /// Assigns every chromosome its cumulative roulette weight.
    ///
    /// Expects the population sorted ascending by fitness.
    fn assign_cumulative_weights(&mut self) {
        #[expect(clippy::cast_precision_loss)]
        let n = self.individuals.len() as f64;
        let mut cumulative = 0.0;
        for (rank, chromosome) in self.individuals.iter_mut().enumerate() {
            #[expect(clippy::cast_precision_loss)]
            let share = (rank as f64 / n).powf(1.5) + 0.02;
            cumulative += share;
            chromosome.set_cumulative_weight(cumulative);
        }
    }
}

/// Controls how a population evolves from one generation to the next.
#[derive(Debug, Clone)]
pub struct EvolutionManager {
    /// Probability that a child is mutated
    pub mutation_probability: f64,
    /// Number of tournaments held when selecting the second parent
    pub tournament_count: usize,
    /// Chromosomes drawn (with replacement) into each tournament
    pub tournament_size: usize,
    /// Position taken from each tournament sorted ascending by fitness (0 = least fit)
    pub tournament_rank: usize,
}

impl Default for EvolutionManager {
    fn default() -> Self {
        Self {
            mutation_probability: 0.2,
            tournament_count: 3,
            tournament_size: 5,
            tournament_rank: 1,
        }
    }
}

impl EvolutionManager {
    /// Builds `size` populated and scored chromosomes concurrently.
    pub fn init_population<R>(
        &self,
        ctx: SearchContext<'_>,
        size: usize,
        rng: &mut R,
    ) -> Population
    where
        R: Rng + ?Sized,
    {
        let seeds = (0..size).map(|_| rng.random()).collect::<Vec<u64>>();
        let mut individuals = (0..size).map(|_| None).collect::<Vec<_>>();
        thread::scope(|s| {
            for (slot, seed) in individuals.iter_mut().zip(seeds) {
                s.spawn(move || {
                    let mut rng = Pcg32::seed_from_u64(seed);
                    let mut chromosome = Chromosome::new(ctx);
                    chromosome.populate(ctx, &mut rng);
                    chromosome.score_fitness(ctx);
                    *slot = Some(chromosome);
                });
            }
        });
        Population::new(individuals.into_iter().flatten().collect())
    }

    /// Produces the next generation: the current fittest plus `N - 1` children.
    ///
    /// # Panics
    ///
    /// Panics if the population is empty.
    #[must_use]
    pub fn evolve<R>(
        &self,
        ctx: SearchContext<'_>,
        mut population: Population,
        rng: &mut R,
    ) -> Population
    where
        R: Rng + ?Sized,
    {
        assert!(!population.is_empty(), "cannot evolve an empty population");
        population.sort_by_fitness();
        population.assign_cumulative_weights();

        let size = population.len();
        let mut next = Vec::with_capacity(size);
        for _ in 1..size {
            let p1 = select_roulette(&population.individuals, rng);
            let p2 = self.select_tournament(&population.individuals, rng);
            let mut child = self.crossover(ctx, p1, p2, rng);
            child.mutate(ctx, self.mutation_probability, rng);
            child.score_fitness(ctx);
            next.push(child);
        }

        let elite = population.individuals.pop();
        next.extend(elite);
        Population::new(next)
    }

    /// Builds a child from scratch, mixing in the parents' additions day by day.
    ///
    /// # Panics
    ///
    /// Panics if the parents do not span the same week as `ctx`.
    #[must_use]
    pub fn crossover<R>(
        &self,
        ctx: SearchContext<'_>,
        parent1: &Chromosome,
        parent2: &Chromosome,
        rng: &mut R,
    ) -> Chromosome
    where
        R: Rng + ?Sized,
    {
        let mut child = Chromosome::new(ctx);
        for (day, (g1, g2)) in parent1.genes().iter().zip(parent2.genes()).enumerate() {
            let before = child.streamers().to_vec();
            mix_genes(ctx, &mut child, day, g1, g2, rng);
            child.record_transactions(day, &before);
            child.tick_cooldowns();
        }
        child
    }

    /// Entrant at `tournament_rank` of each of `tournament_count` random tournaments,
    /// then one of those at random.
    ///
    /// A rank past the end of a tournament picks its fittest entrant.
    fn select_tournament<'a, R>(
        &self,
        individuals: &'a [Chromosome],
        rng: &mut R,
    ) -> &'a Chromosome
    where
        R: Rng + ?Sized,
    {
        assert!(self.tournament_count > 0 && self.tournament_size > 0);
        let picks = (0..self.tournament_count)
            .map(|_| {
                let mut tournament = (0..self.tournament_size)
                    .filter_map(|_| individuals.choose(rng))
                    .collect::<Vec<_>>();
                tournament.sort_by(|a, b| a.fitness().total_cmp(&b.fitness()));
                tournament[self.tournament_rank.min(tournament.len() - 1)]
            })
            .collect::<Vec<_>>();
        picks.choose(rng).copied().unwrap()
    }
}

/// Roulette-wheel pick over cumulative weights.
///
/// Expects weights assigned by [`Population::assign_cumulative_weights`].
fn select_roulette<'a, R>(individuals: &'a [Chromosome], rng: &mut R) -> &'a Chromosome
where
    R: Rng + ?Sized,
{
    let last = individuals.last().unwrap();
    let target = rng.random_range(0.0..last.cumulative_weight());
    individuals
        .iter()
        .find(|c| c.cumulative_weight() >= target)
        .unwrap_or(last)
}

/// Offers `child` the best additions either parent made on `day`.
///
/// Candidates are taken best first; how many is random, biased toward most of them.
/// Players cooling down or already active in the child are skipped.
fn mix_genes<R>(
    ctx: SearchContext<'_>,
    child: &mut Chromosome,
    day: usize,
    g1: &Gene,
    g2: &Gene,
    rng: &mut R,
) where
    R: Rng + ?Sized,
{
    let mut candidates = g1.added().iter().chain(g2.added()).collect::<Vec<_>>();
    if candidates.is_empty() {
        return;
    }
    candidates.sort_by(|a, b| by_points(b, a));

    let count = rng.random_range(0..candidates.len()) + rng.random_range(0..2);
    for agent in candidates.into_iter().take(count) {
        if child.cooldowns().is_cooling(agent.id()) || child.is_active(agent.id()) {
            continue;
        }
        child.insert_free_agent(ctx, day, agent.clone());
    }
}

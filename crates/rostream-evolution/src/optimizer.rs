//! End-to-end search for a week's streaming plan.
//!
//! Several islands evolve independently on their own threads, then merge into one
//! population that keeps evolving. The best plan within the acquisition allowance is
//! projected into a [`StreamingPlan`].

use std::thread;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::{Chromosome, EvolutionManager, Population, SearchContext, StreamingPlan};

/// Sizes and generation counts of a search.
#[derive(Debug, Clone)]
pub struct SearchParams {
    /// Chromosomes per island
    pub population_size: usize,
    /// Independently evolved sub-populations
    pub island_count: usize,
    /// Generations each island evolves before merging
    pub island_generations: usize,
    /// Generations the merged population evolves
    pub merged_generations: usize,
    /// Probability that a child is mutated
    pub mutation_probability: f64,
}

impl SearchParams {
    pub const DEFAULT: Self = Self {
        population_size: 20,
        island_count: 2,
        island_generations: 10,
        merged_generations: 10,
        mutation_probability: 0.2,
    };
}

impl Default for SearchParams {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone, Default)]
pub struct StreamingOptimizer {
    params: SearchParams,
}

impl StreamingOptimizer {
    #[must_use]
    pub fn new(params: SearchParams) -> Self {
        Self { params }
    }

    #[must_use]
    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    /// Runs the full search and returns the recommended plan.
    ///
    /// # Panics
    ///
    /// Panics if `population_size` or `island_count` is zero, or
    /// `mutation_probability` is outside `0.0..=1.0`.
    pub fn optimize<R>(&self, ctx: SearchContext<'_>, rng: &mut R) -> StreamingPlan
    where
        R: Rng + ?Sized,
    {
        let params = &self.params;
        assert!(params.population_size > 0, "population size must be positive");
        assert!(params.island_count > 0, "island count must be positive");
        let manager = EvolutionManager {
            mutation_probability: params.mutation_probability,
            ..EvolutionManager::default()
        };

        log::info!(
            "week {}: evolving {} islands of {} for {} generations",
            ctx.setup().week_id(),
            params.island_count,
            params.population_size,
            params.island_generations
        );
        let seeds = (0..params.island_count)
            .map(|_| rng.random())
            .collect::<Vec<u64>>();
        let mut islands = (0..params.island_count)
            .map(|_| Population::default())
            .collect::<Vec<_>>();
        thread::scope(|s| {
            for (island, (population, seed)) in islands.iter_mut().zip(seeds).enumerate() {
                let manager = &manager;
                s.spawn(move || {
                    let mut rng = Pcg32::seed_from_u64(seed);
                    let mut current =
                        manager.init_population(ctx, params.population_size, &mut rng);
                    for generation in 0..params.island_generations {
                        current = manager.evolve(ctx, current, &mut rng);
                        log_generation(&format!("island {island}"), generation, &current);
                    }
                    *population = current;
                });
            }
        });

        let mut merged = Population::merge(islands);
        log::info!(
            "merged {} chromosomes; evolving for {} generations",
            merged.len(),
            params.merged_generations
        );
        for generation in 0..params.merged_generations {
            merged = manager.evolve(ctx, merged, rng);
            log_generation("merged", generation, &merged);
        }

        let allowance = ctx.setup().game_span() + 1;
        let best = merged
            .best_within(allowance)
            .or_else(|| merged.best())
            .expect("merged population is not empty");
        let baseline = Chromosome::baseline(ctx);
        let plan = StreamingPlan {
            week: ctx.setup().week_id().to_owned(),
            fitness: best.fitness(),
            improvement: best.fitness() - baseline.fitness(),
            total_acquisitions: best.total_acquisitions(),
            days: best.project(ctx),
        };
        log::info!(
            "best plan: fitness {:.1} ({:+.1} over baseline), {} acquisitions",
            plan.fitness,
            plan.improvement,
            plan.total_acquisitions
        );
        plan
    }
}

fn log_generation(label: &str, generation: usize, population: &Population) {
    if let Some(summary) = population.fitness_summary() {
        log::debug!(
            "{label} generation {generation}: best {:.1}, mean {:.1}, worst {:.1}",
            summary.max,
            summary.mean,
            summary.min
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util;

    fn small_params() -> SearchParams {
        SearchParams {
            population_size: 6,
            island_count: 2,
            island_generations: 2,
            merged_generations: 2,
            mutation_probability: 0.5,
        }
    }

    #[test]
    fn test_optimize_projects_every_day() {
        let (week, setup) = test_util::fixture();
        let ctx = SearchContext::new(&setup, &week);
        let mut rng = Pcg32::seed_from_u64(21);

        let plan = StreamingOptimizer::new(small_params()).optimize(ctx, &mut rng);
        assert_eq!(plan.week, "1");
        assert_eq!(plan.days.len(), week.day_count());

        let baseline = Chromosome::baseline(ctx);
        assert!((plan.improvement - (plan.fitness - baseline.fitness())).abs() < 1e-9);
        let additions = plan.days.iter().map(|d| d.additions.len()).sum::<usize>();
        assert_eq!(additions, plan.total_acquisitions);
        for day in &plan.days {
            assert_eq!(day.additions.len(), day.removals.len());
        }
    }

    #[test]
    fn test_optimize_is_reproducible_with_seed() {
        let (week, setup) = test_util::fixture();
        let ctx = SearchContext::new(&setup, &week);
        let optimizer = StreamingOptimizer::new(small_params());

        let a = optimizer.optimize(ctx, &mut Pcg32::seed_from_u64(5));
        let b = optimizer.optimize(ctx, &mut Pcg32::seed_from_u64(5));
        assert_eq!(a, b);
    }

    #[test]
    #[should_panic(expected = "population size must be positive")]
    fn test_optimize_rejects_empty_population() {
        let (week, setup) = test_util::fixture();
        let ctx = SearchContext::new(&setup, &week);
        let params = SearchParams {
            population_size: 0,
            ..SearchParams::default()
        };
        let _ = StreamingOptimizer::new(params).optimize(ctx, &mut Pcg32::seed_from_u64(0));
    }
}

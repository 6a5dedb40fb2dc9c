use std::path::PathBuf;

use chrono::Utc;
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;
use rostream_evolution::{SearchContext, SearchParams, StreamingOptimizer};

use crate::{command::LeagueArg, schema::StreamingReport, util::Output};

const DEFAULT_PARAMS: SearchParams = SearchParams::DEFAULT;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct OptimizeArg {
    #[clap(flatten)]
    league: LeagueArg,
    /// Chromosomes per island
    #[arg(long, default_value_t = DEFAULT_PARAMS.population_size)]
    population_size: usize,
    /// Independently evolved sub-populations
    #[arg(long, default_value_t = DEFAULT_PARAMS.island_count)]
    island_count: usize,
    /// Generations each island evolves before merging
    #[arg(long, default_value_t = DEFAULT_PARAMS.island_generations)]
    island_generations: usize,
    /// Generations the merged population evolves
    #[arg(long, default_value_t = DEFAULT_PARAMS.merged_generations)]
    merged_generations: usize,
    /// Probability that a child is mutated
    #[arg(long, default_value_t = DEFAULT_PARAMS.mutation_probability)]
    mutation_probability: f64,
    /// Seed for a reproducible search
    #[arg(long)]
    seed: Option<u64>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &OptimizeArg) -> anyhow::Result<()> {
    let OptimizeArg {
        league,
        population_size,
        island_count,
        island_generations,
        merged_generations,
        mutation_probability,
        seed,
        output,
    } = arg;
    anyhow::ensure!(*population_size > 0, "--population-size must be positive");
    anyhow::ensure!(*island_count > 0, "--island-count must be positive");
    anyhow::ensure!(
        (0.0..=1.0).contains(mutation_probability),
        "--mutation-probability must be within 0.0..=1.0"
    );

    let (week, setup) = crate::util::load_week(league)?;
    let ctx = SearchContext::new(&setup, &week);

    let seed = seed.unwrap_or_else(|| rand::rng().random());
    log::info!("seed: {seed}");
    let mut rng = Pcg32::seed_from_u64(seed);

    let optimizer = StreamingOptimizer::new(SearchParams {
        population_size: *population_size,
        island_count: *island_count,
        island_generations: *island_generations,
        merged_generations: *merged_generations,
        mutation_probability: *mutation_probability,
    });
    let plan = optimizer.optimize(ctx, &mut rng);

    let report = StreamingReport {
        generated_at: Utc::now(),
        seed,
        plan,
    };
    Output::save_json(&report, output.clone())?;
    Ok(())
}

//! Evolutionary search for weekly streaming plans.
//!
//! A plan decides, day by day, which free agents to add and which streamers to drop
//! so that the team's starting lineups score as many points as possible over the
//! week. The search space is large and every move changes the rest of the week, so
//! plans are evolved rather than enumerated.
//!
//! # Key Components
//!
//! - [`Gene`]: one day's streaming roster (slotted streamers, bench, adds and drops)
//! - [`Chromosome`]: a full-week plan; owns the genes and the cross-day bookkeeping
//! - [`EvolutionManager`]: selection, crossover and mutation over a [`Population`]
//! - [`StreamingOptimizer`]: island-model driver producing a [`StreamingPlan`]
//!
//! Every operation reads its inputs from a [`SearchContext`], which borrows the
//! week's [`RosterSetup`](rostream_engine::RosterSetup) and
//! [`WeekWindow`](rostream_engine::WeekWindow).
//!
//! # Soft failures
//!
//! Running out of candidates (an empty bench, no eligible free agent, nobody to
//! drop) is never an error. The affected step is skipped and the plan stays
//! consistent; progress across generations is statistical.

pub use self::{
    bench::*, chromosome::*, context::*, cooldown::*, gene::*, optimizer::*, plan::*,
    population::*,
};

mod bench;
mod chromosome;
mod context;
mod cooldown;
mod gene;
mod optimizer;
mod plan;
mod population;
#[cfg(test)]
mod test_util;

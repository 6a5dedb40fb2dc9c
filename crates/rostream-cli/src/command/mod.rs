use std::path::PathBuf;

use clap::{Parser, Subcommand};

use self::{optimize::OptimizeArg, slotting::SlottingArg};

mod optimize;
mod slotting;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Search for the best streaming moves of a week
    Optimize(#[clap(flatten)] OptimizeArg),
    /// Show the optimal core lineup for every day of a week
    Slotting(#[clap(flatten)] SlottingArg),
}

/// Inputs shared by every subcommand.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct LeagueArg {
    /// Season schedule JSON file
    #[arg(long)]
    pub(crate) schedule: PathBuf,
    /// League JSON file with the roster and the free-agent pool
    #[arg(long)]
    pub(crate) league: PathBuf,
    /// Week identifier within the schedule
    #[arg(long)]
    pub(crate) week: String,
    /// Players projected above this many points are never streamed
    #[arg(long, default_value_t = 32.0)]
    pub(crate) threshold: f64,
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Optimize(arg) => optimize::run(&arg)?,
        Mode::Slotting(arg) => slotting::run(&arg)?,
    }
    Ok(())
}

use std::path::PathBuf;

use crate::{
    command::LeagueArg,
    schema::{DaySlotting, SlottingReport},
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SlottingArg {
    #[clap(flatten)]
    league: LeagueArg,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &SlottingArg) -> anyhow::Result<()> {
    let SlottingArg { league, output } = arg;
    let (week, setup) = util::load_week(league)?;

    let days = week
        .days()
        .map(|day| DaySlotting {
            day,
            lineup: setup.lineup(day).clone(),
            unused_slots: setup.unused_slots(day),
        })
        .collect();
    let report = SlottingReport {
        week: setup.week_id().to_owned(),
        core_points: setup.core_points(),
        days,
    };
    Output::save_json(&report, output.clone())?;
    Ok(())
}

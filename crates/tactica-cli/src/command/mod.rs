use clap::{Parser, Subcommand};

use self::{
    calibrate::CalibrateArg, cluster::ClusterArg, init_weights::InitWeightsArg, score::ScoreArg,
};

mod calibrate;
mod cluster;
mod init_weights;
mod score;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Rank the candidate actions of a scenario
    Score(#[clap(flatten)] ScoreArg),
    /// Group units into formations
    Cluster(#[clap(flatten)] ClusterArg),
    /// Tune behavior weights against recorded play
    Calibrate(#[clap(flatten)] CalibrateArg),
    /// Write a randomly initialized weight checkpoint
    InitWeights(#[clap(flatten)] InitWeightsArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Score(arg) => score::run(&arg)?,
        Mode::Cluster(arg) => cluster::run(&arg)?,
        Mode::Calibrate(arg) => calibrate::run(&arg)?,
        Mode::InitWeights(arg) => init_weights::run(&arg)?,
    }
    Ok(())
}

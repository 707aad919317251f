use std::path::PathBuf;

use tactica_evaluator::behavior_weights::BehaviorWeights;
use tactica_training::Checkpoint;

use crate::{model::calibration_record::CalibrationRecord, util};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct InitWeightsArg {
    /// Seed for the random draw
    #[arg(long)]
    seed: Option<u64>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &InitWeightsArg) -> anyhow::Result<()> {
    let InitWeightsArg { seed, output } = arg;

    let (mut rng, seed) = util::seeded_rng(*seed);
    let weights = BehaviorWeights::random(&mut rng);
    let record = CalibrationRecord::new(
        format!("initial-{seed}"),
        None,
        Checkpoint::from_weights(&weights),
    );
    util::write_json(&record, output.as_deref())?;

    eprintln!("Initial weights written");
    if let Some(path) = &output {
        eprintln!("  Path: {}", path.display());
    }
    record.print_summary();

    Ok(())
}

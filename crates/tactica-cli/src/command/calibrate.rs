use std::path::PathBuf;

use anyhow::Context as _;
use rand::Rng;
use tactica_evaluator::{
    base_cost::BaseCostFunction,
    behavior_weights::{BehaviorWeights, Weight},
    extended_cost::ExtendedCostFunction,
};
use tactica_training::{
    CalibrationError, CalibrationOutcome, Checkpoint, CoordinateDescent, GaussianSearch, Objective,
    ReplayObjective,
};

use crate::{
    model::{calibration_record::CalibrationRecord, scenario::ReplayFile},
    util,
};

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub enum ObjectiveKind {
    #[default]
    Base,
    Extended,
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub enum Method {
    #[default]
    Coordinate,
    Gaussian,
}

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct CalibrateArg {
    /// Replay file (board, damage tables, recorded action sequences)
    #[arg(long)]
    replays: PathBuf,
    /// Checkpoint or calibration record to start from (random start if omitted)
    #[arg(long)]
    resume: Option<PathBuf>,
    #[arg(long, default_value = "base")]
    objective: ObjectiveKind,
    #[arg(long, default_value = "coordinate")]
    method: Method,
    /// Seed for the random start and the gaussian search
    #[arg(long)]
    seed: Option<u64>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &CalibrateArg) -> anyhow::Result<()> {
    let CalibrateArg {
        replays,
        resume,
        objective,
        method,
        seed,
        output,
    } = arg;

    let ReplayFile {
        board,
        damage,
        sequences,
    } = util::read_replay_file(replays)?;
    let (mut rng, seed) = util::seeded_rng(*seed);
    let start = match resume {
        Some(path) => util::read_weights_file(path)?,
        None => BehaviorWeights::random(&mut rng),
    };

    let record_count: usize = sequences.iter().map(Vec::len).sum();
    eprintln!(
        "Calibrating {objective:?} objective with {method:?} search over {} sequences ({record_count} records), seed {seed}",
        sequences.len(),
    );

    let damage = &damage;
    let outcome = match objective {
        ObjectiveKind::Base => {
            let objective = ReplayObjective::new(sequences, || {
                BaseCostFunction::new(damage, board)
            });
            search(*method, &objective, &start, &mut rng)
        }
        ObjectiveKind::Extended => {
            let objective = ReplayObjective::new(sequences, || {
                ExtendedCostFunction::new(BaseCostFunction::new(damage, board))
            });
            search(*method, &objective, &start, &mut rng)
        }
    }
    .context("Calibration failed")?;

    eprintln!("Calibration completed.");
    eprintln!("  Evaluations: {}", outcome.evaluations);
    eprintln!("  Fitness: {:.3}", outcome.fitness);
    for weight in Weight::ALL {
        let before = start.weight(weight);
        let after = outcome.best.weight(weight);
        eprintln!("  {:>22}: {before:.3} -> {after:.3}", weight.name());
    }

    let name = format!("{objective:?}-{method:?}").to_lowercase();
    let record = CalibrationRecord::new(
        name,
        Some(outcome.fitness),
        Checkpoint::from_weights(&outcome.best),
    );
    util::write_json(&record, output.as_deref())?;

    eprintln!();
    eprintln!("Checkpoint saved successfully");
    if let Some(path) = &output {
        eprintln!("  Path: {}", path.display());
    }
    record.print_summary();

    Ok(())
}

fn search<O, R>(
    method: Method,
    objective: &O,
    start: &BehaviorWeights,
    rng: &mut R,
) -> Result<CalibrationOutcome, CalibrationError>
where
    O: Objective,
    R: Rng,
{
    match method {
        Method::Coordinate => CoordinateDescent::default().run(objective, start),
        Method::Gaussian => GaussianSearch::default().run(objective, start, rng),
    }
}

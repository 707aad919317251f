use std::path::PathBuf;

use anyhow::{Context as _, bail, ensure};
use serde::Serialize;
use tactica_core::{UnitAction, UnitId, UnitState};
use tactica_evaluator::{
    action_selector::ActionSelector,
    base_cost::{BaseCostFunction, CostBreakdown},
    behavior_weights::BehaviorWeights,
    damage::DamageModel,
    extended_cost::{ExtendedBreakdown, ExtendedCostFunction},
};

use crate::util;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ScoreArg {
    /// Scenario file (board, damage tables, units, candidate actions)
    #[arg(long)]
    scenario: PathBuf,
    /// Checkpoint or calibration record to score with (all-zero weights if omitted)
    #[arg(long)]
    weights: Option<PathBuf>,
    /// Resulting boards, one per candidate action; enables the extended scorer
    #[arg(long)]
    extended_next: Option<PathBuf>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct ScoreReport<'a> {
    unit: UnitId,
    ranking: Vec<ScoredAction<'a>>,
}

#[derive(Debug, Serialize)]
struct ScoredAction<'a> {
    rank: usize,
    utility: f32,
    action: &'a UnitAction,
    breakdown: CostBreakdown,
    #[serde(skip_serializing_if = "Option::is_none")]
    extended: Option<ExtendedBreakdown>,
}

pub(crate) fn run(arg: &ScoreArg) -> anyhow::Result<()> {
    let ScoreArg {
        scenario,
        weights,
        extended_next,
        output,
    } = arg;

    let scenario = util::read_scenario_file(scenario)?;
    let weights = match weights {
        Some(path) => util::read_weights_file(path)?,
        None => BehaviorWeights::zero(),
    };
    if let Some(action) = scenario.actions.iter().find(|a| a.unit_id != scenario.unit) {
        bail!(
            "candidate action for unit {} found in a scenario for unit {}",
            action.unit_id,
            scenario.unit
        );
    }

    let scorer = BaseCostFunction::new(&scenario.damage, scenario.board);
    let ranking = match extended_next {
        None => rank_base(&scorer, &scenario.actions, &scenario.units, &weights)?,
        Some(path) => {
            let next: Vec<Vec<UnitState>> = util::read_json_file("resulting boards", path)?;
            ensure!(
                next.len() == scenario.actions.len(),
                "{} resulting boards given for {} candidate actions",
                next.len(),
                scenario.actions.len()
            );
            rank_extended(&scorer, &scenario.actions, &scenario.units, &next, &weights)?
        }
    };

    eprintln!(
        "Scored {} of {} candidate actions for unit {}",
        ranking.len(),
        scenario.actions.len(),
        scenario.unit
    );
    if let Some(best) = ranking.first() {
        eprintln!(
            "  Best: {:?} facing {:?} => {:.3}",
            best.action.destination, best.action.final_facing, best.utility
        );
    }

    let report = ScoreReport {
        unit: scenario.unit,
        ranking,
    };
    util::write_json(&report, output.as_deref())?;
    Ok(())
}

fn rank_base<'a, D>(
    scorer: &BaseCostFunction<D>,
    actions: &'a [UnitAction],
    units: &[UnitState],
    weights: &BehaviorWeights,
) -> anyhow::Result<Vec<ScoredAction<'a>>>
where
    D: DamageModel,
{
    let selector = ActionSelector::new(Box::new(scorer));
    let ranked = selector
        .rank_actions(actions, units, weights)
        .context("Failed to score candidate actions")?;
    ranked
        .into_iter()
        .enumerate()
        .map(|(rank, r)| {
            let breakdown = scorer
                .breakdown(r.action, units, weights)
                .context("Failed to break down a candidate score")?;
            Ok(ScoredAction {
                rank,
                utility: r.utility,
                action: r.action,
                breakdown,
                extended: None,
            })
        })
        .collect()
}

fn rank_extended<'a, D>(
    scorer: &BaseCostFunction<D>,
    actions: &'a [UnitAction],
    units: &[UnitState],
    next: &[Vec<UnitState>],
    weights: &BehaviorWeights,
) -> anyhow::Result<Vec<ScoredAction<'a>>>
where
    D: DamageModel,
{
    let extended = ExtendedCostFunction::new(scorer);
    let mut scored = vec![];
    for (action, next) in actions.iter().zip(next) {
        if !action.legal {
            continue;
        }
        let breakdown = scorer
            .breakdown(action, units, weights)
            .context("Failed to score a candidate action")?;
        let ext = extended
            .breakdown(action, units, next, weights)
            .context("Failed to score a candidate transition")?;
        scored.push(ScoredAction {
            rank: 0,
            utility: ext.total,
            action,
            breakdown,
            extended: Some(ext),
        });
    }

    scored.sort_by(|a, b| b.utility.total_cmp(&a.utility));
    for (rank, s) in scored.iter_mut().enumerate() {
        s.rank = rank;
    }
    Ok(scored)
}

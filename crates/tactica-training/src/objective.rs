//! Fitness functions for weight calibration.
//!
//! An [`Objective`] maps a weight vector to a fitness value (higher is better).
//! [`ReplayObjective`] measures how highly a cost function rates recorded play:
//!
//! - **Base mode** (the cost function scores single boards): every record's action is
//!   scored against its own board
//! - **Extended mode** ([`CostFunction::requires_next_state`] is `true`): record `t` is
//!   scored against the boards of records `t` and `t + 1`; the last record of each
//!   sequence has no successor and is skipped
//!
//! Fitness is the mean utility over all scored records.
//!
//! Each evaluation builds its own cost function through a factory, so stateful scorers
//! (the curiosity registry of the extended scorer) start every evaluation from an empty
//! session and parallel evaluations never share one.

use tactica_core::ActionAndState;
use tactica_evaluator::{
    behavior_weights::BehaviorWeights,
    cost_function::{CostError, CostFunction},
};

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum CalibrationError {
    #[display("failed to score a recorded action")]
    Cost(CostError),
    #[display("the replay set contains no scorable records")]
    NoSamples,
}

impl From<CostError> for CalibrationError {
    fn from(err: CostError) -> Self {
        Self::Cost(err)
    }
}

/// Fitness function optimized by the calibrators.
pub trait Objective: Sync {
    fn evaluate(&self, weights: &BehaviorWeights) -> Result<f32, CalibrationError>;
}

impl<F> Objective for F
where
    F: Fn(&BehaviorWeights) -> Result<f32, CalibrationError> + Sync,
{
    fn evaluate(&self, weights: &BehaviorWeights) -> Result<f32, CalibrationError> {
        self(weights)
    }
}

/// Scores recorded action sequences with a freshly built cost function.
pub struct ReplayObjective<F> {
    sequences: Vec<Vec<ActionAndState>>,
    factory: F,
}

impl<F, C> ReplayObjective<F>
where
    F: Fn() -> C + Sync,
    C: CostFunction,
{
    #[must_use]
    pub fn new(sequences: Vec<Vec<ActionAndState>>, factory: F) -> Self {
        Self { sequences, factory }
    }

    #[must_use]
    pub fn sequences(&self) -> &[Vec<ActionAndState>] {
        &self.sequences
    }
}

impl<F, C> Objective for ReplayObjective<F>
where
    F: Fn() -> C + Sync,
    C: CostFunction,
{
    #[expect(clippy::cast_precision_loss)]
    fn evaluate(&self, weights: &BehaviorWeights) -> Result<f32, CalibrationError> {
        let cost_function = (self.factory)();
        let mut total = 0.0;
        let mut count = 0_usize;

        for sequence in &self.sequences {
            if cost_function.requires_next_state() {
                for pair in sequence.windows(2) {
                    let (record, next) = (&pair[0], &pair[1]);
                    total += cost_function.resolve_transition(
                        &record.action,
                        &record.units,
                        &next.units,
                        weights,
                    )?;
                    count += 1;
                }
            } else {
                for record in sequence {
                    total += cost_function.resolve(&record.action, &record.units, weights)?;
                    count += 1;
                }
            }
        }

        if count == 0 {
            return Err(CalibrationError::NoSamples);
        }
        Ok(total / count as f32)
    }
}

impl<F> std::fmt::Debug for ReplayObjective<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReplayObjective")
            .field("sequences", &self.sequences.len())
            .finish_non_exhaustive()
    }
}

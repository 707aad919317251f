//! Gradient-free search over behavior weight vectors.
//!
//! Two calibrators are provided, both maximizing an [`Objective`]:
//!
//! - [`CoordinateDescent`] - walks one dimension at a time with a shrinking step
//! - [`GaussianSearch`] - elitist (1+λ) search with Gaussian perturbations
//!
//! # Coordinate Descent
//!
//! Each round visits every dimension `i` and evaluates the two neighbours
//! `perturb(i, +step)` and `perturb(i, -step)` (both clamped). The better neighbour
//! replaces the current best when it strictly improves fitness. When a round moves the
//! vector by less than `min_step` in every dimension, the step is multiplied by `shrink`.
//! The search ends once the step falls below `min_step` or `max_rounds` is reached.
//!
//! # Gaussian Search
//!
//! Each generation draws `candidates` noisy copies of the current best
//! (`noise(strength)` then clamp) and keeps the fittest one if it strictly improves on
//! the current best. Ties go to the earliest candidate, so a seeded run is reproducible.
//!
//! # Parallelization
//!
//! Candidates of one step are evaluated concurrently with scoped threads, one thread per
//! candidate. Objectives must be [`Sync`]; a [`ReplayObjective`](crate::ReplayObjective)
//! builds a separate cost function for every evaluation, so no session state is shared
//! between threads.

use std::thread;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tactica_evaluator::behavior_weights::{BehaviorWeights, WEIGHT_COUNT, WeightBounds};
use tracing::debug;

use crate::objective::{CalibrationError, Objective};

/// Result of a calibration run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationOutcome {
    pub best: BehaviorWeights,
    pub fitness: f32,
    /// Number of objective evaluations performed, including the starting vector.
    pub evaluations: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateDescent {
    /// Step used in the first round
    pub initial_step: f32,
    /// The search stops once the step drops below this value
    pub min_step: f32,
    /// Factor applied to the step after a round without meaningful progress
    pub shrink: f32,
    pub max_rounds: usize,
    pub bounds: WeightBounds,
}

impl Default for CoordinateDescent {
    fn default() -> Self {
        Self {
            initial_step: 0.25,
            min_step: 0.01,
            shrink: 0.5,
            max_rounds: 50,
            bounds: WeightBounds::default(),
        }
    }
}

impl CoordinateDescent {
    /// Runs the search from `start` (clamped into bounds first).
    pub fn run<O>(
        &self,
        objective: &O,
        start: &BehaviorWeights,
    ) -> Result<CalibrationOutcome, CalibrationError>
    where
        O: Objective + ?Sized,
    {
        let mut best = start.clamp(self.bounds);
        let mut fitness = objective.evaluate(&best)?;
        let mut evaluations = 1;
        let mut step = self.initial_step;

        for round in 0..self.max_rounds {
            if step < self.min_step {
                break;
            }
            let round_start = best;

            for i in 0..WEIGHT_COUNT {
                let candidates = [
                    best.perturb(i, step).clamp(self.bounds),
                    best.perturb(i, -step).clamp(self.bounds),
                ];
                let scores = evaluate_all(objective, &candidates)?;
                evaluations += candidates.len();

                let Some((candidate, score)) = fittest(&candidates, &scores) else {
                    continue;
                };
                if score > fitness {
                    debug!(round, dimension = i, step, fitness = score, "accepted step");
                    best = *candidate;
                    fitness = score;
                }
            }

            if (best - round_start).max_abs() < self.min_step {
                step *= self.shrink;
                debug!(round, step, "shrinking step");
            }
        }

        Ok(CalibrationOutcome {
            best,
            fitness,
            evaluations,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaussianSearch {
    /// Number of perturbed candidates per generation (λ)
    pub candidates: usize,
    /// Standard deviation of the perturbation
    pub strength: f32,
    pub generations: usize,
    pub bounds: WeightBounds,
}

impl Default for GaussianSearch {
    fn default() -> Self {
        Self {
            candidates: 8,
            strength: 0.1,
            generations: 50,
            bounds: WeightBounds::default(),
        }
    }
}

impl GaussianSearch {
    /// Runs the search from `start` (clamped into bounds first).
    pub fn run<O, R>(
        &self,
        objective: &O,
        start: &BehaviorWeights,
        rng: &mut R,
    ) -> Result<CalibrationOutcome, CalibrationError>
    where
        O: Objective + ?Sized,
        R: Rng + ?Sized,
    {
        let mut best = start.clamp(self.bounds);
        let mut fitness = objective.evaluate(&best)?;
        let mut evaluations = 1;

        for generation in 0..self.generations {
            let candidates: Vec<_> = (0..self.candidates)
                .map(|_| best.noise(self.strength, rng).clamp(self.bounds))
                .collect();
            let scores = evaluate_all(objective, &candidates)?;
            evaluations += candidates.len();

            let Some((candidate, score)) = fittest(&candidates, &scores) else {
                continue;
            };
            if score > fitness {
                debug!(generation, fitness = score, "accepted candidate");
                best = *candidate;
                fitness = score;
            }
        }

        Ok(CalibrationOutcome {
            best,
            fitness,
            evaluations,
        })
    }
}

/// Evaluates every candidate on its own scoped thread.
fn evaluate_all<O>(
    objective: &O,
    candidates: &[BehaviorWeights],
) -> Result<Vec<f32>, CalibrationError>
where
    O: Objective + ?Sized,
{
    thread::scope(|s| {
        let handles: Vec<_> = candidates
            .iter()
            .map(|candidate| s.spawn(move || objective.evaluate(candidate)))
            .collect();
        handles
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
            })
            .collect()
    })
}

/// Returns the first candidate with the highest score.
fn fittest<'a>(
    candidates: &'a [BehaviorWeights],
    scores: &[f32],
) -> Option<(&'a BehaviorWeights, f32)> {
    let mut best: Option<(&BehaviorWeights, f32)> = None;
    for (candidate, &score) in candidates.iter().zip(scores) {
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((candidate, score));
        }
    }
    best
}

//! Offline calibration of behavior weight vectors.
//!
//! This crate tunes the weights consumed by the cost functions in `tactica-evaluator`.
//! It replays recorded play, scores every recorded action with a candidate weight
//! vector, and searches for the vector under which the recorded decisions look best.
//!
//! # How Calibration Works
//!
//! 1. **Replay** - load recorded sequences of actions and the boards they were taken on
//! 2. **Objective** - [`ReplayObjective`] turns a weight vector into a fitness value
//!    (mean utility of the recorded actions)
//! 3. **Search** - [`CoordinateDescent`] or [`GaussianSearch`] explores the weight space
//!    with `perturb`/`noise` and keeps improvements
//! 4. **Snapshot** - the best vector is stored as a [`Checkpoint`], which can seed a
//!    later run
//!
//! # Architecture
//!
//! ```text
//! Calibrator (coordinate descent / gaussian search)
//!     ↓ proposes
//! BehaviorWeights
//!     ↓ scored by
//! ReplayObjective ── builds ──► CostFunction (fresh per evaluation)
//!     ↓ produces
//! Fitness
//!     ↓ guides
//! Calibrator
//! ```
//!
//! # Example
//!
//! ```rust
//! use tactica_core::{
//!     ActionAndState, BoardDimensions, Coord, Facing, TeamId, UnitAction, UnitId, UnitState,
//! };
//! use tactica_evaluator::{
//!     base_cost::BaseCostFunction, behavior_weights::BehaviorWeights, damage::RangeTableDamage,
//! };
//! use tactica_training::{Checkpoint, CoordinateDescent, ReplayObjective};
//!
//! let units = vec![
//!     UnitState::new(UnitId(1), TeamId(1)),
//!     UnitState { position: Coord::new(0, 8), ..UnitState::new(UnitId(2), TeamId(2)) },
//! ];
//! let action = UnitAction::walk(UnitId(1), Coord::new(0, 0), Coord::new(0, 3), Facing::S);
//! let replays = vec![vec![ActionAndState::new(1, action, units)]];
//!
//! let objective = ReplayObjective::new(replays, || {
//!     BaseCostFunction::new(RangeTableDamage::new(), BoardDimensions::default())
//! });
//! let outcome = CoordinateDescent::default()
//!     .run(&objective, &BehaviorWeights::zero())
//!     .unwrap();
//! let checkpoint = Checkpoint::from_weights(&outcome.best);
//! assert_eq!(checkpoint.to_weights(), outcome.best);
//! ```
//!
//! # Current Limitations
//!
//! - **Replay-only fitness**: the objective rates recorded decisions; it never plays new
//!   games, so it cannot reward outcomes the recordings do not contain
//! - **Inert fall-risk term**: recorded failure probabilities are whatever the recorder
//!   supplied; without a real risk model the fall-shame weight has nothing to learn from

pub use self::{calibrate::*, checkpoint::*, objective::*};

mod calibrate;
mod checkpoint;
mod objective;

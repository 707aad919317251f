//! Action selection: picking the best candidate move for a unit's turn.
//!
//! The decision loop enumerates every legal candidate action for the unit whose turn it
//! is, scores each one with a cost function and a weight vector, and executes the
//! highest-utility action.
//!
//! 1. **Filter** - drop candidates flagged illegal by movement generation
//! 2. **Score** - resolve each remaining candidate with the cost function
//! 3. **Select** - keep the maximum; among equal utilities the earliest candidate wins
//!
//! # Design: Greedy One-Step Choice
//!
//! The selector only looks at the immediate move. Multi-turn plans are out of its reach;
//! group-level steering comes from clustering instead (see the `tactica-cluster` crate).
//!
//! # Usage
//!
//! ```rust
//! use tactica_core::{BoardDimensions, Coord, Facing, TeamId, UnitAction, UnitId, UnitState};
//! use tactica_evaluator::{
//!     action_selector::ActionSelector,
//!     base_cost::BaseCostFunction,
//!     behavior_weights::{BehaviorWeights, Weight},
//!     damage::RangeTableDamage,
//! };
//!
//! let scorer = BaseCostFunction::new(RangeTableDamage::new(), BoardDimensions::new(20, 20));
//! let selector = ActionSelector::new(Box::new(scorer));
//!
//! let me = UnitState::new(UnitId(1), TeamId(1));
//! let enemy = UnitState { position: Coord::new(0, 10), ..UnitState::new(UnitId(2), TeamId(2)) };
//! let units = [me, enemy];
//!
//! let candidates = [
//!     UnitAction::stay(UnitId(1), Coord::new(0, 0), Facing::S),
//!     UnitAction::walk(UnitId(1), Coord::new(0, 0), Coord::new(0, 4), Facing::S),
//! ];
//! let weights = BehaviorWeights::zero().with(Weight::Aggression, 1.0);
//! let best = selector.select_best_action(&candidates, &units, &weights).unwrap().unwrap();
//! assert_eq!(best.action.destination, Coord::new(0, 4));
//! ```

use tactica_core::{UnitAction, UnitState};

use crate::{
    behavior_weights::BehaviorWeights,
    cost_function::{CostError, CostFunction},
};

/// A candidate action together with its utility.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedAction<'a> {
    pub action: &'a UnitAction,
    pub utility: f32,
}

/// Scores candidate actions and selects the best one.
#[derive(Debug)]
pub struct ActionSelector<'a> {
    cost_function: Box<dyn CostFunction + 'a>,
}

impl<'a> ActionSelector<'a> {
    #[must_use]
    pub fn new(cost_function: Box<dyn CostFunction + 'a>) -> Self {
        Self { cost_function }
    }

    #[must_use]
    pub fn cost_function(&self) -> &dyn CostFunction {
        &*self.cost_function
    }

    /// Scores every legal action and returns them best first.
    ///
    /// The sort is stable: actions with equal utility keep their input order.
    pub fn rank_actions<'b>(
        &self,
        actions: &'b [UnitAction],
        units: &[UnitState],
        weights: &BehaviorWeights,
    ) -> Result<Vec<RankedAction<'b>>, CostError> {
        let mut ranked = actions
            .iter()
            .filter(|action| action.legal)
            .map(|action| {
                let utility = self.cost_function.resolve(action, units, weights)?;
                Ok(RankedAction { action, utility })
            })
            .collect::<Result<Vec<_>, CostError>>()?;
        ranked.sort_by(|a, b| b.utility.total_cmp(&a.utility));
        Ok(ranked)
    }

    /// Returns the legal action with the highest utility.
    ///
    /// Returns `Ok(None)` if no candidate is legal.
    pub fn select_best_action<'b>(
        &self,
        actions: &'b [UnitAction],
        units: &[UnitState],
        weights: &BehaviorWeights,
    ) -> Result<Option<RankedAction<'b>>, CostError> {
        let mut best: Option<RankedAction<'b>> = None;
        for action in actions.iter().filter(|action| action.legal) {
            let utility = self.cost_function.resolve(action, units, weights)?;
            if best.as_ref().is_none_or(|b| utility > b.utility) {
                best = Some(RankedAction { action, utility });
            }
        }
        Ok(best)
    }
}

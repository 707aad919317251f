use std::fmt;

use tactica_core::{UnitAction, UnitId, UnitState};

use crate::behavior_weights::BehaviorWeights;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum CostError {
    #[display("acting unit {unit} is not present in the unit list")]
    UnknownUnit { unit: UnitId },
    #[display("unsupported operation: {operation}")]
    UnsupportedOperation { operation: &'static str },
}

/// Scores a candidate action for the unit that would perform it.
///
/// Utilities are unbounded; higher is better. Implementations must be pure over their
/// arguments apart from explicitly documented session state.
pub trait CostFunction: fmt::Debug + Send + Sync {
    /// Scores `action` against the board described by `units`.
    fn resolve(
        &self,
        action: &UnitAction,
        units: &[UnitState],
        weights: &BehaviorWeights,
    ) -> Result<f32, CostError>;

    /// Scores `action` given the board before (`current`) and after (`next`) it was taken.
    ///
    /// The default ignores `next` and delegates to [`CostFunction::resolve`].
    fn resolve_transition(
        &self,
        action: &UnitAction,
        current: &[UnitState],
        _next: &[UnitState],
        weights: &BehaviorWeights,
    ) -> Result<f32, CostError> {
        self.resolve(action, current, weights)
    }

    /// Returns `true` if the function needs the resulting board to produce a score.
    fn requires_next_state(&self) -> bool {
        false
    }
}

impl<T> CostFunction for &T
where
    T: CostFunction + ?Sized,
{
    fn resolve(
        &self,
        action: &UnitAction,
        units: &[UnitState],
        weights: &BehaviorWeights,
    ) -> Result<f32, CostError> {
        (**self).resolve(action, units, weights)
    }

    fn resolve_transition(
        &self,
        action: &UnitAction,
        current: &[UnitState],
        next: &[UnitState],
        weights: &BehaviorWeights,
    ) -> Result<f32, CostError> {
        (**self).resolve_transition(action, current, next, weights)
    }

    fn requires_next_state(&self) -> bool {
        (**self).requires_next_state()
    }
}

impl<T> CostFunction for Box<T>
where
    T: CostFunction + ?Sized,
{
    fn resolve(
        &self,
        action: &UnitAction,
        units: &[UnitState],
        weights: &BehaviorWeights,
    ) -> Result<f32, CostError> {
        (**self).resolve(action, units, weights)
    }

    fn resolve_transition(
        &self,
        action: &UnitAction,
        current: &[UnitState],
        next: &[UnitState],
        weights: &BehaviorWeights,
    ) -> Result<f32, CostError> {
        (**self).resolve_transition(action, current, next, weights)
    }

    fn requires_next_state(&self) -> bool {
        (**self).requires_next_state()
    }
}

pub(crate) fn acting_unit<'a>(
    action: &UnitAction,
    units: &'a [UnitState],
) -> Result<&'a UnitState, CostError> {
    units
        .iter()
        .find(|u| u.id == action.unit_id)
        .ok_or(CostError::UnknownUnit {
            unit: action.unit_id,
        })
}

//! Extended utility scoring: exploration and outcome objectives on top of the base scorer.
//!
//! [`ExtendedCostFunction`] needs both the board before an action (`current`) and the
//! board it produced (`next`), so it is only usable for replayed or simulated
//! transitions:
//!
//! ```text
//! utility = base(action, current)
//!         + w(victory)   × victory
//!         + w(resource)  × resource
//!         + w(control)   × control
//!         + w(curiosity) × curiosity
//! ```
//!
//! - **control**: share of claimed territory cells held by the acting team in `next`
//!   (see [`Territory`])
//! - **victory**: `+1` above 60 % control, `−1` below 40 %, otherwise 0
//! - **resource**: change in the acting team's total battle value from `current` to `next`
//! - **curiosity**: 1 the first time the acting unit's exact `next` state is scored in this
//!   session, 0 afterwards
//!
//! The curiosity term makes the scorer stateful. Each instance owns a [`VisitRegistry`]
//! that represents one session; use one instance per parallel worker and call
//! [`ExtendedCostFunction::reset_session`] between evaluation sessions.
//!
//! Calling [`CostFunction::resolve`] (no resulting board) fails with
//! [`CostError::UnsupportedOperation`].

use tactica_core::{TeamId, UnitAction, UnitState};

use crate::{
    behavior_weights::{BehaviorWeights, Weight},
    cost_function::{CostError, CostFunction, acting_unit},
    territory::Territory,
    visit_registry::VisitRegistry,
};

const VICTORY_THRESHOLD: f32 = 0.6;
const DEFEAT_THRESHOLD: f32 = 0.4;

/// Per-objective values of an extended score, before weighting (except `total`).
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize)]
pub struct ExtendedBreakdown {
    pub base: f32,
    pub control: f32,
    pub victory: f32,
    pub resource: f32,
    pub curiosity: f32,
    pub total: f32,
}

#[derive(Debug)]
pub struct ExtendedCostFunction<C> {
    base: C,
    registry: VisitRegistry,
}

impl<C> ExtendedCostFunction<C>
where
    C: CostFunction,
{
    /// Wraps `base` with a fresh session.
    #[must_use]
    pub fn new(base: C) -> Self {
        Self::with_registry(base, VisitRegistry::new())
    }

    #[must_use]
    pub fn with_registry(base: C, registry: VisitRegistry) -> Self {
        Self { base, registry }
    }

    #[must_use]
    pub fn base(&self) -> &C {
        &self.base
    }

    #[must_use]
    pub fn registry(&self) -> &VisitRegistry {
        &self.registry
    }

    /// Starts a new session: every state becomes unseen again.
    pub fn reset_session(&self) {
        self.registry.reset();
    }

    /// Scores the transition and returns each objective alongside the total.
    ///
    /// Records the acting unit's `next` state as visited. If the acting unit is missing
    /// from `next`, the curiosity term is 0 and nothing is recorded.
    pub fn breakdown(
        &self,
        action: &UnitAction,
        current: &[UnitState],
        next: &[UnitState],
        weights: &BehaviorWeights,
    ) -> Result<ExtendedBreakdown, CostError> {
        let unit = acting_unit(action, current)?;
        let team = unit.team;
        let base = self.base.resolve(action, current, weights)?;

        let control = Territory::from_units(next).control(team);
        let victory = victory_score(control);
        let resource = team_value_change(team, current, next);
        let curiosity = match next.iter().find(|u| u.id == unit.id) {
            Some(state) if self.registry.record_visit(state) => 1.0,
            _ => 0.0,
        };

        let total = base
            + weights.weight(Weight::Victory) * victory
            + weights.weight(Weight::Resource) * resource
            + weights.weight(Weight::Control) * control
            + weights.weight(Weight::Curiosity) * curiosity;

        Ok(ExtendedBreakdown {
            base,
            control,
            victory,
            resource,
            curiosity,
            total,
        })
    }
}

impl<C> CostFunction for ExtendedCostFunction<C>
where
    C: CostFunction,
{
    fn resolve(
        &self,
        _action: &UnitAction,
        _units: &[UnitState],
        _weights: &BehaviorWeights,
    ) -> Result<f32, CostError> {
        Err(CostError::UnsupportedOperation {
            operation: "extended scoring without a resulting state",
        })
    }

    fn resolve_transition(
        &self,
        action: &UnitAction,
        current: &[UnitState],
        next: &[UnitState],
        weights: &BehaviorWeights,
    ) -> Result<f32, CostError> {
        self.breakdown(action, current, next, weights)
            .map(|b| b.total)
    }

    fn requires_next_state(&self) -> bool {
        true
    }
}

fn victory_score(control: f32) -> f32 {
    if control > VICTORY_THRESHOLD {
        1.0
    } else if control < DEFEAT_THRESHOLD {
        -1.0
    } else {
        0.0
    }
}

fn team_value(team: TeamId, units: &[UnitState]) -> i64 {
    units
        .iter()
        .filter(|u| u.team == team && u.is_active())
        .map(|u| i64::from(u.battle_value))
        .sum()
}

#[expect(clippy::cast_precision_loss)]
fn team_value_change(team: TeamId, current: &[UnitState], next: &[UnitState]) -> f32 {
    (team_value(team, next) - team_value(team, current)) as f32
}

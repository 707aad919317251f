//! Base utility scoring for a single candidate action.
//!
//! [`BaseCostFunction`] turns a candidate action, the current board, and a behavior
//! weight vector into one utility value. The utility is a sum of independent terms, each
//! scaled by one weight, followed by a multiplicative off-board correction:
//!
//! ```text
//! utility = bravery + movement
//!         - fall - aggression - herding - facing - crowding - self_preservation
//! utility -= utility × w(off_board)        (only for off-board units)
//! ```
//!
//! | term | value |
//! |---|---|
//! | fall | `−1000` if failure is certain, else `w(fall_shame) × p` |
//! | bravery | `(1 − p) × dmg_by × w(bravery) − dmg_to` against the nearest enemy |
//! | aggression | `d × w(aggression)`, `d` = distance to nearest enemy (infantry at `d = 0` count as 2) |
//! | herding | `d × w(herding)` when the team has more than one unit |
//! | movement | `tmm × (w(self_preservation) + w(favor_higher_evasion))`, only when `w(favor_higher_evasion) ≠ 0` |
//! | facing | `max(0, 50 × (steps − 1)) × w(facing_correction)` |
//! | crowding | `(nearby heavy allies + nearby enemies) × 10 / (11 − w(anti_crowding))`, heavy ground units only |
//! | self_preservation | crippled units: `dist_to_home_edge × w(self_preservation)`, or `−250` on the edge |
//!
//! The herding term measures the distance to the nearest *enemy*, not to allies. This
//! is the long-standing behavior and trained weight vectors depend on it. The same
//! holds for the fall term: a certain failure yields `−1000`, which the subtraction turns
//! into a `+1000` utility.
//!
//! When the board holds no active enemy, every enemy-relative term (bravery, aggression,
//! herding, facing) is zero.

use tactica_core::{BoardDimensions, Coord, UnitAction, UnitState};
use tracing::trace;

use crate::{
    behavior_weights::{BehaviorWeights, Weight},
    cost_function::{CostError, CostFunction, acting_unit},
    damage::DamageModel,
};

/// Magnitude of the fall term when an action is certain to fail.
///
/// The fall term is `-CERTAIN_FAILURE_PENALTY`, so the subtraction in the utility sum
/// raises the utility by this amount.
pub const CERTAIN_FAILURE_PENALTY: f32 = 1000.0;

/// Bonus granted to a crippled unit standing on its home edge.
pub const HOME_EDGE_BONUS: f32 = 250.0;

const FACING_STEP_PENALTY: f32 = 50.0;
const ALLY_CROWDING_RADIUS: u32 = 2;
const ENEMY_CROWDING_MIN_RADIUS: u32 = 3;
const ENEMY_CROWDING_BASE_RANGE: f32 = 12.0;
const ENEMY_CROWDING_FRACTION: f32 = 0.6;

/// Per-term contributions of a scored action.
///
/// Each field holds the term's value before its sign is applied (see the module docs).
/// `off_board` is the amount removed by the off-board correction.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize)]
pub struct CostBreakdown {
    pub fall: f32,
    pub bravery: f32,
    pub aggression: f32,
    pub herding: f32,
    pub movement: f32,
    pub facing: f32,
    pub crowding: f32,
    pub self_preservation: f32,
    pub off_board: f32,
    pub total: f32,
}

/// The base utility scorer.
#[derive(Debug, Clone)]
pub struct BaseCostFunction<D> {
    damage: D,
    board: BoardDimensions,
}

impl<D> BaseCostFunction<D>
where
    D: DamageModel,
{
    #[must_use]
    pub fn new(damage: D, board: BoardDimensions) -> Self {
        Self { damage, board }
    }

    #[must_use]
    pub fn damage_model(&self) -> &D {
        &self.damage
    }

    #[must_use]
    pub fn board(&self) -> BoardDimensions {
        self.board
    }

    /// Scores `action` and returns every term alongside the total.
    pub fn breakdown(
        &self,
        action: &UnitAction,
        units: &[UnitState],
        weights: &BehaviorWeights,
    ) -> Result<CostBreakdown, CostError> {
        let unit = acting_unit(action, units)?;
        let destination = action.destination;
        let p = action.failure_probability;

        let mut terms = CostBreakdown {
            fall: fall_term(p, weights),
            movement: movement_term(action, weights),
            crowding: crowding_term(unit, action, units, weights),
            self_preservation: self_preservation_term(unit, action, self.board, weights),
            ..CostBreakdown::default()
        };

        if let Some(enemy) = nearest_enemy(unit, destination, units) {
            let range = destination.distance(enemy.position);
            let damage_to = self.damage.damage_at_range(enemy, range);
            let damage_by = self.damage.damage_at_range(unit, range);
            terms.bravery = (1.0 - p) * damage_by * weights.weight(Weight::Bravery) - damage_to;
            terms.aggression = aggression_term(unit, range, weights);
            terms.herding = herding_term(unit, units, range, weights);
            terms.facing = facing_term(action, enemy, weights);
        }

        let mut utility = terms.bravery + terms.movement
            - terms.fall
            - terms.aggression
            - terms.herding
            - terms.facing
            - terms.crowding
            - terms.self_preservation;
        if unit.off_board {
            terms.off_board = utility * weights.weight(Weight::OffBoard);
            utility -= terms.off_board;
        }
        terms.total = utility;

        trace!(unit = %unit.id, destination = ?destination, utility, "scored action");
        Ok(terms)
    }
}

impl<D> CostFunction for BaseCostFunction<D>
where
    D: DamageModel,
{
    fn resolve(
        &self,
        action: &UnitAction,
        units: &[UnitState],
        weights: &BehaviorWeights,
    ) -> Result<f32, CostError> {
        self.breakdown(action, units, weights).map(|b| b.total)
    }
}

/// Returns the target movement modifier earned by moving `hexes_moved` hexes.
///
/// ```
/// use tactica_evaluator::base_cost::target_movement_modifier;
///
/// assert_eq!(target_movement_modifier(2, false), 0);
/// assert_eq!(target_movement_modifier(5, false), 2);
/// assert_eq!(target_movement_modifier(5, true), 3);
/// assert_eq!(target_movement_modifier(30, false), 6);
/// ```
#[must_use]
pub const fn target_movement_modifier(hexes_moved: u32, jumping: bool) -> u32 {
    let base = match hexes_moved {
        0..=2 => 0,
        3..=4 => 1,
        5..=6 => 2,
        7..=9 => 3,
        10..=17 => 4,
        18..=24 => 5,
        _ => 6,
    };
    if jumping { base + 1 } else { base }
}

/// Radius within which enemies crowd a heavy ground unit.
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn enemy_crowding_radius() -> u32 {
    let scaled = (ENEMY_CROWDING_BASE_RANGE * ENEMY_CROWDING_FRACTION).ceil() as u32;
    scaled.max(ENEMY_CROWDING_MIN_RADIUS)
}

fn nearest_enemy<'a>(
    unit: &UnitState,
    destination: Coord,
    units: &'a [UnitState],
) -> Option<&'a UnitState> {
    units
        .iter()
        .filter(|u| u.is_enemy_of(unit) && u.is_active())
        .min_by_key(|u| (u.position.distance(destination), u.id))
}

fn fall_term(p: f32, weights: &BehaviorWeights) -> f32 {
    if p >= 1.0 {
        -CERTAIN_FAILURE_PENALTY
    } else {
        weights.weight(Weight::FallShame) * p
    }
}

#[expect(clippy::cast_precision_loss)]
fn aggression_term(unit: &UnitState, range: u32, weights: &BehaviorWeights) -> f32 {
    let range = if unit.class.is_infantry() && range == 0 {
        2
    } else {
        range
    };
    range as f32 * weights.weight(Weight::Aggression)
}

#[expect(clippy::cast_precision_loss)]
fn herding_term(
    unit: &UnitState,
    units: &[UnitState],
    range: u32,
    weights: &BehaviorWeights,
) -> f32 {
    let team_size = units
        .iter()
        .filter(|u| u.team == unit.team && !u.destroyed)
        .count();
    if team_size > 1 {
        range as f32 * weights.weight(Weight::Herding)
    } else {
        0.0
    }
}

#[expect(clippy::cast_precision_loss)]
fn movement_term(action: &UnitAction, weights: &BehaviorWeights) -> f32 {
    let favor = weights.weight(Weight::FavorHigherEvasion);
    if favor == 0.0 {
        return 0.0;
    }
    let tmm = target_movement_modifier(action.hexes_moved, action.jumping);
    tmm as f32 * (weights.weight(Weight::SelfPreservation) + favor)
}

#[expect(clippy::cast_precision_loss)]
fn facing_term(action: &UnitAction, enemy: &UnitState, weights: &BehaviorWeights) -> f32 {
    // desired facing points from the enemy through the destination
    let Some(desired) = enemy.position.direction_to(action.destination) else {
        return 0.0;
    };
    let steps = action.final_facing.steps_to(desired);
    let penalty = (FACING_STEP_PENALTY * (steps as f32 - 1.0)).max(0.0);
    penalty * weights.weight(Weight::FacingCorrection)
}

#[expect(clippy::cast_precision_loss)]
fn crowding_term(
    unit: &UnitState,
    action: &UnitAction,
    units: &[UnitState],
    weights: &BehaviorWeights,
) -> f32 {
    let anti_crowding = weights.weight(Weight::AntiCrowding);
    if !unit.class.is_heavy_ground() || anti_crowding == 0.0 {
        return 0.0;
    }
    let factor = 10.0 / (11.0 - anti_crowding);
    let enemy_radius = enemy_crowding_radius();
    let destination = action.destination;

    let crowding = units
        .iter()
        .filter(|u| u.id != unit.id && u.is_active())
        .filter(|u| {
            let dist = u.position.distance(destination);
            if u.is_enemy_of(unit) {
                dist <= enemy_radius
            } else {
                u.class.is_heavy_ground() && dist <= ALLY_CROWDING_RADIUS
            }
        })
        .count();
    crowding as f32 * factor
}

#[expect(clippy::cast_precision_loss)]
fn self_preservation_term(
    unit: &UnitState,
    action: &UnitAction,
    board: BoardDimensions,
    weights: &BehaviorWeights,
) -> f32 {
    if !unit.crippled {
        return 0.0;
    }
    let dist = board.distance_to_edge(action.destination, unit.home_edge);
    if dist > 0 {
        dist as f32 * weights.weight(Weight::SelfPreservation)
    } else {
        -HOME_EDGE_BONUS
    }
}

#[cfg(test)]
mod tests {
    use tactica_core::{DamageRef, Facing, HomeEdge, TeamId, UnitClass, UnitId};

    use super::*;
    use crate::damage::RangeTableDamage;

    const EPS: f32 = 1e-4;

    fn unit(id: u32, team: u32, x: i32, y: i32) -> UnitState {
        UnitState {
            position: Coord::new(x, y),
            ..UnitState::new(UnitId(id), TeamId(team))
        }
    }

    fn no_damage() -> BaseCostFunction<RangeTableDamage> {
        BaseCostFunction::new(RangeTableDamage::new(), BoardDimensions::new(30, 30))
    }

    fn only(weight: Weight, value: f32) -> BehaviorWeights {
        BehaviorWeights::zero().with(weight, value)
    }

    #[test]
    fn test_bravery_scenario() {
        // acting unit 1 at (5,5), enemy 2 five hexes south
        let units = vec![unit(1, 1, 5, 5), unit(2, 2, 5, 10)];
        let damage =
            RangeTableDamage::constant_at(5, &[(DamageRef(1), 8.0), (DamageRef(2), 5.0)]);
        let scorer = BaseCostFunction::new(damage, BoardDimensions::new(30, 30));
        let action = UnitAction::stay(UnitId(1), Coord::new(5, 5), Facing::S);

        let utility = scorer
            .resolve(&action, &units, &only(Weight::Bravery, 1.0))
            .unwrap();
        assert!((utility - 3.0).abs() < EPS, "utility = {utility}");
    }

    #[test]
    fn test_bravery_scaled_by_success_probability() {
        let units = vec![unit(1, 1, 5, 5), unit(2, 2, 5, 10)];
        let damage =
            RangeTableDamage::constant_at(5, &[(DamageRef(1), 8.0), (DamageRef(2), 5.0)]);
        let scorer = BaseCostFunction::new(damage, BoardDimensions::new(30, 30));
        let action = UnitAction {
            failure_probability: 0.5,
            ..UnitAction::stay(UnitId(1), Coord::new(5, 5), Facing::S)
        };
        let b = scorer
            .breakdown(&action, &units, &only(Weight::Bravery, 1.0))
            .unwrap();
        assert!((b.bravery - (0.5 * 8.0 - 5.0)).abs() < EPS);
    }

    #[test]
    fn test_unknown_unit_is_an_error() {
        let units = vec![unit(1, 1, 0, 0)];
        let action = UnitAction::stay(UnitId(9), Coord::new(0, 0), Facing::N);
        let err = no_damage()
            .resolve(&action, &units, &BehaviorWeights::zero())
            .unwrap_err();
        assert!(matches!(err, CostError::UnknownUnit { unit } if unit == UnitId(9)));
    }

    #[test]
    fn test_fall_term() {
        let units = vec![unit(1, 1, 0, 0), unit(2, 2, 0, 10)];
        let weights = only(Weight::FallShame, 0.5);
        let risky = UnitAction {
            failure_probability: 0.4,
            ..UnitAction::stay(UnitId(1), Coord::new(0, 0), Facing::S)
        };
        let b = no_damage().breakdown(&risky, &units, &weights).unwrap();
        assert!((b.fall - 0.2).abs() < EPS);
        assert!((b.total + 0.2).abs() < EPS);

        let certain = UnitAction {
            failure_probability: 1.0,
            ..risky
        };
        let b = no_damage().breakdown(&certain, &units, &weights).unwrap();
        assert_eq!(b.fall, -CERTAIN_FAILURE_PENALTY);
    }

    #[test]
    fn test_certain_failure_fall_term_is_subtracted_literally() {
        // fall = -1000 at p == 1, and utility -= fall
        let units = vec![unit(1, 1, 0, 0), unit(2, 2, 0, 10)];
        let certain = UnitAction {
            failure_probability: 1.0,
            ..UnitAction::stay(UnitId(1), Coord::new(0, 0), Facing::S)
        };
        let weights = BehaviorWeights::zero();
        let b = no_damage().breakdown(&certain, &units, &weights).unwrap();
        assert_eq!(b.fall, -1000.0);
        assert!((b.total - 1000.0).abs() < EPS, "total = {}", b.total);

        let utility = no_damage().resolve(&certain, &units, &weights).unwrap();
        assert!((utility - 1000.0).abs() < EPS);
    }

    #[test]
    fn test_aggression_uses_distance_to_nearest_enemy() {
        let units = vec![unit(1, 1, 0, 0), unit(2, 2, 0, 6), unit(3, 2, 0, 9)];
        let action = UnitAction::walk(UnitId(1), Coord::new(0, 0), Coord::new(0, 2), Facing::S);
        let b = no_damage()
            .breakdown(&action, &units, &only(Weight::Aggression, 2.0))
            .unwrap();
        assert!((b.aggression - 8.0).abs() < EPS);
        assert!((b.total + 8.0).abs() < EPS);
    }

    #[test]
    fn test_aggression_infantry_on_enemy_hex_counts_as_two() {
        let infantry = UnitState {
            class: UnitClass::Infantry,
            ..unit(1, 1, 0, 0)
        };
        let units = vec![infantry, unit(2, 2, 0, 3)];
        let action = UnitAction::walk(UnitId(1), Coord::new(0, 0), Coord::new(0, 3), Facing::S);
        let b = no_damage()
            .breakdown(&action, &units, &only(Weight::Aggression, 1.0))
            .unwrap();
        assert!((b.aggression - 2.0).abs() < EPS);

        // a mech on the same hex keeps distance 0
        let units = vec![unit(1, 1, 0, 0), unit(2, 2, 0, 3)];
        let b = no_damage()
            .breakdown(&action, &units, &only(Weight::Aggression, 1.0))
            .unwrap();
        assert_eq!(b.aggression, 0.0);
    }

    #[test]
    fn test_herding_uses_enemy_distance_when_team_has_allies() {
        let weights = only(Weight::Herding, 1.0);
        let action = UnitAction::stay(UnitId(1), Coord::new(0, 0), Facing::S);

        // the ally is adjacent but the enemy is 7 hexes away: the term follows the enemy
        let units = vec![unit(1, 1, 0, 0), unit(3, 1, 0, 1), unit(2, 2, 0, 7)];
        let b = no_damage().breakdown(&action, &units, &weights).unwrap();
        assert!((b.herding - 7.0).abs() < EPS);

        let alone = vec![unit(1, 1, 0, 0), unit(2, 2, 0, 7)];
        let b = no_damage().breakdown(&action, &alone, &weights).unwrap();
        assert_eq!(b.herding, 0.0);
    }

    #[test]
    fn test_movement_term_requires_favor_evasion() {
        let units = vec![unit(1, 1, 0, 0), unit(2, 2, 20, 20)];
        let action = UnitAction::walk(UnitId(1), Coord::new(0, 0), Coord::new(0, 5), Facing::S);

        let b = no_damage()
            .breakdown(&action, &units, &only(Weight::SelfPreservation, 1.0))
            .unwrap();
        assert_eq!(b.movement, 0.0);

        let weights = only(Weight::SelfPreservation, 1.0).with(Weight::FavorHigherEvasion, 0.5);
        let b = no_damage().breakdown(&action, &units, &weights).unwrap();
        // 5 hexes => modifier 2
        assert!((b.movement - 3.0).abs() < EPS);

        let jump = UnitAction {
            jumping: true,
            ..action
        };
        let b = no_damage().breakdown(&jump, &units, &weights).unwrap();
        assert!((b.movement - 4.5).abs() < EPS);
    }

    #[test]
    fn test_facing_term() {
        // enemy directly north of the destination: the desired facing is south
        let units = vec![unit(1, 1, 4, 10), unit(2, 2, 4, 4)];
        let weights = only(Weight::FacingCorrection, 1.0);
        let facing_cost = |facing| {
            let action = UnitAction::stay(UnitId(1), Coord::new(4, 10), facing);
            no_damage().breakdown(&action, &units, &weights).unwrap().facing
        };
        assert_eq!(facing_cost(Facing::S), 0.0);
        assert_eq!(facing_cost(Facing::SE), 0.0);
        assert!((facing_cost(Facing::NE) - 50.0).abs() < EPS);
        assert!((facing_cost(Facing::N) - 100.0).abs() < EPS);
    }

    #[test]
    fn test_crowding_counts_heavy_allies_and_enemies() {
        let units = vec![
            unit(1, 1, 5, 5),
            // heavy ally within 2
            unit(2, 1, 5, 6),
            // infantry ally within 2 does not count
            UnitState {
                class: UnitClass::Infantry,
                ..unit(3, 1, 5, 4)
            },
            // heavy ally too far
            unit(4, 1, 5, 9),
            // enemy within 8
            unit(5, 2, 5, 12),
            // enemy too far
            unit(6, 2, 5, 20),
        ];
        let action = UnitAction::stay(UnitId(1), Coord::new(5, 5), Facing::S);
        let b = no_damage()
            .breakdown(&action, &units, &only(Weight::AntiCrowding, 1.0))
            .unwrap();
        assert!((b.crowding - 2.0).abs() < EPS);

        let b = no_damage()
            .breakdown(&action, &units, &BehaviorWeights::zero())
            .unwrap();
        assert_eq!(b.crowding, 0.0);
    }

    #[test]
    fn test_crowding_factor_scales_with_anti_crowding() {
        // one heavy ally and one enemy nearby: count 2
        let units = vec![unit(1, 1, 5, 5), unit(2, 1, 5, 6), unit(3, 2, 5, 12)];
        let action = UnitAction::stay(UnitId(1), Coord::new(5, 5), Facing::S);

        // 10 / (11 - 6) = 2
        let b = no_damage()
            .breakdown(&action, &units, &only(Weight::AntiCrowding, 6.0))
            .unwrap();
        assert!((b.crowding - 4.0).abs() < EPS, "crowding = {}", b.crowding);

        // 10 / (11 - 9) = 5
        let b = no_damage()
            .breakdown(&action, &units, &only(Weight::AntiCrowding, 9.0))
            .unwrap();
        assert!((b.crowding - 10.0).abs() < EPS, "crowding = {}", b.crowding);
    }

    #[test]
    fn test_crowding_ignores_non_heavy_units() {
        let units = vec![
            UnitState {
                class: UnitClass::Aero,
                ..unit(1, 1, 5, 5)
            },
            unit(2, 1, 5, 6),
        ];
        let action = UnitAction::stay(UnitId(1), Coord::new(5, 5), Facing::S);
        let b = no_damage()
            .breakdown(&action, &units, &only(Weight::AntiCrowding, 1.0))
            .unwrap();
        assert_eq!(b.crowding, 0.0);
    }

    #[test]
    fn test_crowding_radius() {
        assert_eq!(enemy_crowding_radius(), 8);
    }

    #[test]
    fn test_self_preservation_for_crippled_unit() {
        let crippled = UnitState {
            crippled: true,
            home_edge: HomeEdge::North,
            ..unit(1, 1, 5, 5)
        };
        let units = vec![crippled, unit(2, 2, 20, 25)];
        let weights = only(Weight::SelfPreservation, 2.0);

        let away = UnitAction::walk(UnitId(1), Coord::new(5, 5), Coord::new(5, 3), Facing::N);
        let b = no_damage().breakdown(&away, &units, &weights).unwrap();
        assert!((b.self_preservation - 6.0).abs() < EPS);

        let home = UnitAction::walk(UnitId(1), Coord::new(5, 5), Coord::new(5, 0), Facing::N);
        let b = no_damage().breakdown(&home, &units, &weights).unwrap();
        assert_eq!(b.self_preservation, -HOME_EDGE_BONUS);
        assert!(b.total >= HOME_EDGE_BONUS - EPS);
    }

    #[test]
    fn test_off_board_applies_to_accumulated_utility() {
        let off_board = UnitState {
            off_board: true,
            ..unit(1, 1, 0, 0)
        };
        let units = vec![off_board, unit(2, 2, 0, 4)];
        let weights = only(Weight::Aggression, 1.0).with(Weight::OffBoard, 0.25);
        let action = UnitAction::stay(UnitId(1), Coord::new(0, 0), Facing::S);
        let b = no_damage().breakdown(&action, &units, &weights).unwrap();
        // accumulated utility is -4, off-board removes a quarter of it
        assert!((b.off_board + 1.0).abs() < EPS);
        assert!((b.total + 3.0).abs() < EPS);
    }

    #[test]
    fn test_no_enemy_zeroes_enemy_terms() {
        let units = vec![unit(1, 1, 0, 0), unit(2, 1, 0, 1)];
        let weights = BehaviorWeights::from_fn(|_| 1.0);
        let action = UnitAction::stay(UnitId(1), Coord::new(0, 0), Facing::S);
        let b = no_damage().breakdown(&action, &units, &weights).unwrap();
        assert_eq!(b.bravery, 0.0);
        assert_eq!(b.aggression, 0.0);
        assert_eq!(b.herding, 0.0);
        assert_eq!(b.facing, 0.0);
    }

    #[test]
    fn test_destroyed_enemies_are_ignored() {
        let dead = UnitState {
            destroyed: true,
            ..unit(2, 2, 0, 1)
        };
        let units = vec![unit(1, 1, 0, 0), dead, unit(3, 2, 0, 6)];
        let action = UnitAction::stay(UnitId(1), Coord::new(0, 0), Facing::S);
        let b = no_damage()
            .breakdown(&action, &units, &only(Weight::Aggression, 1.0))
            .unwrap();
        assert!((b.aggression - 6.0).abs() < EPS);
    }

    #[test]
    fn test_resolve_matches_breakdown_total() {
        let units = vec![unit(1, 1, 3, 3), unit(2, 1, 4, 3), unit(3, 2, 8, 9)];
        let weights = BehaviorWeights::from_fn(|i| 0.1 * (i % 5) as f32);
        let action = UnitAction::walk(UnitId(1), Coord::new(3, 3), Coord::new(3, 7), Facing::SE);
        let scorer = no_damage();
        let total = scorer.breakdown(&action, &units, &weights).unwrap().total;
        assert_eq!(scorer.resolve(&action, &units, &weights).unwrap(), total);
    }
}

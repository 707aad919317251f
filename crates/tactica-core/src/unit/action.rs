use serde::{Deserialize, Serialize};

use crate::grid::{Coord, Facing};

use super::state::{UnitId, UnitState};

/// One fully specified candidate move for a unit in the current round.
///
/// Movement legality and the path itself are computed elsewhere; an action only carries
/// the facts scoring needs. The fractional fields express how much of the unit's budget
/// the move consumes, in `[0.0, 1.0]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitAction {
    pub unit_id: UnitId,
    /// Facing of the unit once the move completes.
    pub final_facing: Facing,
    pub origin: Coord,
    pub destination: Coord,
    pub hexes_moved: u32,
    /// Length of the path actually walked, which may exceed `hexes_moved`.
    pub distance: u32,
    pub movement_points_used: u32,
    pub movement_points_available: u32,
    pub movement_fraction: f32,
    pub heat_fraction: f32,
    pub armor_fraction: f32,
    pub internal_fraction: f32,
    pub jumping: bool,
    pub prone: bool,
    pub legal: bool,
    /// Probability that executing the move fails (e.g. a fall), supplied by the caller.
    pub failure_probability: f32,
}

impl Default for UnitAction {
    fn default() -> Self {
        Self::stay(UnitId::default(), Coord::default(), Facing::default())
    }
}

impl UnitAction {
    /// Creates a legal action that keeps the unit in place with the given facing.
    #[must_use]
    pub const fn stay(unit_id: UnitId, position: Coord, facing: Facing) -> Self {
        Self {
            unit_id,
            final_facing: facing,
            origin: position,
            destination: position,
            hexes_moved: 0,
            distance: 0,
            movement_points_used: 0,
            movement_points_available: 0,
            movement_fraction: 0.0,
            heat_fraction: 0.0,
            armor_fraction: 0.0,
            internal_fraction: 0.0,
            jumping: false,
            prone: false,
            legal: true,
            failure_probability: 0.0,
        }
    }

    /// Creates a legal ground move from `origin` to `destination`.
    ///
    /// `hexes_moved` and `distance` are set to the grid distance between the two hexes.
    #[must_use]
    pub const fn walk(unit_id: UnitId, origin: Coord, destination: Coord, facing: Facing) -> Self {
        let hexes = origin.distance(destination);
        Self {
            hexes_moved: hexes,
            distance: hexes,
            destination,
            ..Self::stay(unit_id, origin, facing)
        }
    }
}

/// A replay record: the action taken in a round together with the full board state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionAndState {
    pub round: u32,
    pub action: UnitAction,
    pub units: Vec<UnitState>,
}

impl ActionAndState {
    #[must_use]
    pub fn new(round: u32, action: UnitAction, units: Vec<UnitState>) -> Self {
        Self {
            round,
            action,
            units,
        }
    }

    /// Returns the snapshot of the acting unit, if it is part of the recorded state.
    #[must_use]
    pub fn acting_unit(&self) -> Option<&UnitState> {
        self.units.iter().find(|u| u.id == self.action.unit_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TeamId;

    #[test]
    fn test_walk_counts_hexes() {
        let action = UnitAction::walk(UnitId(1), Coord::new(0, 0), Coord::new(0, 4), Facing::S);
        assert_eq!(action.hexes_moved, 4);
        assert_eq!(action.distance, 4);
        assert!(action.legal);
        assert_eq!(action.origin, Coord::new(0, 0));
    }

    #[test]
    fn test_acting_unit_lookup() {
        let units = vec![
            UnitState::new(UnitId(1), TeamId(1)),
            UnitState::new(UnitId(2), TeamId(2)),
        ];
        let record = ActionAndState::new(
            3,
            UnitAction::stay(UnitId(2), Coord::new(0, 0), Facing::N),
            units,
        );
        assert_eq!(record.acting_unit().map(|u| u.id), Some(UnitId(2)));

        let missing = ActionAndState::new(
            3,
            UnitAction::stay(UnitId(9), Coord::new(0, 0), Facing::N),
            vec![],
        );
        assert!(missing.acting_unit().is_none());
    }

    #[test]
    fn test_record_serialization_roundtrip() {
        let record = ActionAndState::new(
            1,
            UnitAction::walk(UnitId(4), Coord::new(2, 2), Coord::new(2, 5), Facing::S),
            vec![UnitState::new(UnitId(4), TeamId(1))],
        );
        let json = serde_json::to_string(&record).unwrap();
        let parsed: ActionAndState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }
}

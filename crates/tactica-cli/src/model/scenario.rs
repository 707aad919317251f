use serde::{Deserialize, Serialize};
use tactica_core::{ActionAndState, BoardDimensions, UnitAction, UnitId, UnitState};
use tactica_evaluator::damage::RangeTableDamage;

/// One decision point: the board and the candidate actions of the acting unit.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Scenario {
    #[serde(default)]
    pub board: BoardDimensions,
    #[serde(default)]
    pub damage: RangeTableDamage,
    pub unit: UnitId,
    pub units: Vec<UnitState>,
    pub actions: Vec<UnitAction>,
}

/// Recorded play used for calibration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReplayFile {
    #[serde(default)]
    pub board: BoardDimensions,
    #[serde(default)]
    pub damage: RangeTableDamage,
    pub sequences: Vec<Vec<ActionAndState>>,
}

#[cfg(test)]
mod tests {
    use tactica_core::{Coord, DamageRef, TeamId};
    use tactica_evaluator::damage::DamageModel as _;

    use super::*;

    #[test]
    fn test_parse_minimal_scenario() {
        let json = r#"{
            "damage": {"1": [8.0, 8.0, 5.0]},
            "unit": 1,
            "units": [
                {"id": 1, "team": 1, "position": {"x": 0, "y": 0}},
                {"id": 2, "team": 2, "position": {"x": 0, "y": 2}}
            ],
            "actions": [
                {"unit_id": 1, "origin": {"x": 0, "y": 0}, "destination": {"x": 0, "y": 1}}
            ]
        }"#;
        let scenario: Scenario = serde_json::from_str(json).unwrap();
        assert_eq!(scenario.board, BoardDimensions::default());
        assert_eq!(scenario.units[1].team, TeamId(2));
        assert_eq!(scenario.units[1].position, Coord::new(0, 2));
        assert!(scenario.actions[0].legal);

        let shooter = UnitState {
            damage_ref: DamageRef(1),
            ..scenario.units[0].clone()
        };
        assert_eq!(scenario.damage.damage_at_range(&shooter, 2), 5.0);
    }
}

use std::collections::{BTreeMap, BTreeSet};

use tactica_core::{Coord, TeamId, UnitState};

/// Side length, in hexes, of a territory cell.
pub const TERRITORY_CELL_SIZE: i32 = 3;

/// Number of territory cells per axis. Positions beyond the grid fall into the border cells.
pub const TERRITORY_GRID_SIZE: i32 = 16;

/// A coarse territory cell `(column, row)`.
pub type TerritoryCell = (i32, i32);

/// Coarse board control: the set of territory cells each team occupies.
///
/// A cell is claimed by a team when at least one of its active units stands in it.
/// Several teams may claim the same cell. Any number of teams is tracked.
///
/// # Example
///
/// ```
/// use tactica_core::{Coord, TeamId, UnitId, UnitState};
/// use tactica_evaluator::territory::Territory;
///
/// let at = |id, team, x, y| UnitState {
///     position: Coord::new(x, y),
///     ..UnitState::new(UnitId(id), TeamId(team))
/// };
/// let territory = Territory::from_units(&[at(1, 1, 0, 0), at(2, 1, 7, 7), at(3, 2, 1, 1)]);
/// assert_eq!(territory.cells_claimed(TeamId(1)), 2);
/// assert_eq!(territory.cells_claimed(TeamId(2)), 1);
/// assert!((territory.control(TeamId(1)) - 2.0 / 3.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Territory {
    claims: BTreeMap<TeamId, BTreeSet<TerritoryCell>>,
}

impl Territory {
    /// Computes the territory claimed by the active units in `units`.
    #[must_use]
    pub fn from_units(units: &[UnitState]) -> Self {
        let mut claims: BTreeMap<TeamId, BTreeSet<TerritoryCell>> = BTreeMap::new();
        for unit in units.iter().filter(|u| u.is_active()) {
            claims
                .entry(unit.team)
                .or_default()
                .insert(cell_of(unit.position));
        }
        Self { claims }
    }

    #[must_use]
    pub fn cells_claimed(&self, team: TeamId) -> usize {
        self.claims.get(&team).map_or(0, BTreeSet::len)
    }

    /// Returns the sum of every team's claimed cell count.
    #[must_use]
    pub fn total_claims(&self) -> usize {
        self.claims.values().map(BTreeSet::len).sum()
    }

    #[must_use]
    pub fn teams(&self) -> impl Iterator<Item = TeamId> + '_ {
        self.claims.keys().copied()
    }

    /// Returns the share of all claims held by `team`, or 0 when nothing is claimed.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn control(&self, team: TeamId) -> f32 {
        let total = self.total_claims();
        if total == 0 {
            return 0.0;
        }
        self.cells_claimed(team) as f32 / total as f32
    }
}

/// Returns the territory cell containing `coord`.
#[must_use]
pub fn cell_of(coord: Coord) -> TerritoryCell {
    let clamp = |v: i32| (v.div_euclid(TERRITORY_CELL_SIZE)).clamp(0, TERRITORY_GRID_SIZE - 1);
    (clamp(coord.x), clamp(coord.y))
}

#[cfg(test)]
mod tests {
    use tactica_core::UnitId;

    use super::*;

    fn at(id: u32, team: u32, x: i32, y: i32) -> UnitState {
        UnitState {
            position: Coord::new(x, y),
            ..UnitState::new(UnitId(id), TeamId(team))
        }
    }

    #[test]
    fn test_cell_of_clamps_to_grid() {
        assert_eq!(cell_of(Coord::new(0, 0)), (0, 0));
        assert_eq!(cell_of(Coord::new(2, 5)), (0, 1));
        assert_eq!(cell_of(Coord::new(47, 48)), (15, 15));
        assert_eq!(cell_of(Coord::new(200, -4)), (15, 0));
    }

    #[test]
    fn test_units_in_same_cell_claim_once() {
        let territory = Territory::from_units(&[at(1, 1, 0, 0), at(2, 1, 2, 2)]);
        assert_eq!(territory.cells_claimed(TeamId(1)), 1);
        assert_eq!(territory.control(TeamId(1)), 1.0);
    }

    #[test]
    fn test_shared_cells_count_for_each_team() {
        let territory = Territory::from_units(&[at(1, 1, 0, 0), at(2, 2, 1, 1)]);
        assert_eq!(territory.total_claims(), 2);
        assert_eq!(territory.control(TeamId(1)), 0.5);
    }

    #[test]
    fn test_more_than_four_teams() {
        let units: Vec<_> = (0..6).map(|t| at(t, t, 3 * t as i32, 0)).collect();
        let territory = Territory::from_units(&units);
        assert_eq!(territory.teams().count(), 6);
        assert!((territory.control(TeamId(5)) - 1.0 / 6.0).abs() < 1e-6);
    }

    #[test]
    fn test_inactive_units_claim_nothing() {
        let destroyed = UnitState {
            destroyed: true,
            ..at(1, 1, 0, 0)
        };
        let off_board = UnitState {
            off_board: true,
            ..at(2, 1, 9, 9)
        };
        let territory = Territory::from_units(&[destroyed, off_board, at(3, 2, 4, 4)]);
        assert_eq!(territory.cells_claimed(TeamId(1)), 0);
        assert_eq!(territory.control(TeamId(1)), 0.0);
        assert_eq!(territory.control(TeamId(2)), 1.0);
    }

    #[test]
    fn test_empty_board_has_no_control() {
        assert_eq!(Territory::from_units(&[]).control(TeamId(1)), 0.0);
    }
}

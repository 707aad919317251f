use serde::{Deserialize, Serialize};

use super::coord::Coord;

/// Size of the battlefield in hexes.
///
/// The board itself (terrain, elevation) lives outside this crate; scoring only needs
/// its extent to measure how far a unit is from its home edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardDimensions {
    pub width: u32,
    pub height: u32,
}

impl BoardDimensions {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns the number of hexes between `coord` and the given edge.
    ///
    /// Hexes on the edge itself and hexes beyond it are at distance 0.
    ///
    /// ```
    /// use tactica_core::{BoardDimensions, Coord, HomeEdge};
    ///
    /// let board = BoardDimensions::new(16, 17);
    /// assert_eq!(board.distance_to_edge(Coord::new(4, 0), HomeEdge::North), 0);
    /// assert_eq!(board.distance_to_edge(Coord::new(4, 6), HomeEdge::South), 10);
    /// assert_eq!(board.distance_to_edge(Coord::new(4, 6), HomeEdge::East), 11);
    /// ```
    #[must_use]
    pub fn distance_to_edge(&self, coord: Coord, edge: HomeEdge) -> u32 {
        let last_x = i64::from(self.width) - 1;
        let last_y = i64::from(self.height) - 1;
        let dist = match edge {
            HomeEdge::North => i64::from(coord.y),
            HomeEdge::South => last_y - i64::from(coord.y),
            HomeEdge::West => i64::from(coord.x),
            HomeEdge::East => last_x - i64::from(coord.x),
        };
        u32::try_from(dist.max(0)).unwrap_or(u32::MAX)
    }

    /// Returns `true` if `coord` lies on the board.
    #[must_use]
    pub fn contains(&self, coord: Coord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && i64::from(coord.x) < i64::from(self.width)
            && i64::from(coord.y) < i64::from(self.height)
    }
}

impl Default for BoardDimensions {
    fn default() -> Self {
        Self::new(16, 17)
    }
}

/// The board edge a unit retreats toward.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum HomeEdge {
    #[default]
    North,
    South,
    East,
    West,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_to_each_edge() {
        let board = BoardDimensions::new(30, 20);
        let coord = Coord::new(5, 8);
        assert_eq!(board.distance_to_edge(coord, HomeEdge::North), 8);
        assert_eq!(board.distance_to_edge(coord, HomeEdge::South), 11);
        assert_eq!(board.distance_to_edge(coord, HomeEdge::West), 5);
        assert_eq!(board.distance_to_edge(coord, HomeEdge::East), 24);
    }

    #[test]
    fn test_distance_beyond_edge_is_zero() {
        let board = BoardDimensions::new(10, 10);
        assert_eq!(board.distance_to_edge(Coord::new(-2, 4), HomeEdge::West), 0);
        assert_eq!(board.distance_to_edge(Coord::new(3, 12), HomeEdge::South), 0);
    }

    #[test]
    fn test_contains() {
        let board = BoardDimensions::new(10, 10);
        assert!(board.contains(Coord::new(0, 0)));
        assert!(board.contains(Coord::new(9, 9)));
        assert!(!board.contains(Coord::new(10, 0)));
        assert!(!board.contains(Coord::new(0, -1)));
    }
}

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

use super::facing::Facing;

/// A hex on the battlefield grid.
///
/// Hexes are addressed by offset coordinates: `x` is the column and `y` the row.
/// Odd columns are shifted half a hex down, so the six neighbors of a hex depend on
/// the parity of its column.
///
/// # Example
///
/// ```
/// use tactica_core::Coord;
///
/// let origin = Coord::new(0, 0);
/// assert_eq!(origin.distance(Coord::new(1, 0)), 1);
/// assert_eq!(origin.distance(Coord::new(1, 1)), 2);
/// assert_eq!(origin.distance(Coord::new(0, 5)), 5);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Converts offset coordinates to cube coordinates `(q, r, s)` with `q + r + s == 0`.
    const fn to_cube(self) -> (i32, i32, i32) {
        let q = self.x;
        let r = self.y - (self.x - (self.x & 1)) / 2;
        (q, r, -q - r)
    }

    /// Returns the grid distance (number of hex steps) to `other`.
    #[must_use]
    pub const fn distance(self, other: Coord) -> u32 {
        let (q1, r1, s1) = self.to_cube();
        let (q2, r2, s2) = other.to_cube();
        let dq = (q1 - q2).unsigned_abs();
        let dr = (r1 - r2).unsigned_abs();
        let ds = (s1 - s2).unsigned_abs();
        let max = if dq > dr { dq } else { dr };
        if max > ds { max } else { ds }
    }

    /// Returns the straight-line distance between the raw `(x, y)` values.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn euclidean_distance(self, other: Coord) -> f32 {
        let dx = (self.x - other.x) as f32;
        let dy = (self.y - other.y) as f32;
        dx.hypot(dy)
    }

    /// Returns the straight-line distance from this hex to a fractional point in `(x, y)` space.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn euclidean_distance_to_point(self, (px, py): (f32, f32)) -> f32 {
        (self.x as f32 - px).hypot(self.y as f32 - py)
    }

    /// Returns the facing whose 60° sector contains the bearing from this hex to `other`.
    ///
    /// Returns `None` when both hexes are the same.
    #[must_use]
    pub fn direction_to(self, other: Coord) -> Option<Facing> {
        if self == other {
            return None;
        }
        let (x1, y1) = self.to_pixel();
        let (x2, y2) = other.to_pixel();
        // bearing measured clockwise from north (negative y)
        let bearing = (x2 - x1).atan2(y1 - y2).rem_euclid(2.0 * PI);
        #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let sector = (bearing / (PI / 3.0)).round() as usize;
        Some(Facing::from_index(sector))
    }

    #[expect(clippy::cast_precision_loss)]
    fn to_pixel(self) -> (f32, f32) {
        let shift = if self.x & 1 == 1 { 0.5 } else { 0.0 };
        (
            1.5 * self.x as f32,
            3.0_f32.sqrt() * (self.y as f32 + shift),
        )
    }
}

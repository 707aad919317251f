use serde::{Deserialize, Serialize};

/// One of the six hex-side directions, clockwise from north.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum Facing {
    #[default]
    N,
    NE,
    SE,
    S,
    SW,
    NW,
}

impl Facing {
    pub const ALL: [Facing; 6] = [
        Facing::N,
        Facing::NE,
        Facing::SE,
        Facing::S,
        Facing::SW,
        Facing::NW,
    ];

    /// Returns the facing for `index`, wrapping modulo 6.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index % 6]
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn opposite(self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// Returns the number of 60° turns separating two facings (0 to 3).
    ///
    /// ```
    /// use tactica_core::Facing;
    ///
    /// assert_eq!(Facing::N.steps_to(Facing::N), 0);
    /// assert_eq!(Facing::N.steps_to(Facing::NW), 1);
    /// assert_eq!(Facing::NE.steps_to(Facing::SW), 3);
    /// ```
    #[must_use]
    pub const fn steps_to(self, other: Facing) -> u32 {
        let diff = self.index().abs_diff(other.index());
        #[expect(clippy::cast_possible_truncation)]
        let steps = (if diff > 3 { 6 - diff } else { diff }) as u32;
        steps
    }
}

pub use self::{board::*, coord::*, facing::*};

pub(crate) mod board;
pub(crate) mod coord;
pub(crate) mod facing;

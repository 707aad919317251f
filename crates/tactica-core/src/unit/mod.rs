pub use self::{action::*, state::*};

pub(crate) mod action;
pub(crate) mod state;

//! Value snapshots shared by the tactical scoring and clustering crates.
//!
//! Everything in this crate is plain data produced by the external simulation once per
//! round: unit snapshots, candidate actions, replay records, and the hex-grid geometry
//! used to measure distances and bearings between them.
//!
//! - [`Coord`], [`Facing`], [`BoardDimensions`], [`HomeEdge`] - grid geometry
//! - [`UnitState`] - a unit at a given round
//! - [`UnitAction`] - a candidate move for a unit
//! - [`ActionAndState`] - a recorded action with the board it was taken on

pub use self::{grid::*, unit::*};

pub mod grid;
pub mod unit;

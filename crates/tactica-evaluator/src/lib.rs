//! Tactical decision scoring for units on a hex battlefield.
//!
//! This crate ranks candidate actions for the units an agent controls. Every candidate is
//! reduced to a single utility value by a cost function driven by a tunable behavior
//! weight vector; the decision loop then executes the highest-utility action.
//!
//! # Architecture
//!
//! ```text
//! BehaviorWeights ──┐
//!                   ▼
//! UnitAction ──► CostFunction ──► utility ──► ActionSelector ──► best action
//!                   ▲
//!          current (and next) board
//! ```
//!
//! - [`behavior_weights`] - the 29-dimensional weight vector and its transforms
//! - [`cost_function`] - the [`CostFunction`](cost_function::CostFunction) trait shared by
//!   every scorer
//! - [`base_cost`] - the base scorer (bravery, aggression, facing, crowding, ...)
//! - [`extended_cost`] - the extended scorer adding victory, resource, control, and
//!   curiosity objectives for recorded transitions
//! - [`visit_registry`] - session memory behind the curiosity objective
//! - [`territory`] - coarse board-control estimation
//! - [`damage`] - the damage-at-range seam to the simulation's weapon data
//! - [`action_selector`] - picks the best legal candidate
//!
//! # Concurrency
//!
//! [`base_cost::BaseCostFunction`] is pure and can score candidates from any number of
//! threads. [`extended_cost::ExtendedCostFunction`] owns a session registry; give each
//! parallel worker its own instance so sessions cannot observe each other's visits.

pub mod action_selector;
pub mod base_cost;
pub mod behavior_weights;
pub mod cost_function;
pub mod damage;
pub mod extended_cost;
pub mod territory;
pub mod visit_registry;

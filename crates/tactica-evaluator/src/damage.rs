//! Damage-at-range queries.
//!
//! Weapon tables are owned by the simulation. Scorers only ask one question of them:
//! "how much damage can this unit deal at this range?" The [`DamageModel`] trait is that
//! seam. [`RangeTableDamage`] is a ready-made implementation backed by caller-supplied
//! per-range numbers, used by the command-line tools and by tests.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};
use tactica_core::{DamageRef, UnitState};

/// Answers damage-at-range queries for units.
pub trait DamageModel: fmt::Debug + Send + Sync {
    /// Returns the expected damage `unit` can deal to a target `range` hexes away.
    fn damage_at_range(&self, unit: &UnitState, range: u32) -> f32;
}

impl<T> DamageModel for &T
where
    T: DamageModel + ?Sized,
{
    fn damage_at_range(&self, unit: &UnitState, range: u32) -> f32 {
        (**self).damage_at_range(unit, range)
    }
}

impl<T> DamageModel for Box<T>
where
    T: DamageModel + ?Sized,
{
    fn damage_at_range(&self, unit: &UnitState, range: u32) -> f32 {
        (**self).damage_at_range(unit, range)
    }
}

/// Damage lookup keyed by each unit's [`DamageRef`].
///
/// Entry `i` of a table is the damage dealt at range `i`. Ranges past the end of the
/// table and units without a table deal no damage.
///
/// # Example
///
/// ```
/// use tactica_core::{DamageRef, TeamId, UnitId, UnitState};
/// use tactica_evaluator::damage::{DamageModel, RangeTableDamage};
///
/// let damage = RangeTableDamage::new().with_table(DamageRef(1), vec![10.0, 10.0, 6.0]);
/// let unit = UnitState::new(UnitId(1), TeamId(1));
/// assert_eq!(damage.damage_at_range(&unit, 2), 6.0);
/// assert_eq!(damage.damage_at_range(&unit, 3), 0.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RangeTableDamage {
    tables: BTreeMap<DamageRef, Vec<f32>>,
}

impl RangeTableDamage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_table(mut self, damage_ref: DamageRef, table: Vec<f32>) -> Self {
        self.insert(damage_ref, table);
        self
    }

    pub fn insert(&mut self, damage_ref: DamageRef, table: Vec<f32>) {
        self.tables.insert(damage_ref, table);
    }

    /// Returns a model in which every listed reference deals `damage` at `range` only.
    #[must_use]
    pub fn constant_at(range: u32, entries: &[(DamageRef, f32)]) -> Self {
        let len = usize::try_from(range).map_or(0, |r| r + 1);
        let mut model = Self::new();
        for (damage_ref, damage) in entries {
            let mut table = vec![0.0; len];
            if let Some(last) = table.last_mut() {
                *last = *damage;
            }
            model.insert(*damage_ref, table);
        }
        model
    }
}

impl DamageModel for RangeTableDamage {
    fn damage_at_range(&self, unit: &UnitState, range: u32) -> f32 {
        let Ok(range) = usize::try_from(range) else {
            return 0.0;
        };
        self.tables
            .get(&unit.damage_ref)
            .and_then(|table| table.get(range))
            .copied()
            .unwrap_or(0.0)
    }
}

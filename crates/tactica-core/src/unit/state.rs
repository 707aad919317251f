use serde::{Deserialize, Serialize};

use crate::grid::{Coord, Facing, HomeEdge};

/// Identifier of a unit, unique across the whole battlefield.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("#{_0}")]
#[serde(transparent)]
pub struct UnitId(pub u32);

/// Identifier of a team. Units on the same team are allies.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("team {_0}")]
#[serde(transparent)]
pub struct TeamId(pub u32);

/// Identifier of the player controlling a unit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

/// Opaque handle used to ask the damage model what a unit can deal at a given range.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DamageRef(pub u32);

/// Broad classification of a unit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum UnitClass {
    #[default]
    Mech,
    ProtoMech,
    Vehicle,
    Infantry,
    BattleArmor,
    Aero,
}

impl UnitClass {
    /// Returns `true` for ground units heavy enough to block each other.
    #[must_use]
    pub const fn is_heavy_ground(self) -> bool {
        matches!(self, Self::Mech | Self::ProtoMech | Self::Vehicle)
    }

    /// Returns `true` for unarmored or infantry-class units.
    #[must_use]
    pub const fn is_infantry(self) -> bool {
        matches!(self, Self::Infantry | Self::BattleArmor)
    }
}

/// Tactical role tag of a unit.
///
/// Variant order is significant: it breaks ties when picking a cluster's majority role.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum UnitRole {
    Ambusher,
    Brawler,
    Juggernaut,
    MissileBoat,
    Scout,
    Skirmisher,
    Sniper,
    Striker,
    #[default]
    Undetermined,
}

/// Snapshot of a single unit at a given round.
///
/// Snapshots are produced by the simulation once per round and are never mutated by
/// scoring. Every field is integral so that two snapshots compare and hash by value.
///
/// # Example
///
/// ```
/// use tactica_core::{Coord, TeamId, UnitId, UnitState};
///
/// let unit = UnitState {
///     position: Coord::new(4, 7),
///     crippled: true,
///     ..UnitState::new(UnitId(1), TeamId(2))
/// };
/// assert_eq!(unit.team, TeamId(2));
/// assert!(unit.is_active());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitState {
    pub id: UnitId,
    pub team: TeamId,
    pub round: u32,
    pub player: PlayerId,
    pub class: UnitClass,
    pub role: UnitRole,
    pub position: Coord,
    pub facing: Facing,
    pub movement_points: u32,
    pub heat: u32,
    pub prone: bool,
    pub airborne: bool,
    pub off_board: bool,
    pub crippled: bool,
    pub destroyed: bool,
    pub done: bool,
    /// Remaining armor, in percent of the original total.
    pub armor_percent: u8,
    /// Remaining internal structure, in percent of the original total.
    pub internal_percent: u8,
    pub max_weapon_range: u32,
    pub damage_dealt: u32,
    pub turns_without_movement: u32,
    pub home_edge: HomeEdge,
    pub battle_value: u32,
    pub damage_ref: DamageRef,
}

impl Default for UnitState {
    fn default() -> Self {
        Self::new(UnitId::default(), TeamId::default())
    }
}

impl UnitState {
    /// Creates an undamaged, on-board unit at the origin.
    #[must_use]
    pub const fn new(id: UnitId, team: TeamId) -> Self {
        Self {
            id,
            team,
            round: 0,
            player: PlayerId(team.0),
            class: UnitClass::Mech,
            role: UnitRole::Undetermined,
            position: Coord::new(0, 0),
            facing: Facing::N,
            movement_points: 0,
            heat: 0,
            prone: false,
            airborne: false,
            off_board: false,
            crippled: false,
            destroyed: false,
            done: false,
            armor_percent: 100,
            internal_percent: 100,
            max_weapon_range: 0,
            damage_dealt: 0,
            turns_without_movement: 0,
            home_edge: HomeEdge::North,
            battle_value: 0,
            damage_ref: DamageRef(id.0),
        }
    }

    /// Returns `true` if the unit is on the board and not destroyed.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !self.destroyed && !self.off_board
    }

    #[must_use]
    pub fn is_enemy_of(&self, other: &UnitState) -> bool {
        self.team != other.team
    }
}

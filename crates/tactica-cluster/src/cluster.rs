use std::collections::BTreeMap;

use serde::Serialize;
use tactica_core::{Coord, TeamId, UnitId, UnitRole, UnitState};

/// Index of a cluster within the most recent clustering build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ClusterId(pub usize);

/// A size-bounded, spatially coherent group of same-team units.
///
/// Members are kept in a fixed order (the order the clustering pass reached them), which
/// makes every derived value reproducible.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cluster {
    id: ClusterId,
    team: TeamId,
    members: Vec<UnitState>,
    centroid: (f32, f32),
    midpoint: Coord,
    role: UnitRole,
}

impl Cluster {
    /// Creates a cluster and computes its centroid and majority role.
    #[must_use]
    pub fn new(id: ClusterId, team: TeamId, members: Vec<UnitState>) -> Self {
        let mut cluster = Self {
            id,
            team,
            members,
            centroid: (0.0, 0.0),
            midpoint: Coord::default(),
            role: UnitRole::Undetermined,
        };
        cluster.compute_centroid();
        cluster.compute_cluster_role();
        cluster
    }

    #[must_use]
    pub fn id(&self) -> ClusterId {
        self.id
    }

    #[must_use]
    pub fn team(&self) -> TeamId {
        self.team
    }

    #[must_use]
    pub fn members(&self) -> &[UnitState] {
        &self.members
    }

    pub fn member_ids(&self) -> impl Iterator<Item = UnitId> + '_ {
        self.members.iter().map(|m| m.id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[must_use]
    pub fn contains(&self, unit: UnitId) -> bool {
        self.members.iter().any(|m| m.id == unit)
    }

    /// Returns the arithmetic mean of the member positions.
    #[must_use]
    pub fn centroid(&self) -> (f32, f32) {
        self.centroid
    }

    /// Returns the centroid rounded to the nearest hex coordinates.
    #[must_use]
    pub fn midpoint(&self) -> Coord {
        self.midpoint
    }

    /// Returns the most frequent role among the members.
    #[must_use]
    pub fn role(&self) -> UnitRole {
        self.role
    }

    /// Recomputes the centroid from the current member positions.
    #[expect(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn compute_centroid(&mut self) {
        if self.members.is_empty() {
            return;
        }
        let n = self.members.len() as f32;
        let (sx, sy) = self.members.iter().fold((0.0, 0.0), |(sx, sy), m| {
            (sx + m.position.x as f32, sy + m.position.y as f32)
        });
        self.centroid = (sx / n, sy / n);
        self.midpoint = Coord::new(self.centroid.0.round() as i32, self.centroid.1.round() as i32);
    }

    /// Recomputes the majority role.
    ///
    /// Ties resolve to the lowest role in [`UnitRole`] order.
    pub fn compute_cluster_role(&mut self) {
        let mut counts: BTreeMap<UnitRole, usize> = BTreeMap::new();
        for member in &self.members {
            *counts.entry(member.role).or_default() += 1;
        }
        let mut best: Option<(UnitRole, usize)> = None;
        for (role, count) in counts {
            if best.is_none_or(|(_, best_count)| count > best_count) {
                best = Some((role, count));
            }
        }
        self.role = best.map_or(UnitRole::Undetermined, |(role, _)| role);
    }

    /// Replaces member snapshots with the matching entries of `units`.
    ///
    /// Members missing from `units` keep their last known snapshot.
    pub(crate) fn refresh_members(&mut self, units: &BTreeMap<UnitId, &UnitState>) {
        for member in &mut self.members {
            if let Some(current) = units.get(&member.id) {
                member.clone_from(current);
            }
        }
    }
}

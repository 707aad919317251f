//! Constrained connected-components clustering of units.
//!
//! [`ClusteringService::build_clusters`] groups the units of each team into formations:
//!
//! 1. **Partition** - split the unit list by team
//! 2. **Connect** - breadth-first search where two same-team units are adjacent when they
//!    are at most `max_dist` hexes apart; each search yields one connected component
//! 3. **Split** - a component larger than `max_cluster_size` is ordered by Euclidean
//!    distance to its own centroid and cut into consecutive chunks of `max_cluster_size`
//!    (the last chunk may be smaller)
//!
//! Each build replaces every cluster and assignment from the previous build. The
//! assignments persist until the next build; nothing resets them between rounds.
//!
//! Traversal follows unit id order, and split ties are broken by unit id, so a build is
//! fully reproducible for a given input.
//!
//! Cost is quadratic in the number of units per team, which is fine for the tens of units
//! a team fields.

use std::{
    collections::{BTreeMap, VecDeque},
    num::NonZeroUsize,
};

use tactica_core::{Coord, TeamId, UnitId, UnitState};
use tracing::debug;

use crate::cluster::{Cluster, ClusterId};

/// Parameters of a clustering pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClusterConfig {
    /// Maximum grid distance between two units for them to be adjacent.
    pub max_dist: u32,
    /// Maximum number of units in a single cluster.
    pub max_cluster_size: NonZeroUsize,
}

impl ClusterConfig {
    pub const DEFAULT_MAX_DIST: u32 = 5;
    pub const DEFAULT_MAX_CLUSTER_SIZE: NonZeroUsize = NonZeroUsize::new(6).unwrap();
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            max_dist: Self::DEFAULT_MAX_DIST,
            max_cluster_size: Self::DEFAULT_MAX_CLUSTER_SIZE,
        }
    }
}

/// Builds clusters and answers lookups against the most recent build.
#[derive(Debug, Clone, Default)]
pub struct ClusteringService {
    config: ClusterConfig,
    clusters: Vec<Cluster>,
    assignments: BTreeMap<UnitId, ClusterId>,
}

impl ClusteringService {
    #[must_use]
    pub fn new(config: ClusterConfig) -> Self {
        Self {
            config,
            clusters: vec![],
            assignments: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> ClusterConfig {
        self.config
    }

    /// Returns the clusters of the most recent build.
    #[must_use]
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    /// Rebuilds every cluster from `units`.
    ///
    /// Afterwards every input unit is assigned to exactly one cluster.
    pub fn build_clusters(&mut self, units: &[UnitState]) -> &[Cluster] {
        self.clusters.clear();
        self.assignments.clear();

        let mut by_team: BTreeMap<TeamId, Vec<&UnitState>> = BTreeMap::new();
        for unit in units {
            by_team.entry(unit.team).or_default().push(unit);
        }

        for (team, mut members) in by_team {
            members.sort_by_key(|u| u.id);
            for component in connected_components(&members, self.config.max_dist) {
                for chunk in split_component(component, self.config.max_cluster_size) {
                    self.push_cluster(team, chunk);
                }
            }
        }

        debug!(
            units = units.len(),
            clusters = self.clusters.len(),
            "built clusters"
        );
        &self.clusters
    }

    fn push_cluster(&mut self, team: TeamId, members: Vec<&UnitState>) {
        let id = ClusterId(self.clusters.len());
        for member in &members {
            self.assignments.insert(member.id, id);
        }
        let members = members.into_iter().cloned().collect();
        self.clusters.push(Cluster::new(id, team, members));
    }

    /// Returns the cluster `unit` was assigned to by the most recent build.
    #[must_use]
    pub fn cluster(&self, unit: UnitId) -> Option<&Cluster> {
        let id = self.assignments.get(&unit)?;
        self.clusters.get(id.0)
    }

    /// Returns the rounded centroid of the cluster `unit` belongs to.
    #[must_use]
    pub fn cluster_midpoint(&self, unit: UnitId) -> Option<Coord> {
        self.cluster(unit).map(Cluster::midpoint)
    }

    /// Returns the cluster of another team whose centroid is nearest to `cluster`'s.
    ///
    /// Distances are grid distances between rounded centroids; ties go to the lowest
    /// cluster id. Returns `None` when no other team has a cluster.
    #[must_use]
    pub fn closest_enemy_cluster(&self, cluster: &Cluster) -> Option<&Cluster> {
        let origin = cluster.midpoint();
        self.clusters
            .iter()
            .filter(|c| c.team() != cluster.team())
            .min_by_key(|c| (origin.distance(c.midpoint()), c.id()))
    }

    /// Recomputes every centroid from refreshed member snapshots without re-clustering.
    ///
    /// Members are matched to `units` by id; members absent from `units` keep their last
    /// known position. Membership itself never changes.
    pub fn update_cluster_centroids(&mut self, units: &[UnitState]) {
        let lookup: BTreeMap<UnitId, &UnitState> = units.iter().map(|u| (u.id, u)).collect();
        for cluster in &mut self.clusters {
            cluster.refresh_members(&lookup);
            cluster.compute_centroid();
        }
    }
}

/// Returns the connected components of `members` (sorted by id) in breadth-first order.
fn connected_components<'a>(members: &[&'a UnitState], max_dist: u32) -> Vec<Vec<&'a UnitState>> {
    let mut visited = vec![false; members.len()];
    let mut components = vec![];

    for start in 0..members.len() {
        if visited[start] {
            continue;
        }
        visited[start] = true;
        let mut queue = VecDeque::from([start]);
        let mut component = vec![];
        while let Some(i) = queue.pop_front() {
            component.push(members[i]);
            for (j, other) in members.iter().enumerate() {
                if !visited[j] && members[i].position.distance(other.position) <= max_dist {
                    visited[j] = true;
                    queue.push_back(j);
                }
            }
        }
        components.push(component);
    }
    components
}

/// Cuts an oversized component into chunks ordered by distance to its centroid.
fn split_component(
    mut component: Vec<&UnitState>,
    max_cluster_size: NonZeroUsize,
) -> Vec<Vec<&UnitState>> {
    let max = max_cluster_size.get();
    if component.len() <= max {
        return vec![component];
    }

    let centroid = centroid_of(&component);
    component.sort_by(|a, b| {
        let da = a.position.euclidean_distance_to_point(centroid);
        let db = b.position.euclidean_distance_to_point(centroid);
        da.total_cmp(&db).then(a.id.cmp(&b.id))
    });
    debug!(
        team = %component[0].team,
        size = component.len(),
        max,
        "splitting oversized component"
    );
    component.chunks(max).map(<[_]>::to_vec).collect()
}

#[expect(clippy::cast_precision_loss)]
fn centroid_of(units: &[&UnitState]) -> (f32, f32) {
    let n = units.len() as f32;
    let (sx, sy) = units.iter().fold((0.0, 0.0), |(sx, sy), u| {
        (sx + u.position.x as f32, sy + u.position.y as f32)
    });
    (sx / n, sy / n)
}

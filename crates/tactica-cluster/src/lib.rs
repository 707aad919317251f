//! Formation clustering for group-level tactics.
//!
//! Units of the same team that stand close together are grouped into [`Cluster`]s, each
//! with a centroid and a majority role. Higher-level tactics use the clusters to reason
//! about formations instead of individual units: where a group stands
//! ([`ClusteringService::cluster_midpoint`]) and which opposing group it faces
//! ([`ClusteringService::closest_enemy_cluster`]).
//!
//! Clusters are rebuilt from scratch by [`ClusteringService::build_clusters`]; between
//! rebuilds, [`ClusteringService::update_cluster_centroids`] tracks movement without
//! changing membership.
//!
//! # Usage
//!
//! ```rust
//! use tactica_cluster::{ClusterConfig, ClusteringService};
//! use tactica_core::{Coord, TeamId, UnitId, UnitState};
//!
//! let unit = |id, team, y| UnitState {
//!     position: Coord::new(5, y),
//!     ..UnitState::new(UnitId(id), TeamId(team))
//! };
//! let units = [unit(1, 1, 5), unit(2, 1, 6), unit(3, 2, 26)];
//!
//! let mut service = ClusteringService::new(ClusterConfig::default());
//! service.build_clusters(&units);
//!
//! let ours = service.cluster(UnitId(1)).unwrap();
//! assert!(ours.contains(UnitId(2)));
//! let theirs = service.closest_enemy_cluster(ours).unwrap();
//! assert!(theirs.contains(UnitId(3)));
//! ```

pub use self::{cluster::*, service::*};

mod cluster;
mod service;

use std::{num::NonZeroUsize, path::PathBuf};

use serde::Serialize;
use tactica_cluster::{Cluster, ClusterConfig, ClusterId, ClusteringService};
use tactica_core::{Coord, TeamId, UnitId, UnitRole};

use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ClusterArg {
    /// Units file (JSON array of unit states)
    #[arg(long)]
    units: PathBuf,
    /// Maximum grid distance between adjacent units
    #[arg(long, default_value_t = ClusterConfig::DEFAULT_MAX_DIST)]
    max_dist: u32,
    /// Maximum number of units per cluster
    #[arg(long, default_value_t = ClusterConfig::DEFAULT_MAX_CLUSTER_SIZE)]
    max_cluster_size: NonZeroUsize,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct ClusterReport {
    id: ClusterId,
    team: TeamId,
    members: Vec<UnitId>,
    centroid: (f32, f32),
    midpoint: Coord,
    role: UnitRole,
    closest_enemy_cluster: Option<ClusterId>,
}

impl ClusterReport {
    fn new(service: &ClusteringService, cluster: &Cluster) -> Self {
        Self {
            id: cluster.id(),
            team: cluster.team(),
            members: cluster.member_ids().collect(),
            centroid: cluster.centroid(),
            midpoint: cluster.midpoint(),
            role: cluster.role(),
            closest_enemy_cluster: service.closest_enemy_cluster(cluster).map(Cluster::id),
        }
    }
}

pub(crate) fn run(arg: &ClusterArg) -> anyhow::Result<()> {
    let ClusterArg {
        units,
        max_dist,
        max_cluster_size,
        output,
    } = arg;

    let units = util::read_units_file(units)?;
    let mut service = ClusteringService::new(ClusterConfig {
        max_dist: *max_dist,
        max_cluster_size: *max_cluster_size,
    });
    service.build_clusters(&units);

    let reports: Vec<_> = service
        .clusters()
        .iter()
        .map(|cluster| ClusterReport::new(&service, cluster))
        .collect();

    eprintln!(
        "Grouped {} units into {} clusters",
        units.len(),
        reports.len()
    );
    for report in &reports {
        eprintln!(
            "  {:>3}: {} {:?} x{} at {:?}",
            report.id.0,
            report.team,
            report.role,
            report.members.len(),
            report.midpoint
        );
    }

    util::write_json(&reports, output.as_deref())?;
    Ok(())
}

//! Independence clustering of tracks and detections
//!
//! Tracks that gate at least one common detection must be solved jointly;
//! tracks with no shared detections can be solved independently. Clustering
//! partitions the validation matrix into disjoint sub-problems so that the
//! downstream net construction and probability computation run on the
//! smallest possible inputs.

use std::collections::BTreeSet;

use nalgebra::DMatrix;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::graph::UndirectedGraph;

/// One independent sub-problem of the association
///
/// Holds the row (track) indices and column (detection) indices pertaining
/// to the cluster. Detection columns use the original matrix numbering, so
/// they are 1-based after the null column. Clusters produced by
/// [`gen_clusters`] are pairwise disjoint on both axes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cluster {
    /// Track row indices in this cluster
    pub tracks: BTreeSet<usize>,
    /// Detection column indices in this cluster
    pub detections: BTreeSet<usize>,
}

impl Cluster {
    /// Create a cluster from its track and detection index sets
    pub fn new(tracks: BTreeSet<usize>, detections: BTreeSet<usize>) -> Self {
        Self { tracks, detections }
    }
}

/// Cluster tracks into groups sharing detections.
///
/// Ignoring the null column, each detection contributes the list of track
/// rows it gates; consecutive members of each list are chained into an
/// undirected graph over track indices, and each connected component becomes
/// one cluster. A cluster's detection set is the union of its member tracks'
/// valid non-null columns.
///
/// Tracks gated by no detection (only the null hypothesis is feasible) never
/// enter the graph and are returned separately as unassociated; their
/// assignment is trivially null and they must be excluded from downstream
/// enumeration.
///
/// Zero tracks or zero detections is not an error: the cluster list is empty
/// and every track is unassociated.
///
/// Clusters are ordered by their smallest member track and unassociated
/// indices ascend, so the output is deterministic for a given matrix.
pub fn gen_clusters(validation: &DMatrix<bool>) -> (Vec<Cluster>, Vec<usize>) {
    let num_tracks = validation.nrows();
    let num_columns = validation.ncols();

    // Chain each detection's gated tracks into the connectivity graph
    let mut graph = UndirectedGraph::new();
    for col in 1..num_columns {
        let gated: Vec<usize> = (0..num_tracks).filter(|&row| validation[(row, col)]).collect();
        graph.add_chain(&gated);
    }

    let mut clusters = Vec::new();
    for tracks in graph.connected_components() {
        let mut detections = BTreeSet::new();
        for &row in &tracks {
            for col in 1..num_columns {
                if validation[(row, col)] {
                    detections.insert(col);
                }
            }
        }
        clusters.push(Cluster::new(tracks, detections));
    }

    let associated: BTreeSet<usize> = clusters
        .iter()
        .flat_map(|cluster| cluster.tracks.iter().copied())
        .collect();
    let unassociated = (0..num_tracks)
        .filter(|row| !associated.contains(row))
        .collect();

    (clusters, unassociated)
}
